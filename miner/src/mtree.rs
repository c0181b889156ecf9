//! Component E: the maximal subsumption tree (`MTree`).
//!
//! Stores every maximal pattern emitted so far as a root-to-leaf path, each
//! path ascending by rank, and answers whether a candidate itemset is
//! already a subset of some previously emitted maximal pattern.

use std::collections::HashMap;

use crate::rank::Rank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct MNode {
    item: Option<Rank>,
    children: HashMap<Rank, NodeId>,
    parent: Option<NodeId>,
}

const ROOT: NodeId = NodeId(0);

/// The result of a maximality probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsumption {
    /// A previously emitted maximal pattern already covers the candidate.
    Dominated,
    /// No emitted pattern dominates the candidate; it may proceed.
    NotDominated,
}

/// Persists across an entire mining run (see the single-instance design
/// note in the driver): one instance is owned by the driver and threaded by
/// mutable reference through every recursive `generate` call, so that a
/// pattern emitted in one branch prunes candidates discovered in another.
pub struct MTree {
    nodes: Vec<MNode>,
    summaries: HashMap<Rank, Vec<NodeId>>,
}

impl Default for MTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![MNode {
                item: None,
                children: HashMap::new(),
                parent: None,
            }],
            summaries: HashMap::new(),
        }
    }

    fn node(&self, id: NodeId) -> &MNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut MNode {
        &mut self.nodes[id.0]
    }

    fn child(&self, parent: NodeId, rank: Rank) -> Option<NodeId> {
        self.node(parent).children.get(&rank).copied()
    }

    fn new_child(&mut self, parent: NodeId, rank: Rank) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MNode {
            item: Some(rank),
            children: HashMap::new(),
            parent: Some(parent),
        });
        self.node_mut(parent).children.insert(rank, id);
        // Most-recent-first: candidate root-paths are walked starting with
        // the pattern that was emitted last.
        self.summaries.entry(rank).or_default().insert(0, id);
        id
    }

    /// Inserts a newly emitted maximal pattern. Ranks are stored in
    /// ascending order along the root-to-leaf path — reading a path from its
    /// leaf back up to the root therefore visits ranks in descending order,
    /// which is exactly the direction `isSubsumed` walks when matching a
    /// descending-sorted query. Previously inserted subset patterns are
    /// never pruned, as the mining order guarantees they will not be
    /// falsely re-emitted.
    pub fn add_pattern(&mut self, pattern: &[Rank]) {
        let mut sorted = pattern.to_vec();
        sorted.sort_unstable();

        let mut current = ROOT;
        for rank in sorted {
            current = match self.child(current, rank) {
                Some(id) => id,
                None => self.new_child(current, rank),
            };
        }
    }

    /// Checks whether `items` is a subset of some already-emitted maximal
    /// pattern. Sorts `items` descending, then for every node tagged with
    /// the highest-ranked item, walks parents upward matching a pointer into
    /// the sorted query — a full consumption of the query proves it lies
    /// along that emitted pattern's root path.
    pub fn is_subsumed(&self, items: &[Rank]) -> Subsumption {
        if items.is_empty() {
            return Subsumption::NotDominated;
        }

        let mut sorted = items.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        let head = sorted[0];

        let Some(head_nodes) = self.summaries.get(&head) else {
            return Subsumption::NotDominated;
        };

        if sorted.len() == 1 {
            return Subsumption::Dominated;
        }

        for &start in head_nodes {
            let mut index = 1;
            let mut cursor = self.node(start).parent;
            while let Some(pid) = cursor {
                let parent = self.node(pid);
                let Some(parent_item) = parent.item else {
                    break;
                };
                if sorted[index] == parent_item {
                    index += 1;
                    if index == sorted.len() {
                        return Subsumption::Dominated;
                    }
                }
                cursor = parent.parent;
            }
        }

        Subsumption::NotDominated
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_emitted_item_subsumes_itself() {
        let mut tree = MTree::new();
        tree.add_pattern(&[3]);
        assert_eq!(tree.is_subsumed(&[3]), Subsumption::Dominated);
    }

    #[test]
    fn unrelated_rank_is_not_dominated() {
        let mut tree = MTree::new();
        tree.add_pattern(&[3]);
        assert_eq!(tree.is_subsumed(&[7]), Subsumption::NotDominated);
    }

    #[test]
    fn subset_of_emitted_pattern_is_dominated() {
        let mut tree = MTree::new();
        tree.add_pattern(&[0, 1, 2]);
        assert_eq!(tree.is_subsumed(&[0, 2]), Subsumption::Dominated);
        assert_eq!(tree.is_subsumed(&[0, 1, 2]), Subsumption::Dominated);
    }

    #[test]
    fn superset_of_emitted_pattern_is_not_dominated() {
        let mut tree = MTree::new();
        tree.add_pattern(&[0, 1]);
        assert_eq!(tree.is_subsumed(&[0, 1, 9]), Subsumption::NotDominated);
    }

    #[test]
    fn pattern_spanning_two_branches_is_not_dominated() {
        let mut tree = MTree::new();
        tree.add_pattern(&[0, 1]);
        tree.add_pattern(&[2, 3]);
        assert_eq!(tree.is_subsumed(&[1, 3]), Subsumption::NotDominated);
    }
}
