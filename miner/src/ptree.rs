//! Component D: the prefix tree (`PTree`) and its conditional-projection,
//! refinement, header-removal, and recursive generation operations.

use std::collections::HashMap;

use periodic_miner_common::{Error, Result};

use crate::mtree::{MTree, Subsumption};
use crate::period;
use crate::rank::Rank;

/// An index into a [`PTree`]'s node arena.
///
/// Nodes are stored in a flat `Vec` rather than linked via owned
/// parent/child pointers, so a child-to-parent edge is a plain index whose
/// lifetime is tied to the arena — this sidesteps self-referential structures
/// entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct PNode {
    item: Option<Rank>,
    children: HashMap<Rank, NodeId>,
    parent: Option<NodeId>,
    timestamps: Vec<i64>,
}

impl PNode {
    fn root() -> Self {
        Self {
            item: None,
            children: HashMap::new(),
            parent: None,
            timestamps: Vec::new(),
        }
    }
}

const ROOT: NodeId = NodeId(0);

/// A compressed FP-tree-like structure carrying per-node timestamp lists,
/// used both as the main tree over the whole rewritten database and as a
/// short-lived conditional tree per recursive mining frame.
pub struct PTree {
    nodes: Vec<Option<PNode>>,
    summaries: HashMap<Rank, Vec<NodeId>>,
    info: HashMap<Rank, (u64, u64)>,
}

impl PTree {
    /// Builds an empty tree seeded with `info`, the header `(support, period)`
    /// statistics this tree's projection is valid under.
    pub fn new(info: HashMap<Rank, (u64, u64)>) -> Self {
        Self {
            nodes: vec![Some(PNode::root())],
            summaries: HashMap::new(),
            info,
        }
    }

    /// Arena lookups should never miss: every `NodeId` in circulation was
    /// handed out by `new_child` and the only place a slot is ever cleared is
    /// `remove_header`, which never frees a node that still has a live child
    /// referencing it as parent (that invariant is what `generate`'s
    /// bottom-up header order exists to guarantee). A hit here means that
    /// invariant broke somewhere, not that the caller passed bad input.
    fn node(&self, id: NodeId) -> Result<&PNode> {
        self.nodes[id.0]
            .as_ref()
            .ok_or_else(|| Error::internal(format!("node {} referenced after being freed", id.0)))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut PNode> {
        self.nodes[id.0]
            .as_mut()
            .ok_or_else(|| Error::internal(format!("node {} referenced after being freed", id.0)))
    }

    fn child(&self, parent: NodeId, rank: Rank) -> Result<Option<NodeId>> {
        Ok(self.node(parent)?.children.get(&rank).copied())
    }

    fn new_child(&mut self, parent: NodeId, rank: Rank) -> Result<NodeId> {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(PNode {
            item: Some(rank),
            children: HashMap::new(),
            parent: Some(parent),
            timestamps: Vec::new(),
        }));
        self.node_mut(parent)?.children.insert(rank, id);
        self.summaries.entry(rank).or_default().push(id);
        Ok(id)
    }

    /// Walks the tree from root along `ranks`, creating missing children, and
    /// appends `ts` to the final node's timestamp list.
    pub fn add_transaction(&mut self, ts: i64, ranks: &[Rank]) -> Result<()> {
        let mut current = ROOT;
        for &rank in ranks {
            current = match self.child(current, rank)? {
                Some(id) => id,
                None => self.new_child(current, rank)?,
            };
        }
        self.node_mut(current)?.timestamps.push(ts);
        Ok(())
    }

    /// Collects the conditional pattern base of rank `r`: for every node
    /// tagged `r`, the root-to-parent path (excluding the virtual root)
    /// paired with that node's timestamp list.
    fn conditional_project(&self, r: Rank) -> Result<(Vec<Vec<Rank>>, Vec<Vec<i64>>)> {
        let mut patterns = Vec::new();
        let mut timestamp_sets = Vec::new();

        let Some(node_ids) = self.summaries.get(&r) else {
            return Ok((patterns, timestamp_sets));
        };

        for &id in node_ids {
            let node = self.node(id)?;
            let mut path = Vec::new();
            let mut cursor = node.parent;
            while let Some(pid) = cursor {
                let parent = self.node(pid)?;
                match parent.item {
                    Some(item) => {
                        path.push(item);
                        cursor = parent.parent;
                    }
                    None => break,
                }
            }
            path.reverse();
            patterns.push(path);
            timestamp_sets.push(node.timestamps.clone());
        }

        Ok((patterns, timestamp_sets))
    }

    /// Rolls up `r`'s occurrences into their parent nodes and removes `r`'s
    /// header entirely, freeing every node it referenced. Must actually drop
    /// the node storage (not merely unlink it) so that deep recursion on a
    /// long-running mine does not exhaust memory.
    pub fn remove_header(&mut self, r: Rank) -> Result<()> {
        let Some(node_ids) = self.summaries.remove(&r) else {
            return Ok(());
        };
        let removed = node_ids.len();
        for id in node_ids {
            let (parent, timestamps) = {
                let node = self.node(id)?;
                (node.parent, node.timestamps.clone())
            };
            if let Some(parent) = parent {
                self.node_mut(parent)?.timestamps.extend(timestamps);
                self.node_mut(parent)?.children.remove(&r);
            }
            self.nodes[id.0] = None;
        }
        self.info.remove(&r);
        log::trace!("removed header for rank {r}, freed {removed} node(s)");
        Ok(())
    }

    /// Recursively mines this tree's conditional pattern space, appending
    /// emitted maximal patterns (as rank sequences with their `(support,
    /// period)`) to `out`. `mtree` is threaded through every recursive call
    /// by mutable reference so the maximality probe sees every pattern
    /// emitted anywhere in the search so far, not just in this branch.
    pub fn generate(
        &mut self,
        prefix: &[Rank],
        out: &mut Vec<(Vec<Rank>, (u64, u64))>,
        mtree: &mut MTree,
        database_size: u64,
        min_sup: u64,
        max_per: u64,
    ) -> Result<()> {
        let mut headers: Vec<Rank> = self.info.keys().copied().collect();
        // Least-supported first; ties broken by descending rank.
        headers.sort_by(|&a, &b| self.info[&a].0.cmp(&self.info[&b].0).then_with(|| b.cmp(&a)));

        for r in headers {
            let Some(&support_period) = self.info.get(&r) else {
                continue;
            };

            let mut pattern = prefix.to_vec();
            pattern.push(r);

            let (cond_patterns, cond_timestamps) = self.conditional_project(r)?;
            let (filtered_patterns, kept_timestamps, cond_info) =
                refine(&cond_patterns, &cond_timestamps, database_size, min_sup, max_per);

            let mut candidate_closure = pattern.clone();
            candidate_closure.extend(cond_info.keys().copied());

            match mtree.is_subsumed(&candidate_closure) {
                Subsumption::Dominated => {
                    log::trace!("pattern {pattern:?} pruned: dominated by an earlier maximal pattern");
                }
                Subsumption::NotDominated => {
                    if filtered_patterns.is_empty() {
                        mtree.add_pattern(&pattern);
                        log::debug!("pattern {pattern:?} emitted: support={}, period={}", support_period.0, support_period.1);
                        out.push((pattern.clone(), support_period));
                    } else {
                        let mut child = PTree::new(cond_info);
                        for (cond_pattern, timestamps) in
                            filtered_patterns.iter().zip(kept_timestamps)
                        {
                            for ts in timestamps {
                                child.add_transaction(ts, cond_pattern)?;
                            }
                        }
                        child.generate(&pattern, out, mtree, database_size, min_sup, max_per)?;
                    }
                }
            }

            log::trace!("header for rank {r} processed");
            self.remove_header(r)?;
        }

        Ok(())
    }
}

/// Component 4.D's `refine`: aggregates per-item timestamps across a
/// conditional pattern base, recomputes `(support, period)` for every item
/// via the period evaluator, and filters each conditional pattern down to
/// the items that still clear the thresholds.
fn refine(
    patterns: &[Vec<Rank>],
    timestamp_sets: &[Vec<i64>],
    database_size: u64,
    min_sup: u64,
    max_per: u64,
) -> (Vec<Vec<Rank>>, Vec<Vec<i64>>, HashMap<Rank, (u64, u64)>) {
    let mut aggregated: HashMap<Rank, Vec<i64>> = HashMap::new();
    for (pattern, timestamps) in patterns.iter().zip(timestamp_sets) {
        for &item in pattern {
            aggregated.entry(item).or_default().extend(timestamps.iter().copied());
        }
    }

    let mut info = HashMap::with_capacity(aggregated.len());
    for (&item, timestamps) in &aggregated {
        if let Some((support, period)) = period::evaluate(timestamps, database_size, max_per) {
            if support >= min_sup && period <= max_per {
                info.insert(item, (support, period));
            }
        }
    }

    let mut filtered_patterns = Vec::with_capacity(patterns.len());
    let mut kept_timestamps = Vec::with_capacity(patterns.len());
    for (pattern, timestamps) in patterns.iter().zip(timestamp_sets) {
        let mut kept: Vec<Rank> = pattern.iter().copied().filter(|item| info.contains_key(item)).collect();
        if kept.is_empty() {
            // Nothing from this node's path survived the thresholds; it does
            // not contribute a conditional transaction. Dropping it here
            // (rather than keeping an empty entry) is what lets `generate`
            // tell "there is a nonempty conditional tail" apart from "this
            // node's tail died", which decides emit-now vs. recurse.
            continue;
        }
        // (support desc, rank asc): a conditional tree's root-to-leaf depth
        // order must put the item `generate`'s header loop processes last
        // (highest support) closest to the root, and among same-support
        // items the one processed last is the smallest rank — `generate`
        // breaks support ties by processing the largest rank first.
        kept.sort_by(|&a, &b| info[&b].0.cmp(&info[&a].0).then_with(|| a.cmp(&b)));
        filtered_patterns.push(kept);
        kept_timestamps.push(timestamps.clone());
    }

    (filtered_patterns, kept_timestamps, info)
}
