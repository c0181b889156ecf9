//! Component F: the mining driver — orchestrates profiling, rewriting, tree
//! construction, recursive generation, and label rehydration.

use std::collections::HashMap;

use periodic_miner_common::{Database, Error, Pattern, Result, Threshold};

use crate::mtree::MTree;
use crate::profiler;
use crate::ptree::PTree;
use crate::rank::Rank;
use crate::rewrite;

/// Mines `database` for every maximal periodic-frequent pattern meeting
/// `min_sup` and `max_per`, returning patterns in the order they were
/// discovered by the underlying tree traversal (deterministic given the
/// input; see the ordering guarantee in the driver's design notes).
#[tracing::instrument(skip(database), fields(database_size = database.len()))]
pub fn mine(database: Database, min_sup: Threshold, max_per: Threshold) -> Result<Vec<Pattern>> {
    if database.is_empty() {
        return Err(Error::EmptyDatabase);
    }

    let database_size = database.len() as u64;
    let min_sup = min_sup.resolve(database_size);
    let max_per = max_per.resolve(database_size);

    if min_sup > database_size {
        return Err(Error::ThresholdExceedsDatabase {
            min_sup,
            database_size,
        });
    }

    tracing::debug!(database_size, min_sup, max_per, "starting mining run");

    let profile = profiler::profile(&database, database_size, min_sup, max_per);
    let rewritten = rewrite::rewrite(&database, &profile);

    let mut tree = PTree::new(profile.info.clone());
    for (ts, ranks) in rewritten {
        tree.add_transaction(ts, &ranks)?;
    }

    let mut mtree = MTree::new();
    let mut raw_patterns: Vec<(Vec<Rank>, (u64, u64))> = Vec::new();
    tree.generate(&[], &mut raw_patterns, &mut mtree, database_size, min_sup, max_per)?;

    let label_of: HashMap<Rank, &str> = profile
        .rank_of
        .iter()
        .map(|(label, rank)| (*rank, label.as_str()))
        .collect();

    let mut patterns = Vec::with_capacity(raw_patterns.len());
    for (ranks, (support, period)) in raw_patterns {
        let mut sorted_ranks = ranks;
        sorted_ranks.sort_unstable();
        let labels = sorted_ranks
            .into_iter()
            .map(|rank| label_of[&rank].to_string())
            .collect();
        patterns.push(Pattern::new(labels, support, period));
    }

    tracing::debug!(pattern_count = patterns.len(), "mining run complete");

    Ok(patterns)
}

#[cfg(test)]
mod test {
    use super::*;
    use periodic_miner_common::Transaction;

    fn txn(ts: i64, items: &[&str]) -> Transaction {
        Transaction::new(ts, items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn empty_database_is_rejected() {
        let result = mine(vec![], Threshold::Count(1), Threshold::Count(1));
        assert!(matches!(result, Err(Error::EmptyDatabase)));
    }

    #[test]
    fn min_sup_above_database_size_is_rejected() {
        let database = vec![txn(1, &["a"])];
        let result = mine(database, Threshold::Count(5), Threshold::Count(5));
        assert!(matches!(
            result,
            Err(Error::ThresholdExceedsDatabase {
                min_sup: 5,
                database_size: 1
            })
        ));
    }

    #[test]
    fn rehydrated_pattern_labels_are_sorted_rank_ascending() {
        let database = vec![txn(1, &["z", "a"]), txn(2, &["z", "a"])];
        let patterns = mine(database, Threshold::Count(2), Threshold::Count(2)).unwrap();
        assert_eq!(patterns.len(), 1);
        // "z" out-supports nothing here (tied with "a"), so rank order puts
        // the descending-label tie-break ahead: z (rank 0) before a (rank 1).
        // Rehydration must still sort by rank, i.e. emit in header order.
        assert_eq!(patterns[0].items, vec!["z".to_string(), "a".to_string()]);
    }
}
