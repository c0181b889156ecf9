//! Component B: the one-item profiler.

use std::collections::HashMap;

use periodic_miner_common::{Database, ItemLabel};

use crate::period;
use crate::rank::Rank;

/// The outcome of profiling a database: which items survived the thresholds,
/// what rank each was assigned, and the `(support, period)` header stats the
/// main prefix tree is seeded with.
#[derive(Debug, Default)]
pub struct Profile {
    pub rank_of: HashMap<ItemLabel, Rank>,
    pub info: HashMap<Rank, (u64, u64)>,
}

/// Scans `database` once, collecting each item's timestamps, then evaluates
/// support/period per item via [`period::evaluate`] — the code-reuse path
/// the evaluator's own contract explicitly permits, since item timestamps
/// are observed in nondecreasing order as transactions arrive in order.
pub fn profile(database: &Database, database_size: u64, min_sup: u64, max_per: u64) -> Profile {
    let mut timestamps_by_item: HashMap<ItemLabel, Vec<i64>> = HashMap::new();
    for transaction in database {
        for item in &transaction.items {
            timestamps_by_item
                .entry(item.clone())
                .or_default()
                .push(transaction.timestamp);
        }
    }

    let mut survivors: Vec<(ItemLabel, u64, u64)> = Vec::new();
    for (item, timestamps) in &timestamps_by_item {
        if let Some((support, period)) = period::evaluate(timestamps, database_size, max_per) {
            if support >= min_sup && period <= max_per {
                survivors.push((item.clone(), support, period));
            }
        }
    }

    // (support desc, label desc): ties broken toward the lexicographically later label.
    survivors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let mut rank_of = HashMap::with_capacity(survivors.len());
    let mut info = HashMap::with_capacity(survivors.len());
    for (position, (item, support, period)) in survivors.into_iter().enumerate() {
        let rank = position as Rank;
        log::trace!("item '{item}' survived profiling: rank={rank}, support={support}, period={period}");
        rank_of.insert(item, rank);
        info.insert(rank, (support, period));
    }

    Profile { rank_of, info }
}

#[cfg(test)]
mod test {
    use super::*;
    use periodic_miner_common::Transaction;

    fn txn(ts: i64, items: &[&str]) -> Transaction {
        Transaction::new(ts, items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn ranks_by_descending_support() {
        let database = vec![
            txn(1, &["a", "b"]),
            txn(2, &["a"]),
            txn(3, &["a", "b"]),
        ];
        let profile = profile(&database, 3, 1, 3);
        assert_eq!(profile.rank_of["a"], 0);
        assert_eq!(profile.rank_of["b"], 1);
        assert_eq!(profile.info[&0], (3, 1));
        assert_eq!(profile.info[&1], (2, 2));
    }

    #[test]
    fn filters_items_below_min_sup() {
        let database = vec![txn(1, &["a"]), txn(2, &["b"]), txn(3, &["a"])];
        let profile = profile(&database, 3, 2, 3);
        assert!(profile.rank_of.contains_key("a"));
        assert!(!profile.rank_of.contains_key("b"));
    }

    #[test]
    fn tie_break_is_descending_label() {
        let database = vec![txn(1, &["a", "z"]), txn(2, &["a", "z"])];
        let profile = profile(&database, 2, 1, 2);
        assert_eq!(profile.rank_of["z"], 0);
        assert_eq!(profile.rank_of["a"], 1);
    }
}
