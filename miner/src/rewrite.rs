//! Component C: the database rewriter.

use periodic_miner_common::Database;

use crate::profiler::Profile;
use crate::rank::Rank;

/// Projects each transaction onto the items that survived profiling, maps
/// them to their rank, and sorts each transaction by rank ascending.
/// Transactions that become empty after projection are dropped.
pub fn rewrite(database: &Database, profile: &Profile) -> Vec<(i64, Vec<Rank>)> {
    let mut out = Vec::with_capacity(database.len());
    for transaction in database {
        let mut ranks: Vec<Rank> = transaction
            .items
            .iter()
            .filter_map(|item| profile.rank_of.get(item).copied())
            .collect();

        if ranks.is_empty() {
            log::warn!(
                "transaction at ts={} became empty after projection",
                transaction.timestamp
            );
            continue;
        }

        ranks.sort_unstable();
        out.push((transaction.timestamp, ranks));
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use periodic_miner_common::Transaction;
    use std::collections::HashMap;

    fn profile_with(pairs: &[(&str, Rank)]) -> Profile {
        let mut rank_of = HashMap::new();
        let mut info = HashMap::new();
        for &(label, rank) in pairs {
            rank_of.insert(label.to_string(), rank);
            info.insert(rank, (1, 1));
        }
        Profile { rank_of, info }
    }

    #[test]
    fn drops_unranked_items_and_sorts_by_rank() {
        let profile = profile_with(&[("a", 1), ("b", 0)]);
        let database = vec![Transaction::new(
            1,
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        )];
        let rewritten = rewrite(&database, &profile);
        assert_eq!(rewritten, vec![(1, vec![0, 1])]);
    }

    #[test]
    fn drops_transactions_that_become_empty() {
        let profile = profile_with(&[("a", 0)]);
        let database = vec![Transaction::new(1, vec!["z".to_string()])];
        assert!(rewrite(&database, &profile).is_empty());
    }
}
