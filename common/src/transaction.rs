/// The label of a single item, as it appears in the input database.
///
/// Items are compared and hashed by value; the mining core assigns its own
/// internal rank to each distinct label once the database has been scanned.
pub type ItemLabel = String;

/// One row of the input database: a timestamp and the set of items that
/// occurred together at that timestamp.
///
/// Timestamps are caller-supplied and need not be contiguous or start at
/// zero, but the database as a whole is expected to be sorted by timestamp
/// ascending; the period/support evaluator relies on that ordering.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Transaction {
    pub timestamp: i64,
    pub items: Vec<ItemLabel>,
}

impl Transaction {
    pub fn new(timestamp: i64, items: Vec<ItemLabel>) -> Self {
        Self { timestamp, items }
    }
}

/// A sequence of transactions, ordered by ascending timestamp.
pub type Database = Vec<Transaction>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn constructs() {
        let txn = Transaction::new(1, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(txn.timestamp, 1);
        assert_eq!(txn.items, vec!["a", "b"]);
    }

    #[test]
    fn round_trips_through_json() {
        let txn = Transaction::new(4, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        let json = serde_json::to_string(&txn).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn, back);
    }
}
