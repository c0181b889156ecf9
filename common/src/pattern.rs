use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transaction::ItemLabel;

/// A maximal periodic-frequent pattern emitted by the mining core.
///
/// `items` is always rank-ascending (the mining core's internal item rank,
/// not lexical order): the driver sorts by rank before building a `Pattern`,
/// so callers never need to re-sort it themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub items: Vec<ItemLabel>,
    pub support: u64,
    pub period: u64,
}

impl Pattern {
    pub fn new(items: Vec<ItemLabel>, support: u64, period: u64) -> Self {
        Self {
            items,
            support,
            period,
        }
    }
}

/// Renders a pattern in the persisted `item1 item2 ... :support:period` form.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :{}:{}", self.items.join(" "), self.support, self.period)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn renders_persisted_form() {
        let pattern = Pattern::new(vec!["a".to_string(), "b".to_string()], 4, 2);
        assert_eq!(pattern.to_string(), "a b :4:2");
    }

    #[test]
    fn renders_single_item() {
        let pattern = Pattern::new(vec!["a".to_string()], 1, 0);
        assert_eq!(pattern.to_string(), "a :1:0");
    }

    #[test]
    fn round_trips_through_json() {
        let pattern = Pattern::new(vec!["a".to_string(), "b".to_string()], 4, 2);
        let json = serde_json::to_string(&pattern).unwrap();
        let back: Pattern = serde_json::from_str(&json).unwrap();
        assert_eq!(pattern, back);
    }
}
