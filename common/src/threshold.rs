use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A user-specified `minSup` or `maxPer` value, expressed either as an
/// absolute count or as a fraction of the database size.
///
/// String parsing follows the reference coercion rule: a value containing a
/// decimal point is a fraction, otherwise it is a count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Threshold {
    Count(u64),
    Fraction(f64),
}

impl Threshold {
    /// Resolve against a known database size, producing the effective count.
    ///
    /// A fraction is documented as intended for `(0, 1]` but is not range-checked
    /// here: a fraction outside that range resolves to whatever `fraction * n`
    /// rounds to, and is rejected later if it turns out to exceed `n`.
    pub fn resolve(&self, database_size: u64) -> u64 {
        match self {
            Threshold::Count(count) => *count,
            Threshold::Fraction(fraction) => (fraction * database_size as f64).round() as u64,
        }
    }
}

impl FromStr for Threshold {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('.') {
            s.parse::<f64>()
                .map(Threshold::Fraction)
                .map_err(|_| Error::InvalidThreshold(s.to_string()))
        } else {
            s.parse::<u64>()
                .map(Threshold::Count)
                .map_err(|_| Error::InvalidThreshold(s.to_string()))
        }
    }
}

impl From<u64> for Threshold {
    fn from(count: u64) -> Self {
        Threshold::Count(count)
    }
}

impl From<f64> for Threshold {
    fn from(fraction: f64) -> Self {
        Threshold::Fraction(fraction)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::int_string("3", Threshold::Count(3))]
    #[case::decimal_string("0.3", Threshold::Fraction(0.3))]
    #[case::trailing_zero_is_still_fraction("3.0", Threshold::Fraction(3.0))]
    fn parses(#[case] input: &str, #[case] expected: Threshold) {
        assert_eq!(input.parse::<Threshold>().unwrap(), expected);
    }

    #[test]
    fn rejects_garbage() {
        assert!("not-a-number".parse::<Threshold>().is_err());
    }

    #[rstest]
    #[case::count_passthrough(Threshold::Count(3), 10, 3)]
    #[case::fraction_of_ten(Threshold::Fraction(0.3), 10, 3)]
    #[case::fraction_exceeding_database(Threshold::Fraction(3.0), 10, 30)]
    fn resolves(#[case] threshold: Threshold, #[case] database_size: u64, #[case] expected: u64) {
        assert_eq!(threshold.resolve(database_size), expected);
    }
}
