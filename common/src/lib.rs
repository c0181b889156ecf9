//! Shared types used across the mining core: the error hierarchy, threshold
//! coercion, and the transaction/pattern data model.

pub mod error;
pub mod pattern;
pub mod threshold;
pub mod transaction;

pub use error::{Error, Result};
pub use pattern::Pattern;
pub use threshold::Threshold;
pub use transaction::{Database, ItemLabel, Transaction};
