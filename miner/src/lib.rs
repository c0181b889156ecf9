//! Maximal periodic-frequent pattern mining over temporal transaction
//! databases: a one-pass profiler, a database rewriter, a prefix tree with
//! conditional-projection pattern growth, and a subsumption tree that prunes
//! candidates already covered by a previously emitted maximal pattern.

pub mod driver;
pub mod mtree;
pub mod period;
pub mod profiler;
pub mod ptree;
pub mod rank;
pub mod rewrite;

pub use driver::mine;
pub use periodic_miner_common::{Database, Error, ItemLabel, Pattern, Result, Threshold, Transaction};
