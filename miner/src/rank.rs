/// The internal identity of a surviving item, assigned by the profiler.
///
/// Rank 0 is the most-supported item (ties broken by descending label); all
/// tree and subsumption-check code operates on ranks rather than labels.
pub type Rank = u32;
