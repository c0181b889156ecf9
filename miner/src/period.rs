//! Component A: the period/support evaluator.

/// Computes `(support, period)` for a set of timestamps at which some itemset
/// occurred, against a database of `database_size` transactions.
///
/// Returns `None` if the running maximum gap exceeds `max_per` at any point
/// during the scan — the itemset "dies" and no further timestamps are worth
/// examining. Note that the tail term (the gap from the last occurrence to
/// the end of the database) is folded in unconditionally after the scan and
/// can itself push the returned period above `max_per`; callers are
/// responsible for the final `period <= max_per` check.
pub fn evaluate(timestamps: &[i64], database_size: u64, max_per: u64) -> Option<(u64, u64)> {
    let mut sorted = timestamps.to_vec();
    sorted.sort_unstable();

    let mut prev: i64 = 0;
    let mut max_gap: u64 = 0;
    let mut count: u64 = 0;

    for &ts in &sorted {
        let gap = (ts - prev).max(0) as u64;
        max_gap = max_gap.max(gap);
        if max_gap > max_per {
            return None;
        }
        prev = ts;
        count += 1;
    }

    let tail = (database_size as i64 - prev).unsigned_abs();
    max_gap = max_gap.max(tail);

    Some((count, max_gap))
}
