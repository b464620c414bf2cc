use tracing::trace;

use crate::tick_array::TickArray;

/// Order tick arrays by their start tick, ascending.
///
/// The sort is stable and keeps duplicates: a partition supplied twice is swept twice.
pub fn assemble<'a, I>(records: I) -> Vec<&'a TickArray>
where
    I: IntoIterator<Item = &'a TickArray>,
{
    let mut sorted: Vec<&TickArray> = records.into_iter().collect();
    sorted.sort_by_key(|tick_array| tick_array.start_tick_index());
    trace!(count = sorted.len(), "assembled tick arrays");
    sorted
}
