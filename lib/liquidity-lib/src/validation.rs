use itertools::Itertools;

use crate::error::DistributionError;
use crate::tick_array::{
    derive_start_tick, ticks_per_array, TickArray, MAX_TICK_INDEX, MIN_TICK_INDEX,
};

/// Check that sorted tick arrays are aligned, in range and pairwise disjoint.
///
/// The sweep trusts its input, run this first when the source is not trusted.
pub fn validate_tick_arrays<'a, I>(
    sorted_arrays: I,
    tick_spacing: u16,
) -> Result<(), DistributionError>
where
    I: IntoIterator<Item = &'a TickArray>,
    I::IntoIter: Clone,
{
    if tick_spacing == 0 {
        return Err(DistributionError::ZeroTickSpacing);
    }
    let span = ticks_per_array(tick_spacing);
    let arrays = sorted_arrays.into_iter();

    for tick_array in arrays.clone() {
        let start_tick_index = tick_array.start_tick_index();
        if derive_start_tick(start_tick_index, tick_spacing) != start_tick_index {
            return Err(DistributionError::MisalignedTickArray {
                start_tick_index,
                tick_spacing,
            });
        }
        // the left-edge array may start below MIN_TICK_INDEX
        if start_tick_index > MAX_TICK_INDEX || start_tick_index + span <= MIN_TICK_INDEX {
            return Err(DistributionError::TickArrayOutOfBounds(start_tick_index));
        }
    }

    for (previous, next) in arrays.tuple_windows() {
        if next.start_tick_index() < previous.start_tick_index() + span {
            return Err(DistributionError::OverlappingTickArrays {
                previous: previous.start_tick_index(),
                next: next.start_tick_index(),
            });
        }
    }

    Ok(())
}
