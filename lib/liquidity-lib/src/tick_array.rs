use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::DistributionError;

pub const TICK_ARRAY_SIZE: i32 = 88;
pub const TICK_ARRAY_SIZE_USIZE: usize = 88;
pub const MIN_TICK_INDEX: i32 = -443636;
pub const MAX_TICK_INDEX: i32 = 443636;

/// One slot of a tick array.
///
/// `liquidity_net` is the change of active liquidity when the price crosses
/// this tick moving upward.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickRecord {
    pub liquidity_net: BigInt,
}

impl TickRecord {
    pub fn new(liquidity_net: impl Into<BigInt>) -> Self {
        Self {
            liquidity_net: liquidity_net.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.liquidity_net.is_zero()
    }
}

/// Fixed-capacity partition of the tick axis, holding exactly
/// [`TICK_ARRAY_SIZE`] consecutive ticks spaced `tick_spacing` apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickArray {
    start_tick_index: i32,
    ticks: [TickRecord; TICK_ARRAY_SIZE_USIZE],
}

impl TickArray {
    pub fn new(start_tick_index: i32, ticks: [TickRecord; TICK_ARRAY_SIZE_USIZE]) -> Self {
        Self {
            start_tick_index,
            ticks,
        }
    }

    pub fn empty(start_tick_index: i32) -> Self {
        Self::new(start_tick_index, std::array::from_fn(|_| TickRecord::default()))
    }

    /// Build an array from `(slot, liquidity_net)` pairs, every other slot stays empty.
    pub fn from_sparse<I, L>(start_tick_index: i32, entries: I) -> Result<Self, DistributionError>
    where
        I: IntoIterator<Item = (usize, L)>,
        L: Into<BigInt>,
    {
        let mut tick_array = Self::empty(start_tick_index);
        for (slot, liquidity_net) in entries {
            let Some(record) = tick_array.ticks.get_mut(slot) else {
                return Err(DistributionError::SlotOutOfRange { slot });
            };
            record.liquidity_net = liquidity_net.into();
        }
        Ok(tick_array)
    }

    pub fn start_tick_index(&self) -> i32 {
        self.start_tick_index
    }

    pub fn ticks(&self) -> &[TickRecord] {
        &self.ticks
    }

    /// Absolute tick index of `slot` for a pool with the given spacing.
    pub fn tick_index(&self, slot: usize, tick_spacing: u16) -> i32 {
        self.start_tick_index + slot as i32 * tick_spacing as i32
    }

    /// Slots carrying a liquidity change, in increasing slot order.
    pub fn non_empty_slots(&self) -> impl Iterator<Item = (usize, &TickRecord)> + '_ {
        self.ticks
            .iter()
            .enumerate()
            .filter(|(_, record)| !record.is_empty())
    }
}

pub fn ticks_per_array(tick_spacing: u16) -> i32 {
    TICK_ARRAY_SIZE * tick_spacing as i32
}

/// Given a tick & tick-spacing, derive the start tick of the tick-array that this tick would reside in
pub fn derive_start_tick(curr_tick: i32, tick_spacing: u16) -> i32 {
    let num_of_ticks_in_array = ticks_per_array(tick_spacing);
    let rem = curr_tick % num_of_ticks_in_array;
    if curr_tick < 0 && rem != 0 {
        curr_tick - rem - num_of_ticks_in_array
    } else {
        curr_tick - rem
    }
}
