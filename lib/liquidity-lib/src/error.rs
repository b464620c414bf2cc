use num_bigint::BigInt;
use thiserror::Error;

use crate::tick_array::{MAX_TICK_INDEX, MIN_TICK_INDEX, TICK_ARRAY_SIZE};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DistributionError {
    #[error("active liquidity went negative ({liquidity}) at tick {tick_index}")]
    NegativeLiquidity { tick_index: i32, liquidity: BigInt },

    #[error("tick spacing must be positive")]
    ZeroTickSpacing,

    #[error("tick array start {start_tick_index} is not aligned to tick spacing {tick_spacing}")]
    MisalignedTickArray {
        start_tick_index: i32,
        tick_spacing: u16,
    },

    #[error("tick arrays starting at {previous} and {next} overlap")]
    OverlappingTickArrays { previous: i32, next: i32 },

    #[error(
        "tick array starting at {0} lies outside [{}, {}]",
        MIN_TICK_INDEX,
        MAX_TICK_INDEX
    )]
    TickArrayOutOfBounds(i32),

    #[error("slot {slot} is outside a tick array of {} ticks", TICK_ARRAY_SIZE)]
    SlotOutOfRange { slot: usize },
}
