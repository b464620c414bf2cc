//! Reconstruction of a whirlpool's liquidity curve from its tick arrays.
//!
//! Tick arrays go through [`assemble`] (ordering) and then [`sweep`]
//! (accumulation and pricing), or both at once with
//! [`compute_liquidity_distribution`].

mod assembler;
mod distribution;
mod error;
mod pool;
pub mod price_math;
mod sweep;
mod tick_array;
mod validation;

pub use assembler::assemble;
pub use distribution::{LiquidityDistribution, LiquidityDistributionDataPoint};
pub use error::DistributionError;
pub use pool::PoolSnapshot;
pub use price_math::{DecimalPriceMath, PriceConverter};
pub use sweep::{compute_liquidity_distribution, sweep, LiquiditySweep};
pub use tick_array::{
    derive_start_tick, ticks_per_array, TickArray, TickRecord, MAX_TICK_INDEX, MIN_TICK_INDEX,
    TICK_ARRAY_SIZE, TICK_ARRAY_SIZE_USIZE,
};
pub use validation::validate_tick_arrays;
