use num_bigint::{BigInt, Sign};
use num_traits::Zero;
use tracing::{debug, trace};

use crate::assembler::assemble;
use crate::distribution::{LiquidityDistribution, LiquidityDistributionDataPoint};
use crate::error::DistributionError;
use crate::pool::PoolSnapshot;
use crate::price_math::{DecimalPriceMath, PriceConverter};
use crate::tick_array::TickArray;

/// Left-to-right accumulation of `liquidity_net` over sorted tick arrays.
#[derive(Clone, Debug, Default)]
pub struct LiquiditySweep<P = DecimalPriceMath> {
    price_math: P,
}

impl<P: PriceConverter> LiquiditySweep<P> {
    pub fn new(price_math: P) -> Self {
        Self { price_math }
    }

    /// Sweep tick arrays already ordered by start tick.
    ///
    /// Arrays must be aligned to the pool's tick spacing and must not overlap,
    /// neither is checked here (see [`crate::validate_tick_arrays`]).
    pub fn sweep<'a, I>(
        &self,
        sorted_arrays: I,
        pool: &PoolSnapshot,
    ) -> Result<LiquidityDistribution, DistributionError>
    where
        I: IntoIterator<Item = &'a TickArray>,
    {
        let mut liquidity = BigInt::zero();
        let mut datapoints = vec![];
        let mut tick_array_count = 0usize;

        for tick_array in sorted_arrays {
            tick_array_count += 1;
            for (slot, record) in tick_array.non_empty_slots() {
                let tick_index = tick_array.tick_index(slot, pool.tick_spacing);

                // move right
                liquidity += &record.liquidity_net;
                if liquidity.sign() == Sign::Minus {
                    return Err(DistributionError::NegativeLiquidity {
                        tick_index,
                        liquidity,
                    });
                }

                trace!(tick_index, %liquidity, "liquidity change");
                datapoints.push(LiquidityDistributionDataPoint {
                    tick_index,
                    price: self
                        .price_math
                        .tick_to_price(tick_index, pool.decimals_a, pool.decimals_b),
                    liquidity: liquidity.magnitude().clone(),
                });
            }
        }

        debug!(
            tick_array_count,
            datapoint_count = datapoints.len(),
            "liquidity sweep done"
        );

        Ok(LiquidityDistribution {
            current_tick_index: pool.current_tick_index,
            current_price: self.price_math.sqrt_price_to_price(
                pool.current_sqrt_price,
                pool.decimals_a,
                pool.decimals_b,
            ),
            current_liquidity: pool.current_liquidity.clone(),
            datapoints,
        })
    }
}

/// Sweep with the default price conversion.
pub fn sweep<'a, I>(
    sorted_arrays: I,
    pool: &PoolSnapshot,
) -> Result<LiquidityDistribution, DistributionError>
where
    I: IntoIterator<Item = &'a TickArray>,
{
    LiquiditySweep::<DecimalPriceMath>::default().sweep(sorted_arrays, pool)
}

/// Assemble then sweep an unordered set of tick arrays of one pool.
pub fn compute_liquidity_distribution<'a, I>(
    records: I,
    pool: &PoolSnapshot,
) -> Result<LiquidityDistribution, DistributionError>
where
    I: IntoIterator<Item = &'a TickArray>,
{
    sweep(assemble(records), pool)
}
