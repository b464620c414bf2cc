use async_trait::async_trait;
use liquidity_lib::{
    assemble, validate_tick_arrays, LiquidityDistribution, LiquiditySweep, PoolSnapshot,
    PriceConverter, TickArray,
};
use solana_sdk::pubkey::Pubkey;
use tracing::{info, warn};

/// Supplier of the pool metadata and the tick arrays of one pool.
///
/// Both calls may observe different slots, nothing reconciles them.
#[async_trait]
pub trait LiquiditySource: Sync + Send {
    async fn pool_snapshot(&self, pool: &Pubkey) -> anyhow::Result<PoolSnapshot>;

    /// Every tick array of `pool`, in any order.
    async fn tick_arrays(&self, pool: &Pubkey) -> anyhow::Result<Vec<TickArray>>;
}

pub async fn fetch_liquidity_distribution<P: PriceConverter>(
    source: &dyn LiquiditySource,
    sweep: &LiquiditySweep<P>,
    pool: &Pubkey,
    strict: bool,
) -> anyhow::Result<LiquidityDistribution> {
    let snapshot = source.pool_snapshot(pool).await?;
    let tick_arrays = source.tick_arrays(pool).await?;
    info!(%pool, tick_array_count = tick_arrays.len(), "loaded pool");

    let sorted = assemble(&tick_arrays);
    if strict {
        validate_tick_arrays(sorted.iter().copied(), snapshot.tick_spacing)?;
    }
    let distribution = sweep.sweep(sorted, &snapshot)?;

    if !distribution.is_consistent_with_sweep() {
        warn!(
            %pool,
            current_tick_index = distribution.current_tick_index,
            current_liquidity = %distribution.current_liquidity,
            swept_liquidity = %distribution.active_liquidity_at(distribution.current_tick_index),
            "pool liquidity differs from swept tick arrays, data may come from different slots"
        );
    }

    Ok(distribution)
}
