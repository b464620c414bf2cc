use bigdecimal::BigDecimal;
use num_bigint::BigUint;
use num_traits::Zero;
use serde_derive::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityDistributionDataPoint {
    pub tick_index: i32,
    #[serde_as(as = "DisplayFromStr")]
    pub price: BigDecimal,
    /// Active liquidity at-or-above `tick_index`, up to the next datapoint.
    #[serde_as(as = "DisplayFromStr")]
    pub liquidity: BigUint,
}

/// Liquidity curve of one pool.
///
/// The current triple is copied from the pool metadata and is not reconciled
/// with the datapoints: both may have been read at different slots, see
/// [`LiquidityDistribution::active_liquidity_at`].
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityDistribution {
    pub current_tick_index: i32,
    #[serde_as(as = "DisplayFromStr")]
    pub current_price: BigDecimal,
    #[serde_as(as = "DisplayFromStr")]
    pub current_liquidity: BigUint,
    pub datapoints: Vec<LiquidityDistributionDataPoint>,
}

impl LiquidityDistribution {
    /// Liquidity implied by the swept datapoints at `tick_index`, zero below the first one.
    pub fn active_liquidity_at(&self, tick_index: i32) -> BigUint {
        let covering = self
            .datapoints
            .partition_point(|datapoint| datapoint.tick_index <= tick_index);
        match covering.checked_sub(1) {
            Some(i) => self.datapoints[i].liquidity.clone(),
            None => BigUint::zero(),
        }
    }

    /// True when the pool's stated liquidity matches the swept curve at the current tick.
    pub fn is_consistent_with_sweep(&self) -> bool {
        self.active_liquidity_at(self.current_tick_index) == self.current_liquidity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(tick_index: i32, liquidity: u64) -> LiquidityDistributionDataPoint {
        LiquidityDistributionDataPoint {
            tick_index,
            price: BigDecimal::from(tick_index),
            liquidity: BigUint::from(liquidity),
        }
    }

    fn distribution(current_tick_index: i32, current_liquidity: u64) -> LiquidityDistribution {
        LiquidityDistribution {
            current_tick_index,
            current_price: BigDecimal::from(1),
            current_liquidity: BigUint::from(current_liquidity),
            datapoints: vec![point(-64, 100), point(640, 150), point(5632, 120)],
        }
    }

    #[test]
    fn active_liquidity_uses_last_crossed_tick() {
        let d = distribution(0, 100);
        assert_eq!(d.active_liquidity_at(-65), BigUint::zero());
        assert_eq!(d.active_liquidity_at(-64), BigUint::from(100u32));
        assert_eq!(d.active_liquidity_at(639), BigUint::from(100u32));
        assert_eq!(d.active_liquidity_at(640), BigUint::from(150u32));
        assert_eq!(d.active_liquidity_at(100_000), BigUint::from(120u32));
    }

    #[test]
    fn consistency_check_compares_current_tick() {
        assert!(distribution(0, 100).is_consistent_with_sweep());
        assert!(!distribution(0, 150).is_consistent_with_sweep());
    }

    #[test]
    fn serializes_big_numbers_as_strings() {
        let json = serde_json::to_value(distribution(0, 100)).unwrap();
        assert_eq!(json["currentTickIndex"], 0);
        assert_eq!(json["currentLiquidity"], "100");
        assert_eq!(json["datapoints"][1]["tickIndex"], 640);
        assert_eq!(json["datapoints"][1]["liquidity"], "150");
        assert_eq!(json["datapoints"][1]["price"], "640");
    }
}
