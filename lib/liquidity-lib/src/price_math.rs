//! Conversion of tick indexes and Q64.64 square-root prices into human prices.
//!
//! Both conversions scale by `10^(decimals_a - decimals_b)` so that the
//! result is the price of one whole token A expressed in token B.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::One;

/// Significant digits kept in returned prices.
pub const PRICE_PRECISION: u64 = 40;

/// Fewest significant digits that still tell adjacent ticks apart: one tick
/// moves the price by 1e-4 relative, rounding to 6 digits moves it by at most 5e-6.
pub const MIN_PRICE_PRECISION: u64 = 6;

/// Significant digits kept while exponentiating, above [`PRICE_PRECISION`]
/// so that rounding of intermediate squares never reaches the result.
const WORKING_PRECISION: u64 = 80;

pub trait PriceConverter {
    /// Price at `tick_index`, strictly increasing with the tick.
    fn tick_to_price(&self, tick_index: i32, decimals_a: u8, decimals_b: u8) -> BigDecimal;

    /// Price for a Q64.64 square-root price, strictly increasing with `sqrt_price_x64`.
    fn sqrt_price_to_price(&self, sqrt_price_x64: u128, decimals_a: u8, decimals_b: u8)
        -> BigDecimal;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecimalPriceMath {
    precision: u64,
}

impl Default for DecimalPriceMath {
    fn default() -> Self {
        Self {
            precision: PRICE_PRECISION,
        }
    }
}

impl DecimalPriceMath {
    /// Clamped to `MIN_PRICE_PRECISION..=80` so prices stay strictly increasing.
    pub fn with_precision(precision: u64) -> Self {
        Self {
            precision: precision.clamp(MIN_PRICE_PRECISION, WORKING_PRECISION),
        }
    }

    pub fn precision(&self) -> u64 {
        self.precision
    }

    fn finish(&self, value: BigDecimal) -> BigDecimal {
        value.with_prec(self.precision).normalized()
    }
}

impl PriceConverter for DecimalPriceMath {
    fn tick_to_price(&self, tick_index: i32, decimals_a: u8, decimals_b: u8) -> BigDecimal {
        // 1.0001
        let base = BigDecimal::new(BigInt::from(10001), 4);
        let magnitude = pow_with_precision(&base, tick_index.unsigned_abs());
        let ratio = if tick_index < 0 {
            (BigDecimal::one() / magnitude).with_prec(WORKING_PRECISION)
        } else {
            magnitude
        };
        self.finish(ratio * decimals_factor(decimals_a, decimals_b))
    }

    fn sqrt_price_to_price(
        &self,
        sqrt_price_x64: u128,
        decimals_a: u8,
        decimals_b: u8,
    ) -> BigDecimal {
        // x / 2^64 == x * 5^64 / 10^64, exact in decimal
        let sqrt_price =
            BigDecimal::new(BigInt::from(sqrt_price_x64) * BigInt::from(5u8).pow(64), 64);
        let price = &sqrt_price * &sqrt_price;
        self.finish(price * decimals_factor(decimals_a, decimals_b))
    }
}

/// `10^(decimals_a - decimals_b)`
fn decimals_factor(decimals_a: u8, decimals_b: u8) -> BigDecimal {
    BigDecimal::new(BigInt::one(), decimals_b as i64 - decimals_a as i64)
}

fn pow_with_precision(base: &BigDecimal, mut exponent: u32) -> BigDecimal {
    let mut result = BigDecimal::one();
    let mut square = base.clone();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = (&result * &square).with_prec(WORKING_PRECISION);
        }
        exponent >>= 1;
        if exponent > 0 {
            square = (&square * &square).with_prec(WORKING_PRECISION);
        }
    }
    result
}
