use num_bigint::BigUint;
use serde_derive::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

/// State of one pool at the moment of the query.
///
/// `current_sqrt_price` is a Q64.64 fixed point square root of the price.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    pub tick_spacing: u16,
    pub current_tick_index: i32,
    #[serde_as(as = "DisplayFromStr")]
    pub current_sqrt_price: u128,
    #[serde_as(as = "DisplayFromStr")]
    pub current_liquidity: BigUint,
    pub decimals_a: u8,
    pub decimals_b: u8,
}
