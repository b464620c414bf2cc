// Properties of the liquidity sweep over randomly placed positions.
// Run with: cargo test -p liquidity-lib --test test_proptest

use std::collections::BTreeMap;

use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;

use liquidity_lib::{
    assemble, compute_liquidity_distribution, ticks_per_array, validate_tick_arrays,
    PoolSnapshot, TickArray, TICK_ARRAY_SIZE,
};

const TICK_SPACING: u16 = 8;
const FIRST_ARRAY: i32 = -3;
const ARRAY_COUNT: i32 = 6;
const SLOT_COUNT: i32 = ARRAY_COUNT * TICK_ARRAY_SIZE;

fn pool() -> PoolSnapshot {
    PoolSnapshot {
        tick_spacing: TICK_SPACING,
        current_tick_index: 0,
        current_sqrt_price: 1u128 << 64,
        current_liquidity: BigUint::from(0u32),
        decimals_a: 6,
        decimals_b: 9,
    }
}

fn tick_of_slot(global_slot: i32) -> i32 {
    FIRST_ARRAY * ticks_per_array(TICK_SPACING) + global_slot * TICK_SPACING as i32
}

/// (lower slot, upper slot, amount), upper strictly above lower.
fn positions() -> impl Strategy<Value = Vec<(i32, i32, u64)>> {
    prop::collection::vec((0..SLOT_COUNT, 1..SLOT_COUNT, 1u64..1_000_000_000), 0..24).prop_map(
        |raw| {
            raw.into_iter()
                .map(|(lower, width, amount)| (lower, (lower + width).min(SLOT_COUNT - 1), amount))
                .filter(|(lower, upper, _)| lower < upper)
                .collect()
        },
    )
}

/// Net liquidity change per tick, zero entries included.
fn nets_by_slot(positions: &[(i32, i32, u64)]) -> BTreeMap<i32, i128> {
    let mut nets = BTreeMap::new();
    for &(lower, upper, amount) in positions {
        *nets.entry(lower).or_insert(0i128) += amount as i128;
        *nets.entry(upper).or_insert(0i128) -= amount as i128;
    }
    nets
}

fn tick_arrays(nets: &BTreeMap<i32, i128>) -> Vec<TickArray> {
    (0..ARRAY_COUNT)
        .map(|array| {
            let first_slot = array * TICK_ARRAY_SIZE;
            let entries = nets
                .range(first_slot..first_slot + TICK_ARRAY_SIZE)
                .map(|(slot, net)| ((slot - first_slot) as usize, *net));
            TickArray::from_sparse((FIRST_ARRAY + array) * ticks_per_array(TICK_SPACING), entries)
                .unwrap()
        })
        .collect()
}

fn shuffled_arrays() -> impl Strategy<Value = (BTreeMap<i32, i128>, Vec<TickArray>)> {
    positions().prop_flat_map(|positions| {
        let nets = nets_by_slot(&positions);
        let arrays = tick_arrays(&nets);
        (Just(nets), Just(arrays).prop_shuffle())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: ticks and prices strictly increase along the curve
    #[test]
    fn prop_datapoints_strictly_increase((_, arrays) in shuffled_arrays()) {
        let distribution = compute_liquidity_distribution(&arrays, &pool()).unwrap();
        for pair in distribution.datapoints.windows(2) {
            prop_assert!(pair[0].tick_index < pair[1].tick_index);
            prop_assert!(pair[0].price < pair[1].price);
        }
    }

    /// Property: liquidity is the prefix sum of non-zero nets, one point per non-zero net
    #[test]
    fn prop_liquidity_is_prefix_sum((nets, arrays) in shuffled_arrays()) {
        let distribution = compute_liquidity_distribution(&arrays, &pool()).unwrap();

        let mut running = BigInt::from(0);
        let expected: Vec<(i32, BigUint)> = nets
            .iter()
            .filter(|(_, net)| **net != 0)
            .map(|(slot, net)| {
                running += *net;
                (tick_of_slot(*slot), running.to_biguint().unwrap())
            })
            .collect();
        let actual: Vec<(i32, BigUint)> = distribution
            .datapoints
            .iter()
            .map(|p| (p.tick_index, p.liquidity.clone()))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// Property: closed positions leave no liquidity after the last tick
    #[test]
    fn prop_curve_ends_at_zero((_, arrays) in shuffled_arrays()) {
        let distribution = compute_liquidity_distribution(&arrays, &pool()).unwrap();
        if let Some(last) = distribution.datapoints.last() {
            prop_assert_eq!(last.liquidity.clone(), BigUint::from(0u32));
        }
    }

    /// Property: input order of the arrays does not change the result
    #[test]
    fn prop_order_independent((nets, arrays) in shuffled_arrays()) {
        let sorted = tick_arrays(&nets);
        prop_assert_eq!(
            compute_liquidity_distribution(&arrays, &pool()).unwrap(),
            compute_liquidity_distribution(&sorted, &pool()).unwrap()
        );
        prop_assert!(validate_tick_arrays(assemble(&arrays), TICK_SPACING).is_ok());
    }

    /// Property: sweeping twice gives identical output
    #[test]
    fn prop_idempotent((_, arrays) in shuffled_arrays()) {
        let first = compute_liquidity_distribution(&arrays, &pool()).unwrap();
        let second = compute_liquidity_distribution(&arrays, &pool()).unwrap();
        prop_assert_eq!(first, second);
    }
}
