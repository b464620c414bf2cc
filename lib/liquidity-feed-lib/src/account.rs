//! Decoding of the raw whirlpool program accounts the sweep needs.

use liquidity_lib::{PoolSnapshot, TickArray, TickRecord, TICK_ARRAY_SIZE_USIZE};
use num_bigint::{BigInt, BigUint};
use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

pub const DISCRIMINATOR_LEN: usize = 8;

pub const TICK_LEN: usize = 113;
pub const TICK_ARRAY_ACCOUNT_LEN: usize = 9988;
const TICK_ARRAY_START_OFFSET: usize = 8;
const TICK_ARRAY_TICKS_OFFSET: usize = 12;
pub const TICK_ARRAY_WHIRLPOOL_OFFSET: usize = 9956;
// initialized flag comes first
const TICK_LIQUIDITY_NET_OFFSET: usize = 1;

pub const WHIRLPOOL_ACCOUNT_LEN: usize = 653;
const WHIRLPOOL_TICK_SPACING_OFFSET: usize = 41;
const WHIRLPOOL_LIQUIDITY_OFFSET: usize = 49;
const WHIRLPOOL_SQRT_PRICE_OFFSET: usize = 65;
const WHIRLPOOL_TICK_CURRENT_INDEX_OFFSET: usize = 81;
const WHIRLPOOL_TOKEN_MINT_A_OFFSET: usize = 101;
const WHIRLPOOL_TOKEN_MINT_B_OFFSET: usize = 181;

const MINT_DECIMALS_OFFSET: usize = 44;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("{account} account has {len} bytes, expected {expected}")]
    InvalidLength {
        account: &'static str,
        len: usize,
        expected: usize,
    },
    #[error("{0} account has an unexpected discriminator")]
    InvalidDiscriminator(&'static str),
}

/// Anchor account discriminator, first 8 bytes of `sha256("account:<name>")`.
pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let hash = Sha256::digest(format!("account:{name}").as_bytes());
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    discriminator
}

fn check_account(
    data: &[u8],
    account: &'static str,
    expected: usize,
) -> Result<(), FeedError> {
    if data.len() < expected {
        return Err(FeedError::InvalidLength {
            account,
            len: data.len(),
            expected,
        });
    }
    if data[..DISCRIMINATOR_LEN] != account_discriminator(account) {
        return Err(FeedError::InvalidDiscriminator(account));
    }
    Ok(())
}

fn le_bytes<const N: usize>(data: &[u8], offset: usize) -> [u8; N] {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&data[offset..offset + N]);
    bytes
}

fn read_pubkey(data: &[u8], offset: usize) -> Pubkey {
    Pubkey::new_from_array(le_bytes(data, offset))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedTickArray {
    pub whirlpool: Pubkey,
    pub tick_array: TickArray,
}

pub fn decode_tick_array(data: &[u8]) -> Result<DecodedTickArray, FeedError> {
    check_account(data, "TickArray", TICK_ARRAY_ACCOUNT_LEN)?;

    let start_tick_index = i32::from_le_bytes(le_bytes(data, TICK_ARRAY_START_OFFSET));
    let ticks: [TickRecord; TICK_ARRAY_SIZE_USIZE] = std::array::from_fn(|slot| {
        let offset = TICK_ARRAY_TICKS_OFFSET + slot * TICK_LEN + TICK_LIQUIDITY_NET_OFFSET;
        TickRecord::new(i128::from_le_bytes(le_bytes(data, offset)))
    });

    Ok(DecodedTickArray {
        whirlpool: read_pubkey(data, TICK_ARRAY_WHIRLPOOL_OFFSET),
        tick_array: TickArray::new(start_tick_index, ticks),
    })
}

/// The whirlpool fields used for a liquidity snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhirlpoolState {
    pub tick_spacing: u16,
    pub liquidity: u128,
    pub sqrt_price: u128,
    pub tick_current_index: i32,
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
}

impl WhirlpoolState {
    pub fn to_snapshot(&self, decimals_a: u8, decimals_b: u8) -> PoolSnapshot {
        PoolSnapshot {
            tick_spacing: self.tick_spacing,
            current_tick_index: self.tick_current_index,
            current_sqrt_price: self.sqrt_price,
            current_liquidity: BigUint::from(self.liquidity),
            decimals_a,
            decimals_b,
        }
    }
}

pub fn decode_whirlpool(data: &[u8]) -> Result<WhirlpoolState, FeedError> {
    check_account(data, "Whirlpool", WHIRLPOOL_ACCOUNT_LEN)?;
    Ok(WhirlpoolState {
        tick_spacing: u16::from_le_bytes(le_bytes(data, WHIRLPOOL_TICK_SPACING_OFFSET)),
        liquidity: u128::from_le_bytes(le_bytes(data, WHIRLPOOL_LIQUIDITY_OFFSET)),
        sqrt_price: u128::from_le_bytes(le_bytes(data, WHIRLPOOL_SQRT_PRICE_OFFSET)),
        tick_current_index: i32::from_le_bytes(le_bytes(
            data,
            WHIRLPOOL_TICK_CURRENT_INDEX_OFFSET,
        )),
        token_mint_a: read_pubkey(data, WHIRLPOOL_TOKEN_MINT_A_OFFSET),
        token_mint_b: read_pubkey(data, WHIRLPOOL_TOKEN_MINT_B_OFFSET),
    })
}

/// Decimals of an spl-token or token-2022 mint, same offset for both.
pub fn decode_mint_decimals(data: &[u8]) -> Result<u8, FeedError> {
    data.get(MINT_DECIMALS_OFFSET)
        .copied()
        .ok_or(FeedError::InvalidLength {
            account: "Mint",
            len: data.len(),
            expected: MINT_DECIMALS_OFFSET + 1,
        })
}

#[cfg(test)]
pub(crate) mod test_accounts {
    use super::*;

    pub fn tick_array_account(whirlpool: &Pubkey, start: i32, nets: &[(usize, i128)]) -> Vec<u8> {
        let mut data = vec![0u8; TICK_ARRAY_ACCOUNT_LEN];
        data[..DISCRIMINATOR_LEN].copy_from_slice(&account_discriminator("TickArray"));
        data[TICK_ARRAY_START_OFFSET..TICK_ARRAY_START_OFFSET + 4]
            .copy_from_slice(&start.to_le_bytes());
        for (slot, net) in nets {
            let tick = TICK_ARRAY_TICKS_OFFSET + slot * TICK_LEN;
            data[tick] = 1;
            data[tick + TICK_LIQUIDITY_NET_OFFSET..tick + TICK_LIQUIDITY_NET_OFFSET + 16]
                .copy_from_slice(&net.to_le_bytes());
        }
        data[TICK_ARRAY_WHIRLPOOL_OFFSET..TICK_ARRAY_WHIRLPOOL_OFFSET + 32]
            .copy_from_slice(whirlpool.as_ref());
        data
    }

    pub fn whirlpool_account(state: &WhirlpoolState) -> Vec<u8> {
        let mut data = vec![0u8; WHIRLPOOL_ACCOUNT_LEN];
        data[..DISCRIMINATOR_LEN].copy_from_slice(&account_discriminator("Whirlpool"));
        let mut put = |offset: usize, bytes: &[u8]| {
            data[offset..offset + bytes.len()].copy_from_slice(bytes)
        };
        put(WHIRLPOOL_TICK_SPACING_OFFSET, &state.tick_spacing.to_le_bytes());
        put(WHIRLPOOL_LIQUIDITY_OFFSET, &state.liquidity.to_le_bytes());
        put(WHIRLPOOL_SQRT_PRICE_OFFSET, &state.sqrt_price.to_le_bytes());
        put(
            WHIRLPOOL_TICK_CURRENT_INDEX_OFFSET,
            &state.tick_current_index.to_le_bytes(),
        );
        put(WHIRLPOOL_TOKEN_MINT_A_OFFSET, state.token_mint_a.as_ref());
        put(WHIRLPOOL_TOKEN_MINT_B_OFFSET, state.token_mint_b.as_ref());
        data
    }

    pub fn mint_account(decimals: u8) -> Vec<u8> {
        let mut data = vec![0u8; 82];
        data[MINT_DECIMALS_OFFSET] = decimals;
        data
    }
}
