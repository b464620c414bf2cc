use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use itertools::Itertools;
use liquidity_config_lib::SourceConfig;
use liquidity_lib::{PoolSnapshot, TickArray};
use solana_account_decoder::UiAccountEncoding;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, error};

use crate::account::{
    decode_mint_decimals, decode_tick_array, decode_whirlpool, TICK_ARRAY_ACCOUNT_LEN,
    TICK_ARRAY_WHIRLPOOL_OFFSET,
};
use crate::source::LiquiditySource;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct RpcLiquiditySource {
    pub rpc: RpcClient,
    pub program_id: Pubkey,
}

impl RpcLiquiditySource {
    pub fn new(
        rpc_http_url: String,
        program_id: Pubkey,
        commitment: CommitmentConfig,
        timeout: Duration,
    ) -> Self {
        Self {
            rpc: RpcClient::new_with_timeout_and_commitment(rpc_http_url, timeout, commitment),
            program_id,
        }
    }

    pub fn from_config(config: &SourceConfig) -> anyhow::Result<Self> {
        let program_id = Pubkey::from_str(config.program_id())
            .with_context(|| format!("whirlpool program id {}", config.program_id()))?;
        let Ok(commitment) = CommitmentConfig::from_str(config.commitment()) else {
            anyhow::bail!(
                "commitment should be processed, confirmed or finalized, got {}",
                config.commitment()
            );
        };
        let timeout = config
            .request_timeout_in_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Ok(Self::new(
            config.rpc_http_url.clone(),
            program_id,
            commitment,
            timeout,
        ))
    }
}

/// Decode the tick arrays of `pool`, logging and skipping accounts that do not
/// decode or belong to another whirlpool.
pub fn pool_tick_arrays(accounts: &[(Pubkey, Account)], pool: &Pubkey) -> Vec<TickArray> {
    accounts
        .iter()
        .filter_map(|(pubkey, account)| match decode_tick_array(&account.data) {
            Ok(decoded) if decoded.whirlpool == *pool => Some(decoded.tick_array),
            Ok(decoded) => {
                error!(
                    "tick array {pubkey} belongs to {} instead of {pool}",
                    decoded.whirlpool
                );
                None
            }
            Err(e) => {
                error!("Error deserializing tick array account : {pubkey:?} error: {e:?}");
                None
            }
        })
        .collect_vec()
}

#[async_trait]
impl LiquiditySource for RpcLiquiditySource {
    async fn pool_snapshot(&self, pool: &Pubkey) -> anyhow::Result<PoolSnapshot> {
        let Some(whirlpool_account) = self
            .rpc
            .get_account_with_commitment(pool, self.rpc.commitment())
            .await?
            .value
        else {
            anyhow::bail!("whirlpool {} not found", pool);
        };
        if whirlpool_account.owner != self.program_id {
            anyhow::bail!(
                "account {} is owned by {}, not by whirlpool program {}",
                pool,
                whirlpool_account.owner,
                self.program_id
            );
        }
        let whirlpool = decode_whirlpool(&whirlpool_account.data)
            .with_context(|| format!("decoding whirlpool {}", pool))?;

        let mints = [whirlpool.token_mint_a, whirlpool.token_mint_b];
        let mint_accounts = self.rpc.get_multiple_accounts(&mints).await?;
        let decimals: Vec<u8> = mints
            .iter()
            .zip(mint_accounts)
            .map(|(mint, account)| {
                let account = account.with_context(|| format!("mint {} not found", mint))?;
                decode_mint_decimals(&account.data)
                    .with_context(|| format!("decoding mint {}", mint))
            })
            .collect::<anyhow::Result<_>>()?;

        debug!(
            %pool,
            tick_spacing = whirlpool.tick_spacing,
            tick_current_index = whirlpool.tick_current_index,
            decimals_a = decimals[0],
            decimals_b = decimals[1],
            "loaded whirlpool"
        );

        Ok(whirlpool.to_snapshot(decimals[0], decimals[1]))
    }

    async fn tick_arrays(&self, pool: &Pubkey) -> anyhow::Result<Vec<TickArray>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![
                RpcFilterType::DataSize(TICK_ARRAY_ACCOUNT_LEN as u64),
                RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                    TICK_ARRAY_WHIRLPOOL_OFFSET,
                    pool.as_ref(),
                )),
            ]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.rpc.commitment()),
                ..Default::default()
            },
            ..Default::default()
        };

        let accounts = self
            .rpc
            .get_program_accounts_with_config(&self.program_id, config)
            .await
            .with_context(|| format!("getProgramAccounts for tick arrays of {}", pool))?;

        let tick_arrays = pool_tick_arrays(&accounts, pool);

        debug!(
            %pool,
            fetched = accounts.len(),
            decoded = tick_arrays.len(),
            "loaded tick arrays"
        );
        Ok(tick_arrays)
    }
}
