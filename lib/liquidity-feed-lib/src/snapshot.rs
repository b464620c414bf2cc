use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use liquidity_lib::{DistributionError, PoolSnapshot, TickArray};
use num_bigint::BigInt;
use serde_derive::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::source::LiquiditySource;

/// Pool metadata and tick arrays of one pool, saved for offline replay.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshotFile {
    #[serde_as(as = "DisplayFromStr")]
    pub pool: Pubkey,
    pub snapshot: PoolSnapshot,
    pub tick_arrays: Vec<TickArrayRecord>,
}

/// Tick array with only its non-empty slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickArrayRecord {
    pub start_tick_index: i32,
    pub ticks: Vec<TickRecordEntry>,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickRecordEntry {
    pub slot: usize,
    #[serde_as(as = "DisplayFromStr")]
    pub liquidity_net: BigInt,
}

impl From<&TickArray> for TickArrayRecord {
    fn from(tick_array: &TickArray) -> Self {
        Self {
            start_tick_index: tick_array.start_tick_index(),
            ticks: tick_array
                .non_empty_slots()
                .map(|(slot, record)| TickRecordEntry {
                    slot,
                    liquidity_net: record.liquidity_net.clone(),
                })
                .collect(),
        }
    }
}

impl TickArrayRecord {
    pub fn to_tick_array(&self) -> Result<TickArray, DistributionError> {
        TickArray::from_sparse(
            self.start_tick_index,
            self.ticks
                .iter()
                .map(|entry| (entry.slot, entry.liquidity_net.clone())),
        )
    }
}

impl PoolSnapshotFile {
    pub fn new(pool: Pubkey, snapshot: PoolSnapshot, tick_arrays: &[TickArray]) -> Self {
        Self {
            pool,
            snapshot,
            tick_arrays: tick_arrays.iter().map(TickArrayRecord::from).collect(),
        }
    }

    /// Read metadata and tick arrays from `source` into a snapshot.
    pub async fn capture(source: &dyn LiquiditySource, pool: &Pubkey) -> anyhow::Result<Self> {
        let snapshot = source.pool_snapshot(pool).await?;
        let tick_arrays = source.tick_arrays(pool).await?;
        Ok(Self::new(*pool, snapshot, &tick_arrays))
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let snapshot = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing snapshot {}", path.display()))?;
        Ok(snapshot)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        info!(
            pool = %self.pool,
            path = %path.display(),
            tick_array_count = self.tick_arrays.len(),
            "saved snapshot"
        );
        Ok(())
    }

    pub fn tick_arrays(&self) -> Result<Vec<TickArray>, DistributionError> {
        self.tick_arrays
            .iter()
            .map(TickArrayRecord::to_tick_array)
            .collect()
    }
}

/// Serves a [`PoolSnapshotFile`] for the pool it was captured from.
pub struct SnapshotFileSource {
    file: PoolSnapshotFile,
}

impl SnapshotFileSource {
    pub fn new(file: PoolSnapshotFile) -> Self {
        Self { file }
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Ok(Self::new(PoolSnapshotFile::load(path)?))
    }

    pub fn pool(&self) -> Pubkey {
        self.file.pool
    }

    fn check_pool(&self, pool: &Pubkey) -> anyhow::Result<()> {
        if *pool != self.file.pool {
            anyhow::bail!("snapshot holds pool {}, not {}", self.file.pool, pool);
        }
        Ok(())
    }
}

#[async_trait]
impl LiquiditySource for SnapshotFileSource {
    async fn pool_snapshot(&self, pool: &Pubkey) -> anyhow::Result<PoolSnapshot> {
        self.check_pool(pool)?;
        Ok(self.file.snapshot.clone())
    }

    async fn tick_arrays(&self, pool: &Pubkey) -> anyhow::Result<Vec<TickArray>> {
        self.check_pool(pool)?;
        Ok(self.file.tick_arrays()?)
    }
}
