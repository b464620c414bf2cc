pub mod account;
pub mod rpc_source;
pub mod snapshot;
pub mod source;

pub use rpc_source::RpcLiquiditySource;
pub use snapshot::{PoolSnapshotFile, SnapshotFileSource};
pub use source::{fetch_liquidity_distribution, LiquiditySource};
