use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[clap()]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct Rpc {
    /// TOML config file, see liquidity-config-lib
    #[clap(short, long)]
    pub config: Option<String>,

    /// RPC url, overrides the config file; "$NAME" reads it from env
    #[clap(short, long)]
    pub url: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct Output {
    #[clap(short, long, value_enum)]
    pub format: Option<Format>,

    /// Reject misaligned, out of range or overlapping tick arrays
    #[clap(long)]
    pub strict: bool,

    /// Significant digits of prices, from 6 to 80
    #[clap(long)]
    pub precision: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct Distribution {
    #[clap(short, long)]
    pub pool: String,

    #[clap(flatten)]
    pub rpc: Rpc,

    #[clap(flatten)]
    pub output: Output,
}

#[derive(Args, Debug, Clone)]
pub struct Snapshot {
    #[clap(short, long)]
    pub pool: String,

    #[clap(flatten)]
    pub rpc: Rpc,

    #[clap(short, long)]
    pub out: String,
}

#[derive(Args, Debug, Clone)]
pub struct Replay {
    #[clap(short, long)]
    pub snapshot: String,

    /// TOML config file, only its [output] section is used
    #[clap(short, long)]
    pub config: Option<String>,

    #[clap(flatten)]
    pub output: Output,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch a pool over RPC and print its liquidity distribution
    Distribution(Distribution),
    /// Fetch a pool over RPC and save it for replay
    Snapshot(Snapshot),
    /// Print the liquidity distribution of a saved snapshot
    Replay(Replay),
}
