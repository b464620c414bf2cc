use liquidity_config_lib::{string_or_env, Config, OutputConfig, OutputFormat};
use liquidity_feed_lib::RpcLiquiditySource;
use liquidity_lib::price_math::PRICE_PRECISION;

use crate::cli_args::{Format, Output, Rpc};

pub fn tracing_subscriber_init() {
    let format = tracing_subscriber::fmt::format().with_ansi(atty::is(atty::Stream::Stdout));

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .event_format(format)
        .init();
}

pub fn load_config(path: &Option<String>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

pub fn rpc_source(rpc: &Rpc, config: &Config) -> anyhow::Result<RpcLiquiditySource> {
    let mut source = config.source.clone();
    if let Some(url) = &rpc.url {
        source.rpc_http_url = string_or_env(url.clone())?;
    }
    if source.rpc_http_url.is_empty() {
        anyhow::bail!("no rpc url, pass --url or a config file with [source] rpc_http_url");
    }
    RpcLiquiditySource::from_config(&source)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub strict: bool,
    pub precision: u64,
}

/// Command line flags win over the config file.
pub fn output_settings(args: &Output, config: &OutputConfig) -> OutputSettings {
    let format = match args.format {
        Some(Format::Json) => OutputFormat::Json,
        Some(Format::Table) => OutputFormat::Table,
        None => config.format.unwrap_or_default(),
    };
    OutputSettings {
        format,
        strict: args.strict || config.strict.unwrap_or(false),
        precision: args
            .precision
            .or(config.precision)
            .unwrap_or(PRICE_PRECISION),
    }
}
