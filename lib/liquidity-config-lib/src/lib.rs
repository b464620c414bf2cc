use std::{env, fs::File, io::Read};

use serde::{de::Error, Deserialize, Deserializer};

pub const WHIRLPOOL_PROGRAM_ID: &str = "whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc";

#[derive(Clone, Debug, Default, serde_derive::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn load(path: &String) -> Result<Config, anyhow::Error> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        match toml::from_str(&contents) {
            Ok(c) => Ok(c),
            Err(e) => Err(anyhow::Error::new(e)),
        }
    }
}

#[derive(Clone, Debug, Default, serde_derive::Deserialize)]
pub struct SourceConfig {
    #[serde(deserialize_with = "serde_string_or_env")]
    pub rpc_http_url: String,
    /// Whirlpool program owning the pools, mainnet program when unset
    pub program_id: Option<String>,
    /// processed, confirmed or finalized; confirmed when unset
    pub commitment: Option<String>,
    pub request_timeout_in_seconds: Option<u64>,
}

impl SourceConfig {
    pub fn program_id(&self) -> &str {
        self.program_id.as_deref().unwrap_or(WHIRLPOOL_PROGRAM_ID)
    }

    pub fn commitment(&self) -> &str {
        self.commitment.as_deref().unwrap_or("confirmed")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde_derive::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Clone, Debug, Default, serde_derive::Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    /// Validate tick array alignment before sweeping
    pub strict: Option<bool>,
    /// Significant digits of printed prices
    pub precision: Option<u64>,
}

/// Get a string content, or the content of an Env variable it the string start with $
///
/// Example:
///  - "abc" -> "abc"
///  - "$something" -> read env variable named something and return it's content
pub fn serde_string_or_env<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value_or_env = String::deserialize(deserializer)?;
    string_or_env(value_or_env).map_err(D::Error::custom)
}

pub fn string_or_env(value_or_env: String) -> anyhow::Result<String> {
    match value_or_env.strip_prefix('$') {
        Some(name) => {
            env::var(name).map_err(|_| anyhow::format_err!("reading `{}` from env", name))
        }
        None => Ok(value_or_env),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
            [source]
            rpc_http_url = "http://localhost:8899"
            commitment = "finalized"
            request_timeout_in_seconds = 30

            [output]
            format = "json"
            strict = true
            precision = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.source.rpc_http_url, "http://localhost:8899");
        assert_eq!(config.source.program_id(), WHIRLPOOL_PROGRAM_ID);
        assert_eq!(config.source.commitment(), "finalized");
        assert_eq!(config.source.request_timeout_in_seconds, Some(30));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(config.output.strict, Some(true));
        assert_eq!(config.output.precision, Some(20));
    }

    #[test]
    fn output_section_is_optional() {
        let config: Config = toml::from_str(
            r#"
            [source]
            rpc_http_url = "http://localhost:8899"
            "#,
        )
        .unwrap();
        assert_eq!(config.source.commitment(), "confirmed");
        assert!(config.output.format.is_none());
    }

    #[test]
    fn source_section_is_optional() {
        let config: Config = toml::from_str(
            r#"
            [output]
            format = "table"
            "#,
        )
        .unwrap();
        assert!(config.source.rpc_http_url.is_empty());
        assert_eq!(config.output.format, Some(OutputFormat::Table));
    }

    #[test]
    fn reads_rpc_url_from_env() {
        env::set_var("LIQUIDITY_CONFIG_TEST_RPC", "http://rpc.example");
        let config: Config = toml::from_str(
            r#"
            [source]
            rpc_http_url = "$LIQUIDITY_CONFIG_TEST_RPC"
            "#,
        )
        .unwrap();
        assert_eq!(config.source.rpc_http_url, "http://rpc.example");
    }

    #[test]
    fn missing_env_is_an_error() {
        assert!(string_or_env("$LIQUIDITY_CONFIG_TEST_UNSET".to_string()).is_err());
        assert_eq!(string_or_env("plain".to_string()).unwrap(), "plain");
    }
}
