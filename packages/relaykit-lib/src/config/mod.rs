pub mod graphql;

pub use crate::{config::graphql::GraphQLConfig, defaults};
pub use clap::Parser;
use std::{fs::File, io::Error, path::Path, path::PathBuf};
use thiserror::Error;

/// Error type returned by configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error processing file: {0:?}")]
    ConfigFileError(#[from] Error),
    #[error("Error processing YAML file: {0:?}")]
    SerdeYamlError(#[from] serde_yaml::Error),
    #[error("Invalid value for config key {0:?}")]
    InvalidValue(String),
}

/// Result type returned by configuration operations.
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "relaykit",
    about = "Relay-style pagination and relation fetchers for GraphQL.",
    version
)]
pub struct RelayArgs {
    /// Log level.
    #[clap(long, default_value = defaults::LOG_LEVEL, value_parser(["info", "debug", "error", "warn", "trace"]), help = "Log level.")]
    pub log_level: String,

    /// Config file.
    #[clap(short, long, value_name = "FILE", help = "Config file.")]
    pub config: Option<PathBuf>,

    /// Page size used when `first` is not supplied.
    #[clap(long, help = "Page size used when `first` is not supplied.", default_value_t = defaults::DEFAULT_PAGE_SIZE)]
    pub default_page_size: usize,

    /// Upper bound for the `first` argument.
    #[clap(long, help = "Upper bound for the `first` argument.", default_value_t = defaults::MAX_PAGE_SIZE)]
    pub max_page_size: usize,

    /// Reject introspection queries.
    #[clap(long, help = "Reject introspection queries.")]
    pub disable_introspection: bool,

    /// Enable verbose logging.
    #[clap(short, long, help = "Enable verbose logging.")]
    pub verbose: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayConfig {
    pub log_level: String,
    pub verbose: bool,
    pub graphql: GraphQLConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::LOG_LEVEL.to_string(),
            verbose: defaults::VERBOSE_LOGGING,
            graphql: GraphQLConfig::default(),
        }
    }
}

impl From<RelayArgs> for RelayConfig {
    fn from(args: RelayArgs) -> Self {
        RelayConfig {
            log_level: args.log_level,
            verbose: args.verbose,
            graphql: GraphQLConfig {
                default_page_size: args.default_page_size,
                max_page_size: args.max_page_size,
                introspection: !args.disable_introspection,
            },
        }
    }
}

impl RelayConfig {
    // Any key missing from the file keeps its default value.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let file = File::open(path)?;

        let mut config = RelayConfig::default();

        let content: serde_yaml::Value = serde_yaml::from_reader(file)?;

        if let Some(log_level) = content.get("log_level") {
            config.log_level = log_level
                .as_str()
                .ok_or_else(|| ConfigError::InvalidValue("log_level".into()))?
                .to_string();
        }

        if let Some(verbose) = content.get("verbose") {
            config.verbose = verbose
                .as_bool()
                .ok_or_else(|| ConfigError::InvalidValue("verbose".into()))?;
        }

        if let Some(section) = content.get("graphql") {
            config.graphql = serde_yaml::from_value(section.clone())?;
        }

        Ok(config)
    }
}
