use crate::config::RelayConfig;
use std::env;
use tracing::debug;
use tracing_subscriber::filter::EnvFilter;

const RUST_LOG: &str = "RUST_LOG";
const HUMAN_LOGGING: &str = "HUMAN_LOGGING";

/// Build the log filter directives. `RUST_LOG` wins over the configured level.
pub fn log_directives(config: &RelayConfig, rust_log: Option<String>) -> String {
    let level = rust_log.unwrap_or_else(|| config.log_level.clone());

    // We manually suppress executor internals unless asked to be verbose.
    if config.verbose {
        level
    } else {
        format!("{level},async_graphql=warn")
    }
}

/// Install the global `tracing` subscriber.
pub fn init_logging(config: &RelayConfig) -> anyhow::Result<()> {
    let rust_log = env::var_os(RUST_LOG).and_then(|x| x.into_string().ok());
    let filter = EnvFilter::try_new(log_directives(config, rust_log))?;

    let human_logging = env::var_os(HUMAN_LOGGING)
        .map(|s| s.to_string_lossy().parse::<bool>())
        .transpose()?
        .unwrap_or(true);

    let sub = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    if human_logging {
        sub.with_ansi(true)
            .with_level(true)
            .with_line_number(true)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
    } else {
        sub.with_ansi(false)
            .with_level(true)
            .with_line_number(true)
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
    }

    debug!("Logging initialised.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directives_prefer_rust_log() {
        let config = RelayConfig::default();

        assert_eq!(log_directives(&config, None), "info,async_graphql=warn");
        assert_eq!(
            log_directives(&config, Some("debug".to_string())),
            "debug,async_graphql=warn"
        );
    }

    #[test]
    fn test_verbose_logging_keeps_executor_logs() {
        let config = RelayConfig {
            verbose: true,
            log_level: "trace".to_string(),
            ..Default::default()
        };

        assert_eq!(log_directives(&config, None), "trace");
    }
}
