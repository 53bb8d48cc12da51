//! Tracing subscriber setup.

use flare_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber filtered by `config.filter`.
///
/// Calling this again after a subscriber is installed is a no-op.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = env_filter(config)?;

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

/// Filter for `config`. An empty filter falls back to `RUST_LOG`, then to
/// `info`.
fn env_filter(config: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    if config.filter.trim().is_empty() {
        return Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));
    }
    Ok(EnvFilter::try_new(&config.filter)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_filter() {
        let config = LoggingConfig {
            filter: "warn,flare_anim=debug".to_string(),
        };
        assert!(env_filter(&config).is_ok());
    }

    #[test]
    fn test_empty_filter_falls_back() {
        let config = LoggingConfig {
            filter: "  ".to_string(),
        };
        assert!(env_filter(&config).is_ok());
    }

    #[test]
    fn test_filter_scoped_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter(&LoggingConfig::default()).unwrap())
            .with_test_writer()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("scoped to this test");
        });
    }
}
