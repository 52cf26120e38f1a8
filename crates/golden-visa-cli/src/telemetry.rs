use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid --log-level '{value}': unable to build filter")]
    LogLevel {
        value: String,
        #[source]
        source: ParseError,
    },

    #[error("logging setup failed: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Filter from `RUST_LOG` when set and valid, otherwise from `--log-level`.
fn build_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(log_level).map_err(|source| TelemetryError::LogLevel {
            value: log_level.to_string(),
            source,
        })
    })
}

/// Send calculator diagnostics to stderr; stdout carries only command output.
pub fn init(log_level: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(log_level)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_log_level_names_the_value() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let err = build_filter("gvc=loud").unwrap_err();
        assert!(matches!(err, TelemetryError::LogLevel { .. }));
        assert!(err.to_string().contains("gvc=loud"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_plain_level_builds() {
        assert!(build_filter("warn").is_ok());
    }
}
