//! `tracing` subscriber setup.

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::config::LoggingConfig;

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync + 'static>;

/// Build the filter: `RUST_LOG` wins, else `strategy_engine=<level>`.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("strategy_engine={}", config.level)))
}

/// Build the subscriber without installing it.
///
/// Emits JSON lines when `format` is `json`, human-readable output otherwise.
fn build_subscriber(config: &LoggingConfig) -> BoxedSubscriber {
    let filter = env_filter(config);

    if config.format == "json" {
        Box::new(
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_current_span(config.include_spans)
                .with_span_list(config.include_spans)
                .with_writer(std::io::stderr)
                .finish(),
        )
    } else {
        let span_events = if config.include_spans {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        Box::new(
            tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_span_events(span_events)
                .with_writer(std::io::stderr)
                .finish(),
        )
    }
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
    build_subscriber(config).try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(format: &str, include_spans: bool) -> LoggingConfig {
        LoggingConfig {
            level: "debug".to_string(),
            format: format.to_string(),
            include_spans,
        }
    }

    #[test]
    fn test_env_filter_from_level() {
        // Constructing the filter must not panic for a plain level
        let _ = env_filter(&logging("pretty", false));
    }

    #[test]
    fn test_pretty_subscriber_scoped() {
        let subscriber = build_subscriber(&logging("pretty", true));
        let events = tracing::subscriber::with_default(subscriber, || {
            let span = tracing::debug_span!("scoped", symbol = "TEST");
            let _guard = span.enter();
            tracing::debug!("inside scoped subscriber");
            1
        });
        assert_eq!(events, 1);
    }

    #[test]
    fn test_json_subscriber_scoped() {
        let subscriber = build_subscriber(&logging("json", false));
        let events = tracing::subscriber::with_default(subscriber, || {
            tracing::info!(symbol = "TEST", "inside scoped subscriber");
            1
        });
        assert_eq!(events, 1);
    }
}
