//! Tracing subscriber setup for the server binary.

use tg_shared::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to every
/// target.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match config.format {
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
        LogFormat::Pretty => builder.pretty().with_ansi(config.colored).try_init(),
        LogFormat::Compact => builder.compact().with_ansi(config.colored).try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}
