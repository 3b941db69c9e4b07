use color_eyre::Result;
use std::path::Path;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Sends tracing output to `path`. The terminal belongs to the UI, so logs
/// never go to stdout or stderr.
///
/// Filtered by RUST_LOG, INFO when unset. For example
/// `RUST_LOG=lazyweather::store=debug` shows superseded loads.
pub fn init(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(true)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
