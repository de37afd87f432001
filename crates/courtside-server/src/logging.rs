// Tracing setup shared by the server and the export tool.

use anyhow::Context;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Used when neither `RUST_LOG` nor the config file sets a filter.
pub const DEFAULT_FILTER: &str = concat!(
    "courtside=info,courtside_export=info,",
    "courtside_server=info,courtside_core=info,courtside_charts=info,",
    "warn",
);

/// Pick the filter: `RUST_LOG` first, then `configured`, then [`DEFAULT_FILTER`].
pub fn env_filter(configured: Option<&str>) -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    match configured {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid logging filter `{directives}`")),
        None => Ok(EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Install a stderr subscriber as the global default.
pub fn init_tracing(configured: Option<&str>) -> anyhow::Result<()> {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter(configured)?)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
