//! Tracing setup.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global subscriber.
///
/// An explicit `level` wins over the `RUST_LOG` environment variable; with
/// neither present the supervisor logs at `info`.
pub fn init(level: Option<&str>) -> Result<()> {
    let env_filter = if let Some(level) = level {
        EnvFilter::try_new(level)?
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();

    Ok(())
}
