//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`; stdout is left to the CLI's
//! own progress output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for debug builds
const DEV_FILTER: &str = "info,layergen=debug";

/// Default filter for release builds
const RELEASE_FILTER: &str = "warn";

/// Initialize the logging stack
///
/// Honors `RUST_LOG` when set, otherwise falls back to a build-profile
/// default.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
///
/// # Example
///
/// ```rust,no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// layergen::observability::init()?;
/// tracing::info!("generator started");
/// # Ok(())
/// # }
/// ```
pub fn init() -> Result<(), tracing_subscriber::util::TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
}

/// Filter directive used when `RUST_LOG` is not set
#[must_use]
pub const fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        DEV_FILTER
    } else {
        RELEASE_FILTER
    }
}
