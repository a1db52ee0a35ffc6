//! Logger setup built on `tracing-subscriber`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence when set. Otherwise the binary's own crates
/// (and `tower_http`) log at `default_level` and everything else at `warn`.
///
/// Calling this more than once is harmless: later calls are ignored.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(bin_name, default_level)));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .try_init();

    if result.is_err() {
        tracing::debug!("Global subscriber already set; skipping logger setup");
    }
}

/// Build the default filter directives for a binary.
///
/// Binary names use hyphens while tracing targets use the crate path, so
/// `hiroba-server` becomes `hiroba_server`.
fn default_directives(bin_name: &str, default_level: &str) -> String {
    let target = bin_name.replace('-', "_");
    format!("warn,{target}={default_level},hiroba_shared={default_level},tower_http={default_level}")
}
