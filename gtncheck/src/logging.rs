//! Diagnostic tracing for gtncheck.
//!
//! Each dataset runs inside a `run_dataset_checks` span and a nested
//! `load_dataset` span, both carrying a `dataset` field with the folder
//! path. Checks emit `debug` events with their counts, a missing employee id
//! column is a `warn`, and every finished dataset logs one `info` line
//! (`dataset validated`) with its outcome.
//!
//! Traces go to stderr only. The report on stdout never depends on the level.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directive used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber. `RUST_LOG=gtncheck=debug` shows per-check
/// events; `info` shows one line per dataset.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact().with_target(false))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
        assert!(EnvFilter::try_new("gtncheck=debug").is_ok());
    }
}
