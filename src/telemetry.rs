//! Tracing setup for decode runs.
//!
//! A decode pass logs one `debug!` event when the date source is chosen, one
//! per decoded series and one when the pass completes. Every degraded field
//! is also logged as a `warn!` carrying the diagnostic text, so a host that
//! only keeps warnings still sees why a result is partial. Date strings left
//! unsorted are reported at `trace!`.

/// Filter used when `RUST_LOG` is unset: per-series events from this crate,
/// warnings from everything else.
pub const DEFAULT_DECODE_FILTER: &str = "warn,chart_decode=debug";

/// Installs a compact stderr subscriber for decode runs when the `telemetry`
/// feature is enabled.
///
/// Stdout is left alone because the CLI writes the decoded JSON there.
/// Returns `false` when the feature is disabled or the host already set a
/// global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_DECODE_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
