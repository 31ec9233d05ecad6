//! Logging initialization and configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "menu_tunnel=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the logging system with an explicit filter directive.
///
/// A bare level such as `debug` is scoped to this crate; anything else is
/// handed to [`EnvFilter`] as-is. Invalid directives fall back to the
/// default filter.
pub fn init_with_filter(
    directive: &str,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(filter_for(directive))
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init() -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

fn filter_for(directive: &str) -> EnvFilter {
    let directive = match directive {
        "error" | "warn" | "info" | "debug" | "trace" => format!("menu_tunnel={}", directive),
        other => other.to_string(),
    };
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_idempotent() {
        // First call may or may not succeed depending on test order
        let _ = try_init();
        let _ = try_init();
    }

    #[test]
    fn test_bare_level_is_scoped() {
        let filter = filter_for("debug");
        assert_eq!(filter.to_string(), "menu_tunnel=debug");
    }

    #[test]
    fn test_full_directive_passes_through() {
        let filter = filter_for("tower_http=trace");
        assert_eq!(filter.to_string(), "tower_http=trace");
    }

    #[test]
    fn test_logging_works() {
        let _ = init_with_filter("trace");

        tracing::info!("test info message");
        tracing::debug!("test debug message");
        tracing::warn!("test warn message");
    }
}
