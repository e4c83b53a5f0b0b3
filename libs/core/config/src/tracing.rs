use crate::Environment;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre hooks for readable error reports.
///
/// Call this early in main(), before any fallible operations. Safe to call
/// more than once (later calls are ignored), which matters in tests.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize tracing with environment-aware output.
///
/// - Production (`APP_ENV=production`): JSON format for log aggregation,
///   default filter `info`.
/// - Development: pretty human-readable format with targets, default
///   filter `debug`.
///
/// `RUST_LOG` overrides the default filter in both modes. Safe to call more
/// than once; subsequent calls are no-ops (common in tests).
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("debug")
        }
    });

    // ErrorLayer is constructed per branch: its type parameter follows the
    // subscriber it is stacked on, which differs between json and pretty.
    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .with(tracing_error::ErrorLayer::default())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_target(true))
            .with(tracing_error::ErrorLayer::default())
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!(environment = ?environment, "Tracing initialized");
    }
}
