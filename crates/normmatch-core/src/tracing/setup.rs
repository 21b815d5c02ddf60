//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the tracing/logging system.
///
/// Reads the `NORMMATCH_LOG` environment variable for per-target log levels.
/// Format: `NORMMATCH_LOG=normmatch_matcher=debug,normmatch_core=warn`
///
/// Falls back to `normmatch=info` if `NORMMATCH_LOG` is unset or invalid.
/// Idempotent: later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("NORMMATCH_LOG")
            .unwrap_or_else(|_| EnvFilter::new("normmatch=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
