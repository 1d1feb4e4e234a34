//! Diagnostics output for the engine itself.
//!
//! Module log files are written by [`Logger`](crate::logger::Logger); this is
//! the separate `tracing` channel the registry, loggers and HTTP adapter use
//! to report what they are doing (logger creation, superseded configs,
//! failed appends in middleware). Library code only emits events; binaries
//! decide whether and where to print them by calling [`init_diagnostics`].
//!
//! - console output, human-readable
//! - optional daily-rotating file via `tracing-appender`
//! - level from `RUST_LOG`, else the explicit default

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::DiagnosticsConfig;

/// Default filter when neither `RUST_LOG` nor a configured level is set.
pub const DEFAULT_DIAGNOSTICS_LEVEL: &str = "info";

/// Install the global tracing subscriber.
///
/// Call once at program start. Returns `false` if a subscriber was already
/// installed (e.g. by a test harness), in which case nothing changes.
///
/// # Parameters
///
/// - `level`: default filter if `RUST_LOG` is unset (e.g. `"info"`)
/// - `log_dir`: optional directory for daily-rotating diagnostics files
/// - `file_prefix`: diagnostics file prefix (e.g. `"zlog-runner"`)
pub fn init_diagnostics(level: &str, log_dir: Option<&str>, file_prefix: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_ansi(true);

    // A `None` layer adds no file output.
    let file_layer = log_dir.map(|dir| {
        fmt::layer()
            .with_writer(tracing_appender::rolling::daily(dir, file_prefix))
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
}

/// [`init_diagnostics`] driven by a config block. An explicit `level_override`
/// (e.g. from the command line) beats the configured level.
pub fn init_from_config(
    config: &DiagnosticsConfig,
    level_override: Option<&str>,
    file_prefix: &str,
) -> bool {
    init_diagnostics(
        effective_level(config, level_override),
        config.log_dir.as_deref(),
        file_prefix,
    )
}

/// Filter used when `RUST_LOG` is unset: the override, then the configured
/// level, then [`DEFAULT_DIAGNOSTICS_LEVEL`].
pub fn effective_level<'a>(
    config: &'a DiagnosticsConfig,
    level_override: Option<&'a str>,
) -> &'a str {
    level_override
        .or(config.level.as_deref())
        .unwrap_or(DEFAULT_DIAGNOSTICS_LEVEL)
}
