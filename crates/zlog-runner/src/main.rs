//! # zlog-runner
//!
//! Demo host for the zlog engine.
//!
//! Loads a JSON configuration file, registers one logger per configured
//! module, and, when an `http` section is present, serves a small payment API
//! whose requests and responses are recorded by the logging middleware.
//!
//! # Usage
//!
//! ```bash
//! zlog-runner config.json --log-level info --bind 127.0.0.1:8080
//! ```

mod routes;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use zlog_core::{Fields, LoggerRegistry};

const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Structured module logging demo runner.
#[derive(Parser)]
#[command(name = "zlog-runner", about = "Structured module logging demo runner")]
struct Cli {
    /// Configuration file path (JSON).
    config: PathBuf,

    /// Diagnostics level (trace, debug, info, warn, error). Overrides the config file.
    #[arg(short, long)]
    log_level: Option<String>,

    /// Optional directory for diagnostics files. Overrides the config file.
    #[arg(long)]
    log_dir: Option<String>,

    /// HTTP listen address. Overrides the config file.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration
    let mut config = zlog_core::config::load_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if cli.log_dir.is_some() {
        config.diagnostics.log_dir = cli.log_dir.clone();
    }

    // 2. Initialize diagnostics
    zlog_core::logging::init_from_config(
        &config.diagnostics,
        cli.log_level.as_deref(),
        "zlog-runner",
    );
    info!(
        "zlog-runner starting — config={}, {} module(s)",
        cli.config.display(),
        config.modules.len()
    );

    // 3. Register module loggers
    let registry = LoggerRegistry::global();
    for (idx, module_config) in config.modules.iter().enumerate() {
        let module = module_config.module.clone();
        match registry.get_or_create(module_config.clone()) {
            Ok(logger) => {
                info!(
                    "modules[{idx}]: '{module}' → {}",
                    logger.file_path().display()
                );
                let fields = Fields::new().with("pid", std::process::id());
                if let Err(e) = logger.info("runner started", None, fields) {
                    error!("modules[{idx}]: '{module}' is not writable: {e}");
                }
            }
            Err(e) => {
                error!("modules[{idx}]: failed to create logger for '{module}': {e}");
            }
        }
    }

    // 4. Serve the demo API, if configured
    let Some(http) = config.http.as_ref() else {
        info!("no http section — all loggers registered, exiting");
        return Ok(());
    };
    let http_module = http.effective_module()?;
    // Unconfigured http modules get a default logger.
    let logger = registry
        .get_or_create(config.module_or_default(&http_module))
        .with_context(|| format!("http module '{http_module}' has no usable logger"))?;

    let bind = cli
        .bind
        .or_else(|| http.bind.clone())
        .unwrap_or_else(|| DEFAULT_BIND.to_string());
    let state = routes::AppState {
        logger: Arc::clone(&logger),
    };
    let app = zlog_http::attach(routes::router(state), logger);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    info!("payment API listening on http://{bind} — press Ctrl+C to stop");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("failed to listen for shutdown signal: {e}");
            }
        })
        .await?;

    info!("shutdown complete");
    Ok(())
}
