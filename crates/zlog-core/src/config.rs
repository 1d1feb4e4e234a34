//! Configuration for module loggers and the bundled runner.
//!
//! A [`LogConfig`] is all a [`Logger`](crate::logger::Logger) needs. Hosts
//! usually build one in code; the runner reads a list of them from a JSON
//! file together with diagnostics and HTTP settings.
//!
//! # Example config
//!
//! ```json
//! {
//!   "diagnostics": { "level": "info", "log_dir": "/tmp/zlog-diag" },
//!   "modules": [
//!     { "module": "PAYMENT", "log_path": "logs", "json_format": true },
//!     { "module": "AUTH", "log_path": "logs/auth", "json_format": false, "time_zone": "UTC" }
//!   ],
//!   "http": { "bind": "127.0.0.1:8080", "module": "PAYMENT" }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    error::{Result, ZlogError},
    types::{ModuleId, well_known},
};

/// Time zone used when none is configured.
pub const DEFAULT_TIME_ZONE: &str = "Asia/Riyadh";

/// Log directory used when none is configured.
pub const DEFAULT_LOG_PATH: &str = "logs";

// ---------------------------------------------------------------------------
// LogConfig
// ---------------------------------------------------------------------------

/// Settings for one module logger. Frozen once a logger is built from it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogConfig {
    pub module: ModuleId,

    /// IANA zone name used for timestamps and file dates.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// One JSON object per line when `true`, bracketed text otherwise.
    #[serde(default = "default_json_format")]
    pub json_format: bool,

    /// Directory holding the module's log files.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

fn default_json_format() -> bool {
    true
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_PATH)
}

impl LogConfig {
    /// Config for `module` with all defaults.
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            time_zone: default_time_zone(),
            json_format: default_json_format(),
            log_path: default_log_path(),
        }
    }

    /// Shorthand for validating a module name and calling [`LogConfig::new`].
    pub fn for_module(module: &str) -> Result<Self> {
        Ok(Self::new(ModuleId::new(module)?))
    }

    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = time_zone.into();
        self
    }

    pub fn with_json_format(mut self, json_format: bool) -> Self {
        self.json_format = json_format;
        self
    }

    pub fn with_log_path(mut self, log_path: impl Into<PathBuf>) -> Self {
        self.log_path = log_path.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Runner config file
// ---------------------------------------------------------------------------

/// Top-level runner config, deserialized from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Settings for the engine's own tracing output.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,

    /// One entry per module logger to register at startup.
    pub modules: Vec<LogConfig>,

    /// Demo HTTP service settings.
    pub http: Option<HttpConfig>,
}

/// Diagnostics block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagnosticsConfig {
    /// Default filter when `RUST_LOG` is unset (e.g. `"info"`).
    pub level: Option<String>,
    /// Directory for daily-rotating diagnostics files.
    pub log_dir: Option<String>,
}

/// HTTP block.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Listen address, e.g. `"127.0.0.1:8080"`.
    pub bind: Option<String>,
    /// Module whose logger records request/response pairs.
    pub module: Option<ModuleId>,
}

impl HttpConfig {
    /// The configured module, or [`well_known::PAYMENT`] when unset.
    pub fn effective_module(&self) -> Result<ModuleId> {
        match &self.module {
            Some(module) => Ok(module.clone()),
            None => ModuleId::new(well_known::PAYMENT),
        }
    }
}

impl AppConfig {
    /// Looks up the configured logger settings for `module`.
    pub fn module(&self, module: &ModuleId) -> Option<&LogConfig> {
        self.modules.iter().find(|m| &m.module == module)
    }

    /// Logger settings for `module`: the configured entry, else defaults.
    pub fn module_or_default(&self, module: &ModuleId) -> LogConfig {
        self.module(module)
            .cloned()
            .unwrap_or_else(|| LogConfig::new(module.clone()))
    }
}

/// Parse a JSON config document.
pub fn parse_config(content: &str) -> Result<AppConfig> {
    Ok(serde_json::from_str(content)?)
}

/// Load and parse a JSON config file.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ZlogError::io(path, e))?;
    parse_config(&content)
}
