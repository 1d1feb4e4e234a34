//! # zlog-core
//!
//! Structured, date-partitioned file logging per logical module:
//!
//! - **Types** (`types`) — levels and priorities, module ids, records, network value objects
//! - **Configuration** (`config`) — `LogConfig` defaults and the runner's JSON config file
//! - **Error types** (`error`) — `ZlogError` via thiserror
//! - **Clock** (`clock`) — zone-aware time source with a fixed override for tests
//! - **Paths** (`path`) — `<log_path>/<module>-<YYYY-MM-DD>.log` derivation
//! - **Rendering** (`render`) — JSON and text line renderers
//! - **Logger** (`logger`) — build → render → append pipeline
//! - **Network** (`network`) — request/response logging convention
//! - **Registry** (`registry`) — one logger per module
//! - **Diagnostics** (`logging`) — tracing setup for the engine's own output
//!
//! ```no_run
//! use zlog_core::{Fields, LogConfig, LoggerRegistry};
//!
//! # fn main() -> zlog_core::Result<()> {
//! let config = LogConfig::for_module("AUTH")?.with_json_format(false);
//! let logger = LoggerRegistry::global().get_or_create(config)?;
//! logger.info(
//!     "Login successful",
//!     None,
//!     Fields::new().with("user_id", "user_123"),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod logger;
pub mod logging;
pub mod network;
pub mod path;
pub mod registry;
pub mod render;
pub mod types;

pub use config::LogConfig;
pub use error::{Result, ZlogError};
pub use logger::Logger;
pub use registry::LoggerRegistry;
// Re-export types at crate root for convenience.
pub use types::*;
