//! # zlog-http
//!
//! HTTP boundary for zlog: an axum middleware that records a
//! `network_request` line before each request is handled and a
//! `network_response` line after it completes, on a bound module logger.
//!
//! ```no_run
//! use axum::{Router, routing::get};
//! use zlog_core::{LogConfig, LoggerRegistry};
//!
//! # fn main() -> zlog_core::Result<()> {
//! let config = LogConfig::for_module("PAYMENT")?;
//! let logger = LoggerRegistry::global().get_or_create(config)?;
//! let routes = Router::new().route("/health", get(|| async { "ok" }));
//! let app: Router = zlog_http::attach(routes, logger);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod middleware;

pub use middleware::{attach, client_ip, log_network};
