//! Log file path derivation.
//!
//! Rotation is by file name only: each calendar day (in the instant's own
//! offset) gets its own file, and nothing is ever renamed or rolled over.
//!
//! ```text
//! <log_path>/<lowercase-module>-<YYYY-MM-DD>.log
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::types::ModuleId;

/// File extension of every log file.
pub const LOG_EXTENSION: &str = "log";

/// File name for `module` on the day of `at`.
pub fn file_name<Z: TimeZone>(module: &ModuleId, at: &DateTime<Z>) -> String
where
    Z::Offset: std::fmt::Display,
{
    format!(
        "{}-{}.{LOG_EXTENSION}",
        module.file_stem(),
        at.format("%Y-%m-%d")
    )
}

/// Full path of the file `module` appends to at instant `at`.
pub fn resolve<Z: TimeZone>(log_path: &Path, module: &ModuleId, at: &DateTime<Z>) -> PathBuf
where
    Z::Offset: std::fmt::Display,
{
    log_path.join(file_name(module, at))
}
