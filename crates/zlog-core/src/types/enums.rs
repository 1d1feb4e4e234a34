//! Enumerations used throughout the logging engine.
//!
//! Levels carry no behavior of their own: the priority code shown next to a
//! level is looked up in [`PRIORITY_TABLE`] at render time, so a level string
//! that arrives from outside the enum (e.g. a host passing `"TRACE"`) simply
//! renders without a priority instead of failing.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Log levels
// ---------------------------------------------------------------------------

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// All levels, lowest priority first.
    pub const ALL: [LogLevel; 4] = [Self::Debug, Self::Info, Self::Warning, Self::Error];

    /// The level name as written into log lines (`"DEBUG"`, `"INFO"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    /// Parse a level name. Matching is exact, mirroring what is written out.
    ///
    /// Returns `None` for unknown names; callers treat that as a level
    /// without priority rather than an error.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }

    /// Priority code for this level.
    pub fn priority(&self) -> &'static str {
        // Every variant has a table row, so the fallback is unreachable.
        priority_of(self.as_str()).unwrap_or_default()
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority lookup
// ---------------------------------------------------------------------------

/// Level name → presentation priority code.
///
/// Priority is display-only and never used for filtering.
pub const PRIORITY_TABLE: [(&str, &str); 4] = [
    ("DEBUG", "P10"),
    ("INFO", "P20"),
    ("WARNING", "P30"),
    ("ERROR", "P40"),
];

/// Look up the priority code for a level name. `None` for unknown levels.
#[inline]
pub fn priority_of(level: &str) -> Option<&'static str> {
    PRIORITY_TABLE
        .iter()
        .find(|(name, _)| *name == level)
        .map(|(_, p)| *p)
}

// ---------------------------------------------------------------------------
// Network operations
// ---------------------------------------------------------------------------

/// Direction tag written into the `operation` field of network records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkOperation {
    Request,
    Response,
}

impl NetworkOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response => "response",
        }
    }
}

impl std::fmt::Display for NetworkOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
