//! Module identifiers.
//!
//! A module names the subsystem a log line belongs to. It keys the logger
//! registry and, lowercased, becomes the prefix of the log file name, so it
//! must stay filename-safe.

use serde::{Deserialize, Serialize};

use crate::error::ZlogError;

/// Well-known module names. The runner binds its HTTP middleware to
/// [`PAYMENT`](well_known::PAYMENT) unless its config names another module.
pub mod well_known {
    pub const AUTH: &str = "AUTH";
    pub const DATABASE: &str = "DATABASE";
    pub const CACHE: &str = "CACHE";
    pub const NETWORK: &str = "NETWORK";
    pub const PAYMENT: &str = "PAYMENT";
    pub const REGISTRATION: &str = "REGISTRATION";
    pub const SECURITY: &str = "SECURITY";
}

/// A validated module label, e.g. `"PAYMENT"`.
///
/// Equality is on the label as given: `"auth"` and `"AUTH"` are distinct
/// modules even though they share a file stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleId(String);

impl ModuleId {
    /// Validate and wrap a module label.
    ///
    /// The lowercase form may only contain ASCII alphanumerics, `_`, `-`
    /// and `.`, and must not be empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ZlogError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ZlogError::Config("module name must not be empty".into()));
        }
        let safe = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.');
        if let Some(c) = name.chars().find(|c| !safe(*c)) {
            return Err(ZlogError::Config(format!(
                "module name {name:?} contains {c:?}, which is not filename-safe"
            )));
        }
        if name.chars().all(|c| c == '.') {
            return Err(ZlogError::Config(format!(
                "module name {name:?} is not a valid file stem"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form used as the log file prefix.
    pub fn file_stem(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ModuleId {
    type Error = ZlogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ModuleId {
    type Error = ZlogError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModuleId> for String {
    fn from(value: ModuleId) -> Self {
        value.0
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
