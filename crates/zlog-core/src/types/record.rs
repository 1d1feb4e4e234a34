//! The structured payload of a single log line.

use serde::Serialize;
use serde_json::{Map, Value};

use super::enums::priority_of;

/// Keys owned by the record itself. Caller-supplied fields never replace
/// the `level` written by the emit call.
pub const RESERVED_LEVEL_KEY: &str = "level";

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Insertion-ordered extra fields attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fields(Map<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Add a field, consuming and returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a field from any `Serialize` value.
    ///
    /// A value that fails to serialize is stored as its `Debug` rendering so
    /// the rest of the record still makes it to disk.
    pub fn with_serialized<T>(mut self, key: impl Into<String>, value: &T) -> Self
    where
        T: Serialize + std::fmt::Debug,
    {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|_| Value::String(format!("{value:?}")));
        self.0.insert(key.into(), value);
        self
    }

    /// Insert or replace a field in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|(k, v)| (k.into(), v.into()));
        Self(entries.collect())
    }
}

// ---------------------------------------------------------------------------
// LogRecord
// ---------------------------------------------------------------------------

/// One log line before rendering.
///
/// `level` is kept as the string the emit path used, so an unrecognized level
/// survives into the output with an empty `priority`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// ISO-8601 timestamp with offset.
    pub timestamp: String,
    pub module: String,
    pub level: String,
    /// `P10`..`P40`, or empty for unknown levels.
    pub priority: String,
    pub message: String,
    pub fields: Fields,
}

impl LogRecord {
    /// Build a record, looking the priority up from `level`.
    ///
    /// Any caller field named `level` is discarded in favour of `level`.
    pub fn new(
        timestamp: impl Into<String>,
        module: impl Into<String>,
        level: impl Into<String>,
        message: impl Into<String>,
        mut fields: Fields,
    ) -> Self {
        let level = level.into();
        let priority = priority_of(&level).unwrap_or_default().to_string();
        fields.0.remove(RESERVED_LEVEL_KEY);
        Self {
            timestamp: timestamp.into(),
            module: module.into(),
            level,
            priority,
            message: message.into(),
            fields,
        }
    }

    /// Whether the level is one of the known levels.
    pub fn has_known_level(&self) -> bool {
        priority_of(&self.level).is_some()
    }

    /// Extra fields as written after the message: `level` first, then the
    /// caller's fields in insertion order.
    pub fn extras(&self) -> Map<String, Value> {
        let mut extras = Map::with_capacity(self.fields.len() + 1);
        extras.insert(RESERVED_LEVEL_KEY.into(), Value::String(self.level.clone()));
        extras.extend(self.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        extras
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_derived_from_level() {
        let r = LogRecord::new("t", "AUTH", "WARNING", "m", Fields::new());
        assert_eq!(r.priority, "P30");
        assert!(r.has_known_level());

        let r = LogRecord::new("t", "AUTH", "NOTICE", "m", Fields::new());
        assert_eq!(r.priority, "");
        assert!(!r.has_known_level());
    }

    #[test]
    fn caller_cannot_override_level() {
        let fields = Fields::new().with("level", "ERROR").with("user_id", "u1");
        let r = LogRecord::new("t", "AUTH", "INFO", "m", fields);
        let extras = r.extras();
        assert_eq!(extras["level"], "INFO");
        assert_eq!(extras.keys().collect::<Vec<_>>(), ["level", "user_id"]);
    }

    #[test]
    fn unserializable_value_falls_back_to_debug() {
        use std::collections::HashMap;
        // Non-string map keys cannot become JSON object keys.
        let mut odd: HashMap<(u8, u8), u8> = HashMap::new();
        odd.insert((1, 2), 3);
        let f = Fields::new().with_serialized("odd", &odd).with("after", 1);
        assert_eq!(
            f.get("odd").and_then(|v| v.as_str()),
            Some("{(1, 2): 3}")
        );
        assert_eq!(f.get("after"), Some(&Value::from(1)));
    }
}
