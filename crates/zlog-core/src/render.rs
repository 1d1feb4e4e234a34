//! Record → line renderers.
//!
//! Both renderers are pure and emit exactly one line without the trailing
//! newline; the logger appends it. They carry the same content: the text
//! form puts the level and priority in a bracketed prefix and writes every
//! extra field, `level` included, as a trailing JSON object.
//!
//! JSON is written with `", "` and `": "` separators and non-ASCII
//! characters escaped as `\uXXXX`, so lines are byte-compatible with files
//! produced by other zlog writers.
//!
//! ```text
//! {"timestamp": "2024-01-01T00:00:00+03:00", "module": "AUTH", "priority": "P20", "message": "hi", "level": "INFO"}
//! [INFO]:[P20] [2024-01-01T00:00:00+03:00] hi {"level": "INFO"}
//! ```

use std::io;

use serde::Serialize;
use serde_json::{Map, Serializer, Value, ser::Formatter};

use crate::types::LogRecord;

/// Output format of a logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Text,
}

impl Format {
    pub fn from_json_flag(json_format: bool) -> Self {
        if json_format { Self::Json } else { Self::Text }
    }
}

/// Render `record` in the given format.
pub fn render(record: &LogRecord, format: Format) -> String {
    match format {
        Format::Json => render_json(record),
        Format::Text => render_text(record),
    }
}

/// One JSON object: `timestamp, module, priority, message`, then `level`
/// and the caller's fields.
///
/// A caller field sharing a name with one of the leading keys replaces its
/// value in place.
pub fn render_json(record: &LogRecord) -> String {
    let mut obj = Map::with_capacity(5 + record.fields.len());
    obj.insert("timestamp".into(), Value::String(record.timestamp.clone()));
    obj.insert("module".into(), Value::String(record.module.clone()));
    obj.insert("priority".into(), Value::String(record.priority.clone()));
    obj.insert("message".into(), Value::String(record.message.clone()));
    obj.extend(record.extras());
    to_line(&Value::Object(obj))
}

/// `[LEVEL]:[PRIORITY] [timestamp] message {extras}`.
///
/// The bracket prefix is omitted entirely for unknown levels, leaving the
/// line to start with a single space.
pub fn render_text(record: &LogRecord) -> String {
    let prefix = if record.has_known_level() {
        format!("[{}]:[{}]", record.level, record.priority)
    } else {
        String::new()
    };
    let extras = record.extras();
    let extras = if extras.is_empty() {
        String::new()
    } else {
        to_line(&Value::Object(extras))
    };
    format!(
        "{prefix} [{}] {} {extras}",
        record.timestamp,
        flatten(&record.message)
    )
}

/// Keep text lines single-line: embedded line breaks are escaped.
fn flatten(message: &str) -> std::borrow::Cow<'_, str> {
    if message.contains(['\n', '\r']) {
        message.replace('\r', "\\r").replace('\n', "\\n").into()
    } else {
        message.into()
    }
}

// ---------------------------------------------------------------------------
// Line formatter
// ---------------------------------------------------------------------------

/// Single-line JSON with spaced separators and ASCII-only output.
#[derive(Debug, Clone, Copy, Default)]
struct LineFormatter;

impl Formatter for LineFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if !first {
            writer.write_all(b", ")?;
        }
        Ok(())
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if !first {
            writer.write_all(b", ")?;
        }
        Ok(())
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if c.is_ascii() && c != '\x7f' {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + c.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

fn to_line(value: &Value) -> String {
    let mut buf = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut buf, LineFormatter);
    // Writing a Value into memory cannot fail.
    let _ = value.serialize(&mut ser);
    String::from_utf8_lossy(&buf).into_owned()
}
