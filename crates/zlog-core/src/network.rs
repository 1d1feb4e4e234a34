//! Network request/response logging convention.
//!
//! Requests and responses go through the same emit pipeline as every other
//! line, at INFO, tagged with an `operation` field:
//!
//! | call               | message               | fields                                      |
//! |--------------------|-----------------------|---------------------------------------------|
//! | `network_request`  | `"{method} {url}"`    | `operation=request, method, url, ip`        |
//! | `network_response` | `"{status_code}"`     | `operation=response, status_code, ip`       |
//!
//! `ip` is always present and `null` when unknown. Headers and bodies are
//! accepted on the value objects but not written.

use serde_json::Value;

use crate::{
    error::Result,
    logger::Logger,
    types::{Fields, LogLevel, NetworkOperation, NetworkRequest, NetworkResponse},
};

/// Message and fields for a request line.
pub fn request_entry(request: &NetworkRequest, ip: Option<&str>) -> (String, Fields) {
    let message = format!("{} {}", request.method, request.url);
    let fields = Fields::new()
        .with("operation", NetworkOperation::Request.as_str())
        .with("method", request.method.as_str())
        .with("url", request.url.as_str())
        .with("ip", ip_value(ip));
    (message, fields)
}

/// Message and fields for a response line.
pub fn response_entry(response: &NetworkResponse, ip: Option<&str>) -> (String, Fields) {
    let message = response.status_code.to_string();
    let fields = Fields::new()
        .with("operation", NetworkOperation::Response.as_str())
        .with("status_code", response.status_code)
        .with("ip", ip_value(ip));
    (message, fields)
}

fn ip_value(ip: Option<&str>) -> Value {
    ip.map_or(Value::Null, Value::from)
}

impl Logger {
    /// Record an inbound or outbound request.
    pub fn network_request(&self, request: &NetworkRequest, ip: Option<&str>) -> Result<()> {
        let (message, fields) = request_entry(request, ip);
        self.emit(LogLevel::Info.as_str(), &message, fields)
    }

    /// Record the response paired with a previously logged request.
    pub fn network_response(&self, response: &NetworkResponse, ip: Option<&str>) -> Result<()> {
        let (message, fields) = response_entry(response, ip);
        self.emit(LogLevel::Info.as_str(), &message, fields)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::TimeZone;
    use tempfile::TempDir;

    use super::*;
    use crate::config::LogConfig;

    fn logger(dir: &TempDir, json: bool) -> Logger {
        let cfg = LogConfig::for_module("TEST_JSON_FORMAT")
            .unwrap()
            .with_log_path(dir.path())
            .with_json_format(json);
        let logger = Logger::new(cfg).unwrap();
        let at = chrono_tz::Asia::Riyadh
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap();
        logger.set_current_time(at);
        logger
    }

    #[test]
    fn request_then_response_pair() {
        let dir = TempDir::new().unwrap();
        let logger = logger(&dir, true);

        let request = NetworkRequest::new("GET", "https://api.example.com");
        logger.network_request(&request, Some("127.0.0.1")).unwrap();
        logger
            .network_response(&NetworkResponse::new(200), Some("127.0.0.1"))
            .unwrap();

        let path = dir.path().join("test_json_format-2024-01-01.log");
        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);

        let req = &lines[0];
        assert_eq!(req["operation"], "request");
        assert_eq!(req["method"], "GET");
        assert_eq!(req["url"], "https://api.example.com");
        assert_eq!(req["ip"], "127.0.0.1");
        assert_eq!(req["message"], "GET https://api.example.com");
        assert_eq!(req["level"], "INFO");

        let resp = &lines[1];
        assert_eq!(resp["operation"], "response");
        assert_eq!(resp["status_code"], 200);
        assert_eq!(resp["ip"], "127.0.0.1");
        assert_eq!(resp["message"], "200");
    }

    #[test]
    fn missing_ip_is_null() {
        let (_, fields) = response_entry(&NetworkResponse::new(404), None);
        assert_eq!(fields.get("ip"), Some(&Value::Null));
    }

    #[test]
    fn headers_and_body_are_not_written() {
        let mut headers = crate::types::Headers::new();
        headers.insert("authorization".into(), "Bearer secret".into());
        let req = NetworkRequest::new("POST", "/payments")
            .with_headers(headers)
            .with_body("card=4242");
        let (message, fields) = request_entry(&req, None);
        assert_eq!(message, "POST /payments");
        let keys: Vec<_> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["operation", "method", "url", "ip"]);
    }

    #[test]
    fn text_mode_network_line() {
        let dir = TempDir::new().unwrap();
        let logger = logger(&dir, false);
        logger
            .network_response(&NetworkResponse::new(201), Some("10.0.0.1"))
            .unwrap();

        let content = fs::read_to_string(logger.file_path()).unwrap();
        assert_eq!(
            content,
            "[INFO]:[P20] [2024-01-01T00:00:00+03:00] 201 {\"level\": \"INFO\", \"operation\": \"response\", \"status_code\": 201, \"ip\": \"10.0.0.1\"}\n"
        );
    }

    #[test]
    fn json_mode_network_line() {
        let dir = TempDir::new().unwrap();
        let logger = logger(&dir, true);
        let request = NetworkRequest::new("GET", "/health");
        logger.network_request(&request, None).unwrap();

        let content = fs::read_to_string(logger.file_path()).unwrap();
        assert_eq!(
            content,
            concat!(
                r#"{"timestamp": "2024-01-01T00:00:00+03:00", "module": "TEST_JSON_FORMAT", "#,
                r#""priority": "P20", "message": "GET /health", "level": "INFO", "#,
                r#""operation": "request", "method": "GET", "url": "/health", "ip": null}"#,
                "\n"
            )
        );
    }
}
