//! Request/response value objects handed to the network logging methods.
//!
//! Headers and body are accepted so hosts can pass through whatever they have,
//! but only the method/url and status code end up in the log line.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Header map, name → value.
pub type Headers = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// An HTTP request as seen by the logger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRequest {
    /// HTTP method (`GET`, `POST`, ...).
    pub method: String,
    /// Target URL, absolute or path-only.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    /// Opaque body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl NetworkRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: None,
            body: None,
        }
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// An HTTP response as seen by the logger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkResponse {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl NetworkResponse {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: None,
            body: None,
        }
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_parts_default_to_none() {
        let json = r#"{"method":"GET","url":"/health"}"#;
        let req: NetworkRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req, NetworkRequest::new("GET", "/health"));

        let resp: NetworkResponse = serde_json::from_str(r#"{"status_code":204}"#).unwrap();
        assert!(resp.headers.is_none() && resp.body.is_none());
    }

    #[test]
    fn builders_fill_optional_parts() {
        let mut headers = Headers::new();
        headers.insert("content-type".into(), "application/json".into());
        let req = NetworkRequest::new("POST", "/payments")
            .with_headers(headers.clone())
            .with_body("{}");
        assert_eq!(req.headers.as_ref(), Some(&headers));
        assert_eq!(req.body, Some(serde_json::Value::from("{}")));
    }
}
