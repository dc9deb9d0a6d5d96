// SPDX-License-Identifier: MIT OR Apache-2.0
//! Document sources: local files and HTTP endpoints.
//!
//! Either side of a comparison is named by a file path or an
//! `http(s)://` URL. Both produce a parsed [`serde_json::Value`]; the
//! comparison engine never sees bytes or sockets.

use std::fs;
use std::time::Duration;

use anyhow::{Context, Result, bail};

/// HTTP method for endpoint sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    /// GET with optional query parameters.
    #[default]
    Get,
    /// POST with an optional JSON body.
    Post,
}

impl HttpMethod {
    /// Parse a method name, case-insensitive.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            other => bail!("unsupported HTTP method: {other}"),
        }
    }
}

/// How to fetch endpoint sources. File sources ignore all of this.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Request method.
    pub method: HttpMethod,
    /// Request headers as name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Query parameters for GET requests.
    pub params: Vec<(String, String)>,
    /// JSON body for POST requests.
    pub body: Option<serde_json::Value>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            headers: Vec::new(),
            params: Vec::new(),
            body: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Parse a `Name: value` header flag.
pub fn parse_header(raw: &str) -> Result<(String, String)> {
    let Some((name, value)) = raw.split_once(':') else {
        bail!("invalid header (expected `Name: value`): {raw}");
    };
    Ok((name.trim().to_string(), value.trim().to_string()))
}

/// Parse a `name=value` query parameter flag.
pub fn parse_param(raw: &str) -> Result<(String, String)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("invalid query parameter (expected `name=value`): {raw}");
    };
    Ok((name.trim().to_string(), value.trim().to_string()))
}

/// Whether a source name refers to an HTTP endpoint rather than a file.
#[must_use]
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Load one side of a comparison from a file path or URL.
pub fn load_document(input: &str, fetch: &FetchOptions) -> Result<serde_json::Value> {
    if is_url(input) {
        return fetch_json(input, fetch);
    }
    log::debug!("reading document from file {input}");
    let text = fs::read_to_string(input).with_context(|| format!("reading {input}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {input} as JSON"))
}

/// Fetch a JSON document from an HTTP endpoint.
///
/// Non-2xx responses and non-JSON bodies are errors; nothing is retried.
pub fn fetch_json(url: &str, fetch: &FetchOptions) -> Result<serde_json::Value> {
    log::debug!("fetching {url} via {:?}", fetch.method);
    let client = reqwest::blocking::Client::builder()
        .timeout(fetch.timeout)
        .build()
        .context("building HTTP client")?;

    let mut request = match fetch.method {
        HttpMethod::Get => client.get(url).query(&fetch.params),
        HttpMethod::Post => {
            let body = fetch.body.clone().unwrap_or_else(|| serde_json::json!({}));
            client.post(url).json(&body)
        }
    };
    for (name, value) in &fetch.headers {
        request = request.header(name.as_str(), value.as_str());
    }

    let response = request
        .send()
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("API request failed for {url}"))?;
    response
        .json()
        .with_context(|| format!("invalid JSON response from {url}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn urls_are_detected_by_scheme() {
        assert!(is_url("https://api.example.com/v1/users"));
        assert!(is_url("http://localhost:8080/data"));
        assert!(!is_url("data/users.json"));
        assert!(!is_url("httpdocs/file.json"));
    }

    #[test]
    fn headers_parse_and_trim() {
        let (name, value) = parse_header("Content-Type: application/json").unwrap();
        assert_eq!(name, "Content-Type");
        assert_eq!(value, "application/json");
        assert!(parse_header("no-colon").is_err());
    }

    #[test]
    fn params_parse_key_value() {
        let (name, value) = parse_param("page=2").unwrap();
        assert_eq!((name.as_str(), value.as_str()), ("page", "2"));
        assert!(parse_param("bare").is_err());
    }

    #[test]
    fn loads_and_parses_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"a": 1}}"#).unwrap();
        let value = load_document(file.path().to_str().unwrap(), &FetchOptions::default()).unwrap();
        assert_eq!(value, serde_json::json!({"a": 1}));
    }

    #[test]
    fn invalid_json_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err =
            load_document(file.path().to_str().unwrap(), &FetchOptions::default()).unwrap_err();
        assert!(err.to_string().contains("parsing"));
    }

    #[test]
    fn method_parse_is_case_insensitive() {
        assert_eq!(HttpMethod::parse("get").unwrap(), HttpMethod::Get);
        assert_eq!(HttpMethod::parse("POST").unwrap(), HttpMethod::Post);
        assert!(HttpMethod::parse("PUT").is_err());
    }
}
