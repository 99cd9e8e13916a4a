//! HTTP fetcher implementation
//!
//! This module handles the single GET request made per listing URL:
//! - Building an HTTP client that presents itself as a desktop browser
//! - Classifying the response into success, HTTP error, or network error
//!
//! Nothing here retries. A failed URL is reported once and the batch moves on.

use crate::config::FetchConfig;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Why a request never produced a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkErrorKind {
    /// The request exceeded the configured timeout
    Timeout,

    /// Connection refused, DNS failure, TLS failure
    Connect(String),

    /// Anything else, including a body that could not be read
    Other(String),
}

impl fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timeout"),
            Self::Connect(detail) => write!(f, "connection failed: {}", detail),
            Self::Other(detail) => write!(f, "request failed: {}", detail),
        }
    }
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// The server answered with a 2xx status
    Success {
        /// Page body content
        body: String,
        /// HTTP status code
        status: u16,
        /// Content-Type header value, if the server sent one
        content_type: Option<String>,
    },

    /// The server answered with any other status
    HttpError {
        /// The HTTP status code
        status: u16,
    },

    /// No usable response
    NetworkError {
        /// What went wrong
        kind: NetworkErrorKind,
    },
}

impl FetchOutcome {
    /// The text recorded in the output's error column, if this is a failure
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status } => Some(format!("HTTP {}", status)),
            Self::NetworkError { kind } => Some(kind.to_string()),
        }
    }
}

/// Builds the browser-like header set sent with every request
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers
}

/// Builds an HTTP client with proper configuration
///
/// No cookie store is enabled, so nothing carries over between requests.
///
/// # Example
///
/// ```no_run
/// use listing_scout::config::FetchConfig;
/// use listing_scout::pipeline::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(browser_headers())
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Classifies a transport-level reqwest error
fn classify_error(error: &reqwest::Error) -> NetworkErrorKind {
    if error.is_timeout() {
        NetworkErrorKind::Timeout
    } else if error.is_connect() {
        NetworkErrorKind::Connect(error.to_string())
    } else {
        NetworkErrorKind::Other(error.to_string())
    }
}

/// Fetches a URL once
///
/// | Condition             | Outcome                  |
/// |-----------------------|--------------------------|
/// | HTTP 2xx              | `Success`                |
/// | Any other status      | `HttpError`              |
/// | Timeout               | `NetworkError(Timeout)`  |
/// | Connection/DNS failure| `NetworkError(Connect)`  |
/// | Body read failure     | `NetworkError(Other)` or `Timeout` |
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchOutcome::NetworkError {
                kind: classify_error(&e),
            }
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::HttpError {
            status: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match response.text().await {
        Ok(body) => FetchOutcome::Success {
            body,
            status: status.as_u16(),
            content_type,
        },
        Err(e) => FetchOutcome::NetworkError {
            kind: classify_error(&e),
        },
    }
}
