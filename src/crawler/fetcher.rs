//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building one HTTP client (and so one connection pool) per fetcher
//! - GET requests with redirect following and a fixed timeout
//! - Content-Type gating: non-HTML responses succeed without a body
//! - Error classification into [`FetchError`]
//!
//! No retries are attempted; a failed URL is simply reported.

use crate::config::Config;
use crate::FetchError;
use reqwest::{redirect::Policy, Client};
use scraper::Html;
use std::time::{Duration, Instant};
use url::Url;

/// Redirect hops followed before giving up
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// HTTP status code of the final response
    pub status_code: u16,

    /// Content-Type header value (empty if absent)
    pub content_type: String,

    /// Page body; None when the response is not HTML
    pub body: Option<String>,

    /// Wall time spent on the request
    pub elapsed: Duration,
}

impl FetchedPage {
    pub fn is_html(&self) -> bool {
        self.body.is_some()
    }

    /// Parses the body into a navigable document
    ///
    /// Returns None for non-HTML responses.
    pub fn document(&self) -> Option<Html> {
        self.body.as_deref().map(Html::parse_document)
    }
}

/// Returns true if a Content-Type header value denotes an HTML document
pub fn is_html_content_type(content_type: &str) -> bool {
    let lower = content_type.to_lowercase();
    lower.contains("text/html") || lower.contains("application/xhtml+xml")
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed (up to 10 hops), the whole request is bounded by
/// the configured timeout, and TLS certificates are verified.
///
/// # Arguments
///
/// * `config` - The inspector configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.value.as_str())
        .timeout(Duration::from_secs(config.crawler.request_timeout_secs))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs bounded GET requests for the crawl controller
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher with a client built from the configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::from_client(build_http_client(config)?))
    }

    /// Wraps an already-built client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches a URL
    ///
    /// # Result mapping
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx, HTML content type | `Ok` with body |
    /// | 2xx, other content type | `Ok` with `body: None` |
    /// | non-2xx final status | `FetchError::BadStatus` |
    /// | timeout | `FetchError::Timeout` |
    /// | connection failure | `FetchError::Connection` |
    /// | body read failure | `FetchError::Body` |
    /// | anything else (redirect limit, bad URL) | `FetchError::Request` |
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let started = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = if is_html_content_type(&content_type) {
            let text = response.text().await.map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    FetchError::Body {
                        url: url.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;
            Some(text)
        } else {
            tracing::debug!("Skipping body of {} ({})", final_url, content_type);
            None
        };

        Ok(FetchedPage {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
            elapsed: started.elapsed(),
        })
    }
}

/// Maps a transport error onto the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connection {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
