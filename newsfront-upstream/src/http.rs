//! Shared HTTP client for upstream API requests.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::config::UpstreamConfig;
use crate::error::UpstreamError;

/// Build a [`reqwest::Client`] configured for the upstream API.
///
/// The client has:
/// - Timeout from config
/// - User-Agent from config (or `newsfront/<version>`)
/// - `Accept: application/json` on every request
/// - gzip decompression
///
/// # Errors
///
/// Returns [`UpstreamError::Config`] if the client cannot be constructed.
pub fn build_client(config: &UpstreamConfig) -> Result<reqwest::Client, UpstreamError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent())
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| UpstreamError::Config(format!("failed to build HTTP client: {e}")))
}
