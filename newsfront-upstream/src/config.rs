//! Upstream client configuration with sensible defaults.
//!
//! [`UpstreamConfig`] is passed explicitly to
//! [`HttpNewsSource::new`](crate::client::HttpNewsSource::new); nothing in
//! this crate reads a base URL from ambient state.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::UpstreamError;

/// Default base URL of the company/news API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Configuration for the upstream company/news API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL the `/empresa` and `/noticia` endpoints hang off.
    pub base_url: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, `newsfront/<version>` is sent.
    pub user_agent: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_seconds: 10,
            user_agent: None,
        }
    }
}

impl UpstreamConfig {
    /// Build a config pointing at `base_url`, other fields defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must be an absolute `http` or `https` URL
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), UpstreamError> {
        self.parsed_base_url()?;
        if self.timeout_seconds == 0 {
            return Err(UpstreamError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Parse `base_url`, normalised to end with a single `/` so that
    /// relative joins keep any path prefix.
    pub fn parsed_base_url(&self) -> Result<Url, UpstreamError> {
        let trimmed = self.base_url.trim();
        let with_slash = if trimmed.ends_with('/') {
            trimmed.to_owned()
        } else {
            format!("{trimmed}/")
        };
        let url = Url::parse(&with_slash)
            .map_err(|e| UpstreamError::Config(format!("base_url `{trimmed}` is invalid: {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(UpstreamError::Config(format!(
                "base_url scheme must be http or https, got `{other}`"
            ))),
        }
    }

    /// The User-Agent header value to send.
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("newsfront/{}", env!("CARGO_PKG_VERSION")))
    }
}
