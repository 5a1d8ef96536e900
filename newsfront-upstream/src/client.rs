//! Read-only client for the upstream company/news API.
//!
//! [`NewsSource`] is the seam the page assemblers depend on;
//! [`HttpNewsSource`] is the production implementation over HTTP.

use std::future::Future;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::{Result, UpstreamError};
use crate::http;
use crate::types::{
    Article, ArticleEnvelope, ArticlesEnvelope, CompaniesEnvelope, Company, CompanyEnvelope,
    EntityId,
};

const COMPANIES_PATH: &str = "empresa";
const ARTICLES_PATH: &str = "noticia";

/// A read-only source of companies and articles.
///
/// Each method performs at most one upstream round trip. Implementations
/// report a missing single record as [`UpstreamError::NotFound`] and every
/// other failure as [`UpstreamError::Unavailable`]; they never retry.
///
/// All implementations must be `Send + Sync` so one instance can serve
/// concurrent requests.
pub trait NewsSource: Send + Sync {
    /// Fetch the full company collection.
    fn companies(&self) -> impl Future<Output = Result<Vec<Company>>> + Send;

    /// Fetch one company by identifier.
    fn company(&self, id: EntityId) -> impl Future<Output = Result<Company>> + Send;

    /// Fetch the full article collection.
    fn articles(&self) -> impl Future<Output = Result<Vec<Article>>> + Send;

    /// Fetch one article by identifier.
    fn article(&self, id: EntityId) -> impl Future<Output = Result<Article>> + Send;
}

/// [`NewsSource`] backed by the upstream HTTP API.
///
/// Endpoints, relative to `config.base_url`:
///
/// | call          | path            | envelope             |
/// |---------------|-----------------|----------------------|
/// | `companies()` | `empresa`       | `{ "empresas": [] }` |
/// | `company(id)` | `empresa/{id}`  | `{ "empresa": {} }`  |
/// | `articles()`  | `noticia`       | `{ "noticias": [] }` |
/// | `article(id)` | `noticia/{id}`  | `{ "noticia": {} }`  |
#[derive(Debug, Clone)]
pub struct HttpNewsSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpNewsSource {
    /// Create a source from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Config`] if the configuration is invalid or
    /// the HTTP client cannot be built.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;
        let client = http::build_client(config)?;
        Ok(Self { client, base_url })
    }

    /// The normalised base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `path` and return the body, or `None` when the upstream answers 404.
    async fn fetch(&self, path: &str) -> Result<Option<String>> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| UpstreamError::Unavailable(format!("cannot build URL for /{path}: {e}")))?;

        tracing::trace!(%url, "upstream request");

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::warn!(path, error = %e, "upstream request failed");
            UpstreamError::Unavailable(format!("request to /{path} failed: {e}"))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(path, "upstream returned 404");
            return Ok(None);
        }
        if !status.is_success() {
            tracing::warn!(path, %status, "upstream returned error status");
            return Err(UpstreamError::Unavailable(format!(
                "/{path} returned HTTP {status}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            UpstreamError::Unavailable(format!("reading /{path} response failed: {e}"))
        })?;
        tracing::trace!(path, bytes = body.len(), "upstream response received");
        Ok(Some(body))
    }

    async fn fetch_collection<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        match self.fetch(path).await? {
            Some(body) => decode(path, &body),
            None => Err(UpstreamError::Unavailable(format!(
                "collection /{path} returned HTTP 404"
            ))),
        }
    }

    async fn fetch_item<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.fetch(path).await? {
            Some(body) => decode(path, &body).map(Some),
            None => Ok(None),
        }
    }
}

impl NewsSource for HttpNewsSource {
    async fn companies(&self) -> Result<Vec<Company>> {
        let envelope: CompaniesEnvelope = self.fetch_collection(COMPANIES_PATH).await?;
        Ok(envelope.empresas)
    }

    async fn company(&self, id: EntityId) -> Result<Company> {
        let path = format!("{COMPANIES_PATH}/{id}");
        let envelope: Option<CompanyEnvelope> = self.fetch_item(&path).await?;
        envelope
            .and_then(|env| env.empresa)
            .ok_or(UpstreamError::NotFound {
                entity: "company",
                id: id.get(),
            })
    }

    async fn articles(&self) -> Result<Vec<Article>> {
        let envelope: ArticlesEnvelope = self.fetch_collection(ARTICLES_PATH).await?;
        Ok(envelope.noticias)
    }

    async fn article(&self, id: EntityId) -> Result<Article> {
        let path = format!("{ARTICLES_PATH}/{id}");
        let envelope: Option<ArticleEnvelope> = self.fetch_item(&path).await?;
        envelope
            .and_then(|env| env.noticia)
            .ok_or(UpstreamError::NotFound {
                entity: "article",
                id: id.get(),
            })
    }
}

/// Parse a response body into its typed envelope.
fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(path, error = %e, "malformed upstream payload");
        UpstreamError::Unavailable(format!("malformed payload from /{path}: {e}"))
    })
}
