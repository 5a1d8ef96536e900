//! In-memory [`NewsSource`] over fixed company and article snapshots.
//!
//! Serves page assembly without a network, mainly in tests. Lookups follow
//! the same contract as the HTTP source: a missing single record is
//! [`UpstreamError::NotFound`]. A source built with
//! [`StaticNewsSource::unavailable`] fails every call instead.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::client::NewsSource;
use crate::error::{Result, UpstreamError};
use crate::types::{Article, Company, EntityId};

/// Fixed snapshot of the upstream collections.
#[derive(Debug, Default)]
pub struct StaticNewsSource {
    companies: Vec<Company>,
    articles: Vec<Article>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl StaticNewsSource {
    pub fn new(companies: Vec<Company>, articles: Vec<Article>) -> Self {
        Self {
            companies,
            articles,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A source whose every call fails with [`UpstreamError::Unavailable`].
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Number of lookups served so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn begin(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match &self.failure {
            Some(reason) => Err(UpstreamError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl NewsSource for StaticNewsSource {
    async fn companies(&self) -> Result<Vec<Company>> {
        self.begin()?;
        Ok(self.companies.clone())
    }

    async fn company(&self, id: EntityId) -> Result<Company> {
        self.begin()?;
        self.companies
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(UpstreamError::NotFound {
                entity: "company",
                id: id.get(),
            })
    }

    async fn articles(&self) -> Result<Vec<Article>> {
        self.begin()?;
        Ok(self.articles.clone())
    }

    async fn article(&self, id: EntityId) -> Result<Article> {
        self.begin()?;
        self.articles
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(UpstreamError::NotFound {
                entity: "article",
                id: id.get(),
            })
    }
}
