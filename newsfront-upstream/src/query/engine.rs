//! The two query operations used by the page assemblers.
//!
//! # Pipeline
//!
//! 1. Filter the borrowed collection (company and/or keyword)
//! 2. Clone the survivors into a fresh vector
//! 3. Rank by publication time, most recent first (stable)
//! 4. Truncate to the requested limit

use crate::types::{Article, EntityId};

use super::filter::{belongs_to, matches_keyword};
use super::ranking::rank_by_recency;

/// Default number of articles shown on a company page.
pub const COMPANY_ARTICLE_LIMIT: usize = 3;

/// Default maximum number of search results.
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// Parameters for [`search_articles`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    /// Case-insensitive substring searched in title and summary. Empty
    /// matches every article.
    pub keyword: String,
    /// Restrict results to this company when set.
    pub company: Option<EntityId>,
    /// Maximum number of results.
    pub limit: usize,
}

impl ArticleQuery {
    /// A keyword query with no company filter and the default limit.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            company: None,
            limit: SEARCH_RESULT_LIMIT,
        }
    }

    pub fn with_company(mut self, company: Option<EntityId>) -> Self {
        self.company = company;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// The `limit` most recent articles belonging to `company`.
///
/// Returns fewer than `limit` articles when the company has fewer.
pub fn articles_for_company(articles: &[Article], company: EntityId, limit: usize) -> Vec<Article> {
    let selected: Vec<Article> = articles
        .iter()
        .filter(|article| belongs_to(article, company))
        .cloned()
        .collect();
    let result = bound(selected, limit);
    tracing::trace!(
        %company,
        total = articles.len(),
        returned = result.len(),
        "articles for company"
    );
    result
}

/// Articles whose title or summary contains the query keyword, optionally
/// restricted to one company, most recent first.
///
/// No match is a normal outcome and yields an empty vector.
pub fn search_articles(articles: &[Article], query: &ArticleQuery) -> Vec<Article> {
    let needle = query.keyword.to_lowercase();
    let selected: Vec<Article> = articles
        .iter()
        .filter(|article| matches_keyword(article, &needle))
        .filter(|article| {
            query
                .company
                .map_or(true, |company| belongs_to(article, company))
        })
        .cloned()
        .collect();
    let result = bound(selected, query.limit);
    tracing::trace!(
        keyword = %query.keyword,
        company = ?query.company,
        total = articles.len(),
        returned = result.len(),
        "article search"
    );
    result
}

/// [`search_articles`] with no company filter and the default limit.
pub fn search_articles_default(articles: &[Article], keyword: &str) -> Vec<Article> {
    search_articles(articles, &ArticleQuery::new(keyword))
}

fn bound(mut selected: Vec<Article>, limit: usize) -> Vec<Article> {
    rank_by_recency(&mut selected);
    selected.truncate(limit);
    selected
}
