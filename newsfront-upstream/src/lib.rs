//! # newsfront-upstream
//!
//! Data layer for newsfront: reads companies and articles from the
//! upstream company/news API, joins articles to their companies, and
//! filters, ranks and bounds article collections for the page assemblers.
//!
//! ## Design
//!
//! - Loosely typed upstream JSON is parsed into [`Company`] and [`Article`]
//!   at the client boundary; malformed payloads become
//!   [`UpstreamError::Unavailable`]
//! - Identifiers are normalised to [`EntityId`] before any comparison
//! - The query engine ([`query`]) is pure and stateless; it never mutates
//!   its input collection
//! - No retries and no caching: every failure surfaces immediately
//!
//! ## Example
//!
//! ```no_run
//! # async fn example() -> newsfront_upstream::Result<()> {
//! use newsfront_upstream::{query, HttpNewsSource, NewsSource, UpstreamConfig};
//!
//! let source = HttpNewsSource::new(&UpstreamConfig::with_base_url("http://localhost:8080"))?;
//! let articles = source.articles().await?;
//! for article in query::search_articles_default(&articles, "market") {
//!     println!("{}: {}", article.id, article.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod join;
pub mod query;
pub mod static_source;
pub mod types;

pub use client::{HttpNewsSource, NewsSource};
pub use config::UpstreamConfig;
pub use error::{Result, UpstreamError};
pub use join::resolve_company_for;
pub use query::ArticleQuery;
pub use static_source::StaticNewsSource;
pub use types::{Article, Company, CompanyRef, EntityId, PublishedAt};
