//! Query engine: filter, rank and bound in-memory article collections.
//!
//! Every function here is pure. Inputs are borrowed and never reordered;
//! results are fresh vectors of cloned articles, so calling twice with the
//! same input yields the same output.

pub mod engine;
pub mod filter;
pub mod ranking;

pub use engine::{
    articles_for_company, search_articles, search_articles_default, ArticleQuery,
    COMPANY_ARTICLE_LIMIT, SEARCH_RESULT_LIMIT,
};
