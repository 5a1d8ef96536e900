//! Article predicates shared by the query operations.

use crate::types::{Article, EntityId};

/// Whether the article belongs to `company`.
///
/// Both sides are already [`EntityId`]s, so `"10"` and `10` from the
/// upstream have been normalised to the same value before this runs.
pub fn belongs_to(article: &Article, company: EntityId) -> bool {
    article.company_id() == company
}

/// Whether `needle_lower` occurs in the article title or summary,
/// ignoring case.
///
/// `needle_lower` must already be lowercased; an empty needle matches
/// every article.
pub fn matches_keyword(article: &Article, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    article.title.to_lowercase().contains(needle_lower)
        || article.summary.to_lowercase().contains(needle_lower)
}
