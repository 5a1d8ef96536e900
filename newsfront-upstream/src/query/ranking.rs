//! Recency ranking for article lists.

use crate::types::Article;

/// Sort articles by publication timestamp, most recent first.
///
/// The sort is stable: articles published at the same instant keep their
/// relative input order.
pub fn rank_by_recency(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

#[cfg(test)]
pub(crate) fn is_ranked(articles: &[Article]) -> bool {
    articles
        .windows(2)
        .all(|pair| pair[0].published_at >= pair[1].published_at)
}
