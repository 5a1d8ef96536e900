//! Join resolver: article → owning company.

use crate::client::NewsSource;
use crate::error::Result;
use crate::types::{Article, Company};

/// Fetch the full company record an article refers to.
///
/// Performs exactly one `company` lookup with the id embedded in the
/// article. Errors from the source propagate unchanged.
pub async fn resolve_company_for<S: NewsSource>(source: &S, article: &Article) -> Result<Company> {
    let company_id = article.company_id();
    tracing::trace!(article = %article.id, company = %company_id, "resolving article company");
    source.company(company_id).await
}
