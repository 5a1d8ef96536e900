//! Page assemblers: the data bundle behind each page.
//!
//! Each assembler is a fixed sequence of upstream lookups, joins and
//! queries. Independent lookups run concurrently; a lookup that depends on
//! another (article, then its company) waits for it. Errors propagate
//! unchanged to the caller, which turns them into a response.

use newsfront_upstream::query::{self, ArticleQuery, COMPANY_ARTICLE_LIMIT, SEARCH_RESULT_LIMIT};
use newsfront_upstream::{Article, Company, EntityId, NewsSource, Result, resolve_company_for};
use serde::{Deserialize, Serialize};

/// Bundle for the company listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    pub empresas: Vec<Company>,
}

/// Bundle for a company page: the company and its latest articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyPage {
    pub empresa: Company,
    pub noticias: Vec<Article>,
}

/// Bundle for an article page: the article and its owning company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticlePage {
    pub noticia: Article,
    pub empresa: Company,
}

/// Bundle for the search results page.
///
/// `empresa` is `null` unless the search was restricted to a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub noticias: Vec<Article>,
    pub keyword: String,
    pub empresa: Option<Company>,
}

/// Parsed search request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Keyword as received; a missing parameter is the empty keyword.
    pub keyword: String,
    /// Optional company filter.
    pub company: Option<EntityId>,
}

impl SearchParams {
    /// Build from raw query values (`buscar`, `empresaId`).
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `empresa_id` is present, non-blank and not
    /// an integer.
    pub fn from_raw(keyword: Option<String>, empresa_id: Option<&str>) -> Result<Self> {
        Ok(Self {
            keyword: keyword.unwrap_or_default(),
            company: EntityId::parse_optional(empresa_id)?,
        })
    }
}

/// Listing page: every company.
pub async fn listing<S: NewsSource>(source: &S) -> Result<ListingPage> {
    let empresas = source.companies().await?;
    tracing::debug!(companies = empresas.len(), "assembled listing page");
    Ok(ListingPage { empresas })
}

/// Company page: the company plus its most recent articles.
pub async fn company_detail<S: NewsSource>(source: &S, id: EntityId) -> Result<CompanyPage> {
    let (empresa, articles) = tokio::try_join!(source.company(id), source.articles())?;
    let noticias = query::articles_for_company(&articles, id, COMPANY_ARTICLE_LIMIT);
    tracing::debug!(company = %id, articles = noticias.len(), "assembled company page");
    Ok(CompanyPage { empresa, noticias })
}

/// Article page: the article, then the company it belongs to.
pub async fn article_detail<S: NewsSource>(source: &S, id: EntityId) -> Result<ArticlePage> {
    let noticia = source.article(id).await?;
    let empresa = resolve_company_for(source, &noticia).await?;
    tracing::debug!(article = %id, company = %empresa.id, "assembled article page");
    Ok(ArticlePage { noticia, empresa })
}

/// Search page: matching articles, plus the filter company when one was given.
pub async fn search<S: NewsSource>(source: &S, params: &SearchParams) -> Result<SearchPage> {
    let company_lookup = async {
        match params.company {
            Some(id) => source.company(id).await.map(Some),
            None => Ok(None),
        }
    };
    let (articles, empresa) = tokio::try_join!(source.articles(), company_lookup)?;

    let query = ArticleQuery::new(params.keyword.as_str())
        .with_company(params.company)
        .with_limit(SEARCH_RESULT_LIMIT);
    let noticias = query::search_articles(&articles, &query);

    tracing::trace!(keyword = %params.keyword, "search keyword");
    tracing::debug!(
        company = ?params.company,
        results = noticias.len(),
        "assembled search page"
    );
    Ok(SearchPage {
        noticias,
        keyword: params.keyword.clone(),
        empresa,
    })
}
