//! Page assembler tests over an in-memory news source.
//!
//! Covers the four recipes, error propagation, and the guarantee that
//! invalid input is rejected before any upstream lookup.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use newsfront::pages::{self, SearchParams};
use newsfront_upstream::{Article, Company, EntityId, StaticNewsSource, UpstreamError};
use serde_json::json;

fn company(id: i64, name: &str) -> Company {
    serde_json::from_value(json!({"id": id, "nombre": name})).expect("company")
}

fn article(id: i64, title: &str, summary: &str, company: i64, date: &str) -> Article {
    serde_json::from_value(json!({
        "id": id,
        "tituloNoticia": title,
        "resumenNoticia": summary,
        "fechaPublicacion": date,
        "empresa": {"id": company},
    }))
    .expect("article")
}

fn source() -> StaticNewsSource {
    StaticNewsSource::new(
        vec![company(10, "Acme"), company(20, "Globex")],
        vec![
            article(1, "Market Rally", "stocks up", 10, "2024-01-01"),
            article(2, "Market Dip", "stocks down", 10, "2024-03-01"),
            article(3, "Weather", "rain", 20, "2024-02-01"),
            article(4, "Acme hires", "new staff", 10, "2024-04-01"),
            article(5, "Acme opens store", "retail", 10, "2023-12-01"),
        ],
    )
}

fn ids(articles: &[Article]) -> Vec<i64> {
    articles.iter().map(|a| a.id.get()).collect()
}

#[tokio::test]
async fn listing_returns_all_companies() {
    let source = source();
    let page = pages::listing(&source).await.expect("listing");
    assert_eq!(page.empresas.len(), 2);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn company_detail_takes_three_most_recent() {
    let source = source();
    let page = pages::company_detail(&source, EntityId(10)).await.expect("company");
    assert_eq!(page.empresa.name.as_deref(), Some("Acme"));
    assert_eq!(ids(&page.noticias), vec![4, 2, 1]);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn company_detail_for_unknown_company_is_not_found() {
    let err = pages::company_detail(&source(), EntityId(99)).await.unwrap_err();
    assert!(matches!(err, UpstreamError::NotFound { entity: "company", id: 99 }));
}

#[tokio::test]
async fn article_detail_joins_company() {
    let source = source();
    let page = pages::article_detail(&source, EntityId(3)).await.expect("article");
    assert_eq!(page.noticia.title, "Weather");
    assert_eq!(page.empresa.id, EntityId(20));
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn article_detail_for_unknown_article_stops_early() {
    let source = source();
    let err = pages::article_detail(&source, EntityId(42)).await.unwrap_err();
    assert!(matches!(err, UpstreamError::NotFound { entity: "article", id: 42 }));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn search_without_company_has_null_company() {
    let source = source();
    let params = SearchParams::from_raw(Some("market".into()), None).expect("params");
    let page = pages::search(&source, &params).await.expect("search");
    assert_eq!(ids(&page.noticias), vec![2, 1]);
    assert_eq!(page.keyword, "market");
    assert!(page.empresa.is_none());
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn search_with_company_includes_company() {
    let source = source();
    let params = SearchParams::from_raw(Some("ACME".into()), Some("10")).expect("params");
    let page = pages::search(&source, &params).await.expect("search");
    assert_eq!(ids(&page.noticias), vec![4, 5]);
    assert_eq!(page.empresa.expect("company").id, EntityId(10));
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn search_company_filter_can_exclude_everything() {
    let params = SearchParams::from_raw(Some("stocks".into()), Some("20")).expect("params");
    let page = pages::search(&source(), &params).await.expect("search");
    assert!(page.noticias.is_empty());
    assert_eq!(page.empresa.expect("company").name.as_deref(), Some("Globex"));
}

#[tokio::test]
async fn search_with_empty_keyword_lists_everything() {
    let page = pages::search(&source(), &SearchParams::default()).await.expect("search");
    assert_eq!(ids(&page.noticias), vec![4, 2, 3, 1, 5]);
}

#[tokio::test]
async fn search_with_unknown_company_fails() {
    let params = SearchParams::from_raw(None, Some("77")).expect("params");
    let err = pages::search(&source(), &params).await.unwrap_err();
    assert!(matches!(err, UpstreamError::NotFound { entity: "company", id: 77 }));
}

#[tokio::test]
async fn unavailable_upstream_propagates_from_every_page() {
    let source = StaticNewsSource::unavailable("upstream down");
    let assert_unavailable = |err: UpstreamError| {
        assert!(matches!(err, UpstreamError::Unavailable(ref m) if m == "upstream down"));
    };

    assert_unavailable(pages::listing(&source).await.unwrap_err());
    assert_unavailable(pages::company_detail(&source, EntityId(10)).await.unwrap_err());
    assert_unavailable(pages::article_detail(&source, EntityId(1)).await.unwrap_err());
    assert_unavailable(
        pages::search(&source, &SearchParams::default())
            .await
            .unwrap_err(),
    );
}

#[test]
fn invalid_company_filter_rejected_before_lookup() {
    let err = SearchParams::from_raw(Some("x".into()), Some("ten")).unwrap_err();
    assert!(matches!(err, UpstreamError::InvalidInput(_)));
}
