//! HTTP front end serving each page's data bundle as JSON.
//!
//! ## Endpoints
//!
//! - `GET /`: company listing
//! - `GET /empresa/{id}`: company detail
//! - `GET /noticia/{id}`: article detail
//! - `GET /buscar?buscar=<keyword>&empresaId=<id>`: article search
//! - `GET /health`: liveness check

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use newsfront_upstream::{EntityId, NewsSource};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{FrontError, Result};
use crate::pages::{self, ArticlePage, CompanyPage, ListingPage, SearchPage, SearchParams};

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// Shared state for axum handlers.
struct AppState<S> {
    source: Arc<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

/// Query string of the search page.
#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    buscar: Option<String>,
    #[serde(rename = "empresaId")]
    empresa_id: Option<String>,
}

/// Build the router over `source`.
pub fn router<S: NewsSource + 'static>(source: Arc<S>) -> Router {
    Router::new()
        .route("/", get(listing_page::<S>))
        .route("/empresa/{id}", get(company_page::<S>))
        .route("/noticia/{id}", get(article_page::<S>))
        .route("/buscar", get(search_page::<S>))
        .route("/health", get(health))
        .with_state(AppState { source })
}

// ---------------------------------------------------------------------------
// FrontServer
// ---------------------------------------------------------------------------

/// Running front-end server.
///
/// Serves in a background tokio task; dropping the handle does not stop it,
/// call [`FrontServer::shutdown`] for that.
pub struct FrontServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl FrontServer {
    /// Bind to `{config.host}:{config.port}` (port `0` auto-assigns) and
    /// start serving in a background task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start<S: NewsSource + 'static>(
        source: Arc<S>,
        config: &ServerConfig,
    ) -> Result<Self> {
        let listener = TcpListener::bind(config.bind_address()).await?;
        let addr = listener.local_addr()?;
        let app = router(source);

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "front-end server stopped");
            }
        });

        info!("newsfront listening on http://{addr}");
        Ok(Self { addr, handle })
    }

    /// The bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL, e.g. `http://127.0.0.1:3000`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Wait for the server task to finish.
    pub async fn wait(self) -> Result<()> {
        self.handle
            .await
            .map_err(|e| FrontError::Io(std::io::Error::other(e)))
    }

    /// Stop serving.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn listing_page<S: NewsSource + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<ListingPage>> {
    Ok(Json(pages::listing(state.source.as_ref()).await?))
}

async fn company_page<S: NewsSource + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<CompanyPage>> {
    let id = EntityId::parse(&id)?;
    Ok(Json(pages::company_detail(state.source.as_ref(), id).await?))
}

async fn article_page<S: NewsSource + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<ArticlePage>> {
    let id = EntityId::parse(&id)?;
    Ok(Json(pages::article_detail(state.source.as_ref(), id).await?))
}

async fn search_page<S: NewsSource + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchPage>> {
    let params = SearchParams::from_raw(query.buscar, query.empresa_id.as_deref())?;
    Ok(Json(pages::search(state.source.as_ref(), &params).await?))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}
