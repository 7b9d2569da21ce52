//! HTTP read API over the configured collections

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::generate::EntryDocument;
use crate::content::{CollectionCache, ContentCollection, ContentLoader, MarkdownRenderer};
use crate::Folio;

/// Server state
pub struct ServerState {
    folio: Folio,
    caches: HashMap<String, CollectionCache>,
    renderer: MarkdownRenderer,
}

impl ServerState {
    pub fn new(folio: Folio) -> Self {
        let caches = folio
            .config
            .collections
            .iter()
            .map(|c| (c.name.clone(), CollectionCache::new()))
            .collect();
        let renderer = MarkdownRenderer::from_config(&folio.config.highlight);

        Self {
            folio,
            caches,
            renderer,
        }
    }

    /// The named collection, read from disk on first use
    async fn collection(&self, name: &str) -> Result<Arc<ContentCollection>, ApiError> {
        let cache = self
            .caches
            .get(name)
            .ok_or_else(|| ApiError::NotFound(format!("unknown collection: {}", name)))?;

        cache
            .get_or_load(|| {
                let folio = self.folio.clone();
                let name = name.to_string();
                async move {
                    tracing::debug!("Loading collection {}", name);
                    let loaded =
                        tokio::task::spawn_blocking(move || ContentLoader::new(&folio).load(&name))
                            .await;
                    match loaded {
                        Ok(result) => result.map_err(|e| ApiError::Internal(e.to_string())),
                        Err(e) => Err(ApiError::Internal(e.to_string())),
                    }
                }
            })
            .await
    }
}

/// Errors returned to API clients as `{"error": "..."}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(msg) => {
                tracing::error!("Request failed: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build the router for the given state
pub fn router(state: Arc<ServerState>) -> Router {
    let public_dir = state.folio.public_dir.clone();

    Router::new()
        .route("/api/collections", get(collections_handler))
        .route("/api/:collection", get(list_handler))
        .route("/api/:collection/:id", get(entry_handler))
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the read API server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState::new(folio.clone()));
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn collections_handler(State(state): State<Arc<ServerState>>) -> Json<Vec<String>> {
    Json(
        state
            .folio
            .config
            .collection_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}

async fn list_handler(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let collection = state.collection(&name).await?;
    Ok(Json(collection.list_all()).into_response())
}

async fn entry_handler(
    State(state): State<Arc<ServerState>>,
    Path((name, id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let collection = state.collection(&name).await?;
    let entry = collection
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("no entry {} in {}", id, name)))?;

    let document = EntryDocument::new(&collection, entry, &state.renderer);
    Ok(Json(document).into_response())
}
