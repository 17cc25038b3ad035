use anyhow::{Context, Result};
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use lse_core::{build_or_default, Index, Occurrence};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub kw1: String,
    #[serde(default)]
    pub kw2: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    /// Normalized query words; `None` when a word is not a keyword.
    pub kw1: Option<String>,
    pub kw2: Option<String>,
    pub took_s: f64,
    pub results: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct KeywordResponse {
    pub keyword: String,
    pub occurrences: Vec<Occurrence>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub documents: usize,
    pub keywords: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<Index>,
}

/// Build the index once at startup; `noise` falls back to the built-in list.
pub fn load_index(docs: &std::path::Path, noise: Option<&std::path::Path>) -> Result<Index> {
    build_or_default(docs, noise)
        .with_context(|| format!("failed to index documents listed in {}", docs.display()))
}

pub fn build_app(index: Arc<Index>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/keyword/:word", get(keyword_handler))
        .route("/stats", get(stats_handler))
        .with_state(AppState { index })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let kw1 = state.index.keyword(&params.kw1);
    let kw2 = state.index.keyword(&params.kw2);
    let results = state.index.top5_search(kw1.as_deref().unwrap_or(""), kw2.as_deref().unwrap_or(""));
    let elapsed = start.elapsed();
    tracing::debug!(?kw1, ?kw2, hits = results.as_ref().map_or(0, Vec::len), "search");
    Json(SearchResponse { kw1, kw2, took_s: elapsed.as_secs_f64(), results })
}

pub async fn keyword_handler(State(state): State<AppState>, Path(word): Path<String>) -> Result<Json<KeywordResponse>, (StatusCode, String)> {
    let keyword = state
        .index
        .keyword(&word)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("{word} is not a keyword")))?;
    let occurrences = state
        .index
        .occurrences(&keyword)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("{keyword} is not indexed")))?
        .to_vec();
    Ok(Json(KeywordResponse { keyword, occurrences }))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse { documents: state.index.documents().len(), keywords: state.index.len() })
}
