use analyzer::{
    AnalyzerError, MemoryPostStore, NewPost, Post, PostId, PostStore, RankedWord, RankingConfig,
    TopWordsCache, TopWordsService,
};
use anyhow::Result;
use axum::{extract::{Path, State}, http::StatusCode, routing::{delete, get}, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod http_store;

use http_store::HttpPostStore;

pub struct ServerConfig {
    /// Base URL of the post backend; `None` keeps posts in process memory.
    pub backend: Option<String>,
    pub backend_timeout: Duration,
    pub ranking: RankingConfig,
}

#[derive(Clone)]
pub struct AppState {
    pub words: Arc<TopWordsService>,
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    let store: Arc<dyn PostStore> = match &config.backend {
        Some(base) => {
            tracing::info!(backend = %base, "using remote post store");
            Arc::new(HttpPostStore::new(base, config.backend_timeout)?)
        }
        None => {
            tracing::info!("using in-memory post store");
            Arc::new(MemoryPostStore::new())
        }
    };
    Ok(build_app_with_store(store, config.ranking))
}

/// Router over an already constructed store. The cache is created here, once per app.
pub fn build_app_with_store(store: Arc<dyn PostStore>, ranking: RankingConfig) -> Router {
    let cache = Arc::new(TopWordsCache::new());
    let words = Arc::new(TopWordsService::new(store, cache, ranking));

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
        .route("/v1/post", get(list_posts).post(create_post))
        .route("/v1/post/:post_id", delete(delete_post))
        .route("/v1/word", get(top_words))
        .with_state(AppState { words })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

type ApiError = (StatusCode, Json<Value>);

fn error_response(e: AnalyzerError) -> ApiError {
    let message = e.to_string();
    match e {
        AnalyzerError::StoreUnavailable(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": "store_unavailable", "message": message })))
        }
        AnalyzerError::Validation(_) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": "validation", "message": message })))
        }
        AnalyzerError::ComputationSkipped { post_id, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "ranking_stale", "message": message, "postId": post_id })),
        ),
    }
}

pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = state
        .words
        .store()
        .list_posts()
        .await
        .map_err(|e| error_response(e.into()))?;
    Ok(Json(posts))
}

pub async fn create_post(State(state): State<AppState>, Json(post): Json<NewPost>) -> Result<(StatusCode, Json<Post>), ApiError> {
    let created = state.words.create_post(post).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_post(State(state): State<AppState>, Path(post_id): Path<PostId>) -> Result<StatusCode, ApiError> {
    state.words.delete_post(post_id).await.map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn top_words(State(state): State<AppState>) -> Result<Json<Vec<RankedWord>>, ApiError> {
    let words = state.words.top_words().await.map_err(error_response)?;
    Ok(Json(words.to_vec()))
}
