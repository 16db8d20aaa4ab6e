use analyzer::{MemoryPostStore, NewPost, Post, PostId, PostStore, RankingConfig, StoreError};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, json)
}

fn memory_app() -> Router {
    server::build_app_with_store(Arc::new(MemoryPostStore::new()), RankingConfig::default())
}

#[tokio::test]
async fn health_is_ok() {
    let app = memory_app();
    let resp = app.oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_corpus_returns_empty_word_list() {
    let app = memory_app();
    let (status, body) = call(&app, Method::GET, "/v1/word", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn words_follow_post_writes() {
    let app = memory_app();
    let (status, created) = call(
        &app,
        Method::POST,
        "/v1/post",
        Some(json!({ "title": "Hello world", "content": "hello rust world" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["postId"], 1);

    let (status, words) = call(&app, Method::GET, "/v1/word", None).await;
    assert_eq!(status, StatusCode::OK);
    let arr = words.as_array().unwrap();
    let names: Vec<&str> = arr.iter().map(|w| w["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["World", "Rust", "Hello"]);
    assert_eq!(arr[2]["size"].as_f64(), Some(1.0));

    let (status, _) = call(&app, Method::DELETE, "/v1/post/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, words) = call(&app, Method::GET, "/v1/word", None).await;
    assert_eq!(words, json!([]));

    let (_, posts) = call(&app, Method::GET, "/v1/post", None).await;
    assert_eq!(posts, json!([]));
}

#[tokio::test]
async fn blank_post_is_rejected() {
    let app = memory_app();
    let (status, body) = call(&app, Method::POST, "/v1/post", Some(json!({ "title": "", "content": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[derive(Default)]
struct ListingDownStore {
    inner: MemoryPostStore,
    down: AtomicBool,
}

#[async_trait]
impl PostStore for ListingDownStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("backend unreachable".into()));
        }
        self.inner.list_posts().await
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        self.inner.create_post(post).await
    }

    async fn delete_post(&self, post_id: PostId) -> Result<(), StoreError> {
        self.inner.delete_post(post_id).await
    }
}

#[tokio::test]
async fn stale_ranking_is_reported_distinctly() {
    let store = Arc::new(ListingDownStore::default());
    let app = server::build_app_with_store(store.clone(), RankingConfig::default());

    let (status, _) = call(&app, Method::POST, "/v1/post", Some(json!({ "title": "first", "content": "" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    store.down.store(true, Ordering::SeqCst);
    let (status, body) = call(&app, Method::POST, "/v1/post", Some(json!({ "title": "second", "content": "" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "ranking_stale");
    assert_eq!(body["postId"], 2);

    // the previous ranking is still served
    let (status, words) = call(&app, Method::GET, "/v1/word", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(words, json!([{ "name": "First", "size": 1.0 }]));

    let (status, body) = call(&app, Method::GET, "/v1/post", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "store_unavailable");
}

#[tokio::test]
async fn cold_read_with_store_down_fails() {
    let store = Arc::new(ListingDownStore::default());
    store.down.store(true, Ordering::SeqCst);
    let app = server::build_app_with_store(store, RankingConfig::default());

    let (status, body) = call(&app, Method::GET, "/v1/word", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "store_unavailable");
}
