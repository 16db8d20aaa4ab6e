use analyzer::{NewPost, Post, PostId, PostStore, StoreError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Post store reached over HTTP at `{base}/v1/post`.
pub struct HttpPostStore {
    client: Client,
    base: String,
}

impl HttpPostStore {
    pub fn new(base: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base: base.trim_end_matches('/').to_string() })
    }

    fn posts_url(&self) -> String { format!("{}/v1/post", self.base) }
}

fn unavailable(e: reqwest::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl PostStore for HttpPostStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let resp = self.client.get(self.posts_url()).send().await.map_err(unavailable)?;
        if !resp.status().is_success() {
            return Err(StoreError::Unavailable(format!("listing posts returned {}", resp.status())));
        }
        resp.json::<Vec<Post>>().await.map_err(unavailable)
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let resp = self.client.post(self.posts_url()).json(&post).send().await.map_err(unavailable)?;
        let status = resp.status();
        if status.is_client_error() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Validation(format!("{status}: {body}")));
        }
        if !status.is_success() {
            return Err(StoreError::Unavailable(format!("creating post returned {status}")));
        }
        resp.json::<Post>().await.map_err(unavailable)
    }

    async fn delete_post(&self, post_id: PostId) -> Result<(), StoreError> {
        let url = format!("{}/{post_id}", self.posts_url());
        let resp = self.client.delete(url).send().await.map_err(unavailable)?;
        let status = resp.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(StoreError::Unavailable(format!("deleting post {post_id} returned {status}")))
        }
    }
}
