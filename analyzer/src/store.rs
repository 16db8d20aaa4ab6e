use crate::error::StoreError;
use crate::{NewPost, Post, PostId};
use async_trait::async_trait;
use parking_lot::RwLock;

/// The durable post record store, as seen by the analyzer.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError>;

    /// Deleting an unknown id is a no-op.
    async fn delete_post(&self, post_id: PostId) -> Result<(), StoreError>;
}

#[derive(Default)]
struct MemoryInner {
    next_id: PostId,
    posts: Vec<Post>,
}

/// In-process store. Ids start at 1; listing returns newest first.
#[derive(Default)]
pub struct MemoryPostStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryPostStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_posts<I: IntoIterator<Item = NewPost>>(posts: I) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.write();
            for p in posts {
                inner.next_id += 1;
                let post_id = inner.next_id;
                inner.posts.push(Post { post_id, title: p.title, content: p.content });
            }
        }
        store
    }

    pub fn len(&self) -> usize { self.inner.read().posts.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let inner = self.inner.read();
        Ok(inner.posts.iter().rev().cloned().collect())
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        if post.title.trim().is_empty() && post.content.trim().is_empty() {
            return Err(StoreError::Validation("title and content are both empty".into()));
        }
        let mut inner = self.inner.write();
        inner.next_id += 1;
        let created = Post { post_id: inner.next_id, title: post.title, content: post.content };
        inner.posts.push(created.clone());
        Ok(created)
    }

    async fn delete_post(&self, post_id: PostId) -> Result<(), StoreError> {
        self.inner.write().posts.retain(|p| p.post_id != post_id);
        Ok(())
    }
}
