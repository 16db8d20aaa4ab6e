use serde::{Deserialize, Serialize};

pub mod cache;
pub mod error;
pub mod orchestrator;
pub mod rank;
pub mod stats;
pub mod stopwords;
pub mod store;
pub mod tokenizer;

pub use cache::TopWordsCache;
pub use error::{AnalyzerError, StoreError};
pub use orchestrator::{RankingConfig, TopWordsService};
pub use store::{MemoryPostStore, PostStore};

pub type PostId = u64;

/// A post as owned by the record store. The analyzer only reads these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub post_id: PostId,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordStat {
    pub word: String,
    pub count: u32,
}

/// One entry of the ranked set. `weight` is count / max_count over the set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedWord {
    #[serde(rename = "name")]
    pub word: String,
    #[serde(rename = "size")]
    pub weight: f32,
}
