use crate::tokenizer::post_tokens;
use crate::Post;
use std::collections::HashMap;

pub type WordCounts = HashMap<String, u32>;

/// Count normalized tokens over every post. Order of `posts` does not affect the result.
pub fn aggregate<'a, I>(posts: I) -> WordCounts
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut counts = WordCounts::new();
    for post in posts {
        for token in post_tokens(post) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }
    counts
}
