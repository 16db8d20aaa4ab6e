use crate::stopwords::is_stopword;
use crate::Post;

const TRIM_CHARS: &[char] = &['.', ',', '!', ':', '+', '-'];
const MIN_TOKEN_CHARS: usize = 3;

/// Lazily split text on whitespace and yield normalized tokens.
///
/// Each raw token is trimmed of `. , ! : + -` on both ends and lowercased.
/// Tokens shorter than three characters or in the stop-word set are dropped;
/// survivors are re-cased with a leading capital ("HELLO" -> "Hello").
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().filter_map(normalize)
}

/// Tokens of a post's title followed by its content.
pub fn post_tokens(post: &Post) -> impl Iterator<Item = String> + '_ {
    tokenize(&post.title).chain(tokenize(&post.content))
}

/// Normalize a single raw token, or `None` if it should not be counted.
pub fn normalize(raw: &str) -> Option<String> {
    let lower = raw.trim_matches(TRIM_CHARS).to_lowercase();
    if lower.chars().count() < MIN_TOKEN_CHARS { return None; }
    if is_stopword(&lower) { return None; }
    Some(capitalize(&lower))
}

fn capitalize(lower: &str) -> String {
    let mut chars = lower.chars();
    match chars.next() {
        // keep one leading char; multi-char uppercase forms ("ß" -> "SS") stay as-is
        Some(first) => {
            let mut upper = first.to_uppercase();
            let lead = match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => first,
            };
            std::iter::once(lead).chain(chars).collect()
        }
        None => String::new(),
    }
}
