use crate::stats::WordCounts;
use crate::{RankedWord, WordStat};

/// Maximum number of words in a ranked set.
pub const TOP_N: usize = 10;

/// Select the top `TOP_N` words by count and weight them against the largest count.
///
/// Count decides membership; ties at the cut-off go to the lexicographically
/// smaller word so the selection is deterministic. The returned sequence is
/// ordered descending by word, not by weight.
pub fn rank(counts: &WordCounts) -> Vec<RankedWord> {
    let mut stats: Vec<WordStat> = counts
        .iter()
        .map(|(word, &count)| WordStat { word: word.clone(), count })
        .collect();
    stats.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    stats.truncate(TOP_N);

    let max = match stats.first() {
        Some(top) => top.count as f32,
        None => return Vec::new(),
    };
    let mut ranked: Vec<RankedWord> = stats
        .into_iter()
        .map(|s| RankedWord { weight: s.count as f32 / max, word: s.word })
        .collect();
    ranked.sort_unstable_by(|a, b| b.word.cmp(&a.word));
    ranked
}
