use crate::rank::TOP_N;
use crate::RankedWord;
use parking_lot::RwLock;
use std::sync::Arc;

pub const TOP_WORDS_KEY: &str = "topWords";

/// Published ranked set plus the number of publishes that preceded it.
#[derive(Debug, Clone)]
struct Entry {
    words: Arc<[RankedWord]>,
    generation: u64,
}

/// Single-slot store for the last ranked set.
///
/// The slot starts absent and is only ever replaced whole; there is no way to
/// clear it. Readers get a shared handle to an immutable sequence, so a reader
/// never sees a half-written value and the lock is held only for the swap.
#[derive(Debug)]
pub struct TopWordsCache {
    name: &'static str,
    slot: RwLock<Option<Entry>>,
}

impl Default for TopWordsCache {
    fn default() -> Self { Self::new() }
}

impl TopWordsCache {
    pub fn new() -> Self {
        Self { name: TOP_WORDS_KEY, slot: RwLock::new(None) }
    }

    pub(crate) fn name(&self) -> &'static str { self.name }

    /// Current contents. `None` means nothing has been computed yet;
    /// `Some` of an empty slice is a valid, computed result.
    pub fn get(&self) -> Option<Arc<[RankedWord]>> {
        self.slot.read().as_ref().map(|e| Arc::clone(&e.words))
    }

    /// Replace the slot wholesale. Visible to every `get` that starts after this returns.
    pub fn set(&self, mut words: Vec<RankedWord>) -> Arc<[RankedWord]> {
        if words.len() > TOP_N {
            tracing::warn!(cache = self.name, len = words.len(), "ranked set over capacity, truncating");
            words.truncate(TOP_N);
        }
        let words: Arc<[RankedWord]> = words.into();
        let mut slot = self.slot.write();
        let generation = slot.as_ref().map_or(1, |e| e.generation + 1);
        *slot = Some(Entry { words: Arc::clone(&words), generation });
        drop(slot);
        tracing::debug!(cache = self.name, generation, "cache slot replaced");
        words
    }

    /// Number of completed `set` calls; 0 while absent.
    pub fn generation(&self) -> u64 {
        self.slot.read().as_ref().map_or(0, |e| e.generation)
    }
}
