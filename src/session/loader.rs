// SPDX-License-Identifier: MPL-2.0
//! Preload/load coordination.
//!
//! Tracks the decode state of every item so the session never issues the
//! same decode twice, and keeps a small LRU cache of decoded natural
//! sizes keyed by media URL, so re-opening a gallery over the same media
//! skips the decode round-trip entirely.

use crate::geometry::Size;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Maximum number of decoded natural sizes remembered across sessions.
pub const SIZE_CACHE_CAPACITY: usize = 64;

/// Decode state of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Decoding,
    Loaded,
    Failed,
}

/// Per-session decode bookkeeping plus the cross-session size cache.
pub struct LoadCoordinator {
    states: Vec<LoadState>,
    size_cache: LruCache<String, Size>,
}

impl std::fmt::Debug for LoadCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadCoordinator")
            .field("states", &self.states)
            .field("cached_sizes", &self.size_cache.len())
            .finish()
    }
}

impl LoadCoordinator {
    /// # Panics
    ///
    /// Panics if `SIZE_CACHE_CAPACITY` is zero, which would indicate a
    /// build configuration error.
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            size_cache: LruCache::new(
                NonZeroUsize::new(SIZE_CACHE_CAPACITY).expect("cache capacity must be non-zero"),
            ),
        }
    }

    /// Starts bookkeeping for a fresh item list. The size cache survives
    /// so repeated opens over the same media stay warm.
    pub fn reset(&mut self, item_count: usize) {
        self.states = vec![LoadState::Idle; item_count];
    }

    #[must_use]
    pub fn state(&self, index: usize) -> LoadState {
        self.states.get(index).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_loaded(&self, index: usize) -> bool {
        self.state(index) == LoadState::Loaded
    }

    /// Transitions an item to `Decoding`. Returns `false` when a decode
    /// is already in flight, finished, or failed; the caller must not
    /// issue another request then.
    pub fn begin(&mut self, index: usize) -> bool {
        match self.states.get_mut(index) {
            Some(state @ LoadState::Idle) => {
                *state = LoadState::Decoding;
                true
            }
            _ => false,
        }
    }

    /// Looks up a previously decoded natural size for a media URL.
    pub fn cached(&mut self, url: &str) -> Option<Size> {
        self.size_cache.get(url).copied()
    }

    /// Marks an item decoded and remembers its natural size.
    pub fn complete(&mut self, index: usize, url: &str, natural: Size) {
        if let Some(state) = self.states.get_mut(index) {
            *state = LoadState::Loaded;
        }
        self.size_cache.put(url.to_owned(), natural);
    }

    /// Marks an item failed. Failed items are not retried within the
    /// session.
    pub fn fail(&mut self, index: usize) {
        if let Some(state) = self.states.get_mut(index) {
            *state = LoadState::Failed;
        }
    }
}

impl Default for LoadCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_transitions_idle_to_decoding_once() {
        let mut loader = LoadCoordinator::new();
        loader.reset(3);

        assert!(loader.begin(1));
        assert_eq!(loader.state(1), LoadState::Decoding);

        // second request while in flight is refused
        assert!(!loader.begin(1));
    }

    #[test]
    fn complete_marks_loaded_and_caches_size() {
        let mut loader = LoadCoordinator::new();
        loader.reset(2);

        loader.begin(0);
        loader.complete(0, "photo.jpg", Size::new(1920.0, 1080.0));

        assert!(loader.is_loaded(0));
        assert_eq!(loader.cached("photo.jpg"), Some(Size::new(1920.0, 1080.0)));
    }

    #[test]
    fn size_cache_survives_reset() {
        let mut loader = LoadCoordinator::new();
        loader.reset(1);
        loader.begin(0);
        loader.complete(0, "photo.jpg", Size::new(640.0, 480.0));

        loader.reset(5);
        assert_eq!(loader.state(0), LoadState::Idle);
        assert_eq!(loader.cached("photo.jpg"), Some(Size::new(640.0, 480.0)));
    }

    #[test]
    fn failed_items_are_not_retried() {
        let mut loader = LoadCoordinator::new();
        loader.reset(1);

        loader.begin(0);
        loader.fail(0);

        assert_eq!(loader.state(0), LoadState::Failed);
        assert!(!loader.begin(0));
    }

    #[test]
    fn out_of_range_index_reports_idle() {
        let loader = LoadCoordinator::new();
        assert_eq!(loader.state(10), LoadState::Idle);
    }
}
