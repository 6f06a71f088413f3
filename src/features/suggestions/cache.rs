use std::num::NonZeroUsize;

use lru::LruCache;
use tokio::sync::Mutex;

use crate::features::suggestions::dtos::CategorySuggestionDto;

struct CacheState {
    entries: LruCache<String, Vec<CategorySuggestionDto>>,
    /// Bumped on every clear so results computed before a category change
    /// are not stored afterwards.
    generation: u64,
}

/// Bounded LRU cache of suggestion results keyed by the exact description
pub struct SuggestionCache {
    state: Mutex<CacheState>,
}

impl std::fmt::Debug for SuggestionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionCache").finish_non_exhaustive()
    }
}

impl SuggestionCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                generation: 0,
            }),
        }
    }

    pub async fn get(&self, description: &str) -> Option<Vec<CategorySuggestionDto>> {
        let mut state = self.state.lock().await;
        state.entries.get(description).cloned()
    }

    /// Current generation, to be passed back to [`Self::insert_at`]
    pub async fn generation(&self) -> u64 {
        self.state.lock().await.generation
    }

    /// Store a result computed while `generation` was current.
    ///
    /// Returns false and stores nothing if the cache was cleared meanwhile.
    pub async fn insert_at(
        &self,
        generation: u64,
        description: String,
        suggestions: Vec<CategorySuggestionDto>,
    ) -> bool {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            return false;
        }
        state.entries.put(description, suggestions);
        true
    }

    #[cfg(test)]
    pub async fn insert(&self, description: String, suggestions: Vec<CategorySuggestionDto>) {
        let mut state = self.state.lock().await;
        state.entries.put(description, suggestions);
    }

    /// Drop every entry. Called whenever the category taxonomy changes.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.generation = state.generation.wrapping_add(1);
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(sub: &str) -> Vec<CategorySuggestionDto> {
        vec![CategorySuggestionDto {
            main_category: "Elektrik".to_string(),
            sub_category: sub.to_string(),
        }]
    }

    #[test]
    fn test_hit_after_insert() {
        tokio_test::block_on(async {
            let cache = SuggestionCache::new(4);
            cache.insert("far".to_string(), suggestion("Far Sistemi")).await;

            assert_eq!(cache.get("far").await, Some(suggestion("Far Sistemi")));
            assert_eq!(cache.get("Far").await, None);
        });
    }

    #[test]
    fn test_never_exceeds_capacity_and_evicts_least_recent() {
        tokio_test::block_on(async {
            let cache = SuggestionCache::new(2);
            cache.insert("a".to_string(), suggestion("A")).await;
            cache.insert("b".to_string(), suggestion("B")).await;

            // Touch "a" so "b" becomes the eviction candidate
            assert!(cache.get("a").await.is_some());
            cache.insert("c".to_string(), suggestion("C")).await;

            assert_eq!(cache.len().await, 2);
            assert!(cache.get("a").await.is_some());
            assert!(cache.get("b").await.is_none());
            assert!(cache.get("c").await.is_some());
        });
    }

    #[test]
    fn test_zero_capacity_is_treated_as_one() {
        tokio_test::block_on(async {
            let cache = SuggestionCache::new(0);
            cache.insert("a".to_string(), suggestion("A")).await;
            cache.insert("b".to_string(), suggestion("B")).await;
            assert_eq!(cache.len().await, 1);
        });
    }

    #[test]
    fn test_clear_rejects_stale_generation() {
        tokio_test::block_on(async {
            let cache = SuggestionCache::new(4);
            let generation = cache.generation().await;

            cache.clear().await;

            let stored = cache
                .insert_at(generation, "far".to_string(), suggestion("Far Sistemi"))
                .await;
            assert!(!stored);
            assert_eq!(cache.len().await, 0);

            let current = cache.generation().await;
            assert!(
                cache
                    .insert_at(current, "far".to_string(), suggestion("Far Sistemi"))
                    .await
            );
            assert_eq!(cache.len().await, 1);
        });
    }
}
