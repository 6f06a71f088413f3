use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::CategoryService;
use crate::features::suggestions::cache::SuggestionCache;
use crate::features::suggestions::dtos::CategorySuggestionDto;
use crate::features::suggestions::scorer;

/// Suggests failure categories for free-text descriptions
pub struct SuggestionService {
    category_service: Arc<CategoryService>,
    cache: Arc<SuggestionCache>,
}

impl SuggestionService {
    pub fn new(category_service: Arc<CategoryService>, cache: Arc<SuggestionCache>) -> Self {
        Self {
            category_service,
            cache,
        }
    }

    /// Ranked suggestions for a description, served from cache when possible
    pub async fn suggest(&self, description: &str) -> Result<Vec<CategorySuggestionDto>> {
        if description.trim().is_empty() {
            return Ok(Vec::new());
        }

        if let Some(cached) = self.cache.get(description).await {
            tracing::debug!("Suggestion cache hit ({} chars)", description.len());
            return Ok(cached);
        }

        let generation = self.cache.generation().await;
        let categories = self.category_service.list_groups().await?;

        let suggestions: Vec<CategorySuggestionDto> = scorer::suggest(description, &categories)
            .into_iter()
            .map(CategorySuggestionDto::from)
            .collect();

        let stored = self
            .cache
            .insert_at(generation, description.to_string(), suggestions.clone())
            .await;

        tracing::debug!(
            "Scored description against {} categories: {} suggestions (cached={})",
            categories.len(),
            suggestions.len(),
            stored
        );

        Ok(suggestions)
    }
}
