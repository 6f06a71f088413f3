use std::sync::Arc;

use sqlx::{PgConnection, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryListItemDto, CategoryResponseDto, UpsertCategoryDto,
};
use crate::features::categories::models::{
    CategoryGroup, CategoryPairRow, FailureCategory, FailureSubCategory,
};
use crate::features::suggestions::SuggestionCache;
use crate::shared::text::normalize_name;

/// Normalise a (main, sub) category pair, rejecting blank names
pub fn normalize_category_pair(main: &str, sub: &str) -> Result<(String, String)> {
    let main = normalize_name(main)
        .ok_or_else(|| AppError::Validation("mainCategory must not be blank".to_string()))?;
    let sub = normalize_name(sub)
        .ok_or_else(|| AppError::Validation("subCategory must not be blank".to_string()))?;
    Ok((main, sub))
}

/// Service for the failure category taxonomy
pub struct CategoryService {
    pool: PgPool,
    suggestion_cache: Arc<SuggestionCache>,
}

impl CategoryService {
    pub fn new(pool: PgPool, suggestion_cache: Arc<SuggestionCache>) -> Self {
        Self {
            pool,
            suggestion_cache,
        }
    }

    /// Upsert a main category and one of its sub-categories
    pub async fn upsert(&self, dto: UpsertCategoryDto) -> Result<CategoryResponseDto> {
        let (main, sub) = normalize_category_pair(&dto.main_category, &dto.sub_category)?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin category transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let chain = Self::upsert_chain(&mut tx, &main, &sub).await?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit category upsert: {:?}", e);
            AppError::Database(e)
        })?;

        self.suggestion_cache.clear().await;

        tracing::info!(
            "Category upserted: main={} ({}), sub={} ({})",
            chain.0.name,
            chain.0.id,
            chain.1.name,
            chain.1.id
        );

        Ok(chain.into())
    }

    /// Upsert the category chain on an existing connection or transaction.
    ///
    /// Names must already be normalised. Existing rows are returned unchanged.
    pub async fn upsert_chain(
        conn: &mut PgConnection,
        main: &str,
        sub: &str,
    ) -> Result<(FailureCategory, FailureSubCategory)> {
        // The no-op update makes RETURNING yield the existing row on conflict
        let category = sqlx::query_as::<_, FailureCategory>(
            r#"
            INSERT INTO failure_categories (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name, created_at
            "#,
        )
        .bind(main)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert failure category: {:?}", e);
            AppError::Database(e)
        })?;

        let sub_category = sqlx::query_as::<_, FailureSubCategory>(
            r#"
            INSERT INTO failure_sub_categories (name, main_category_id)
            VALUES ($1, $2)
            ON CONFLICT (name, main_category_id) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name, main_category_id, created_at
            "#,
        )
        .bind(sub)
        .bind(category.id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert failure sub-category: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((category, sub_category))
    }

    /// All categories grouped with their sub-categories, ordered by name
    pub async fn list_groups(&self) -> Result<Vec<CategoryGroup>> {
        let rows = sqlx::query_as::<_, CategoryPairRow>(
            r#"
            SELECT c.name AS main_category, s.name AS sub_category
            FROM failure_categories c
            LEFT JOIN failure_sub_categories s ON s.main_category_id = c.id
            ORDER BY c.name, s.name NULLS FIRST
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(CategoryGroup::from_rows(rows))
    }

    /// Categories in the select-option shape used by the intake form
    pub async fn list(&self) -> Result<Vec<CategoryListItemDto>> {
        let groups = self.list_groups().await?;
        Ok(groups.into_iter().map(CategoryListItemDto::from).collect())
    }
}
