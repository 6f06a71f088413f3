use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::services::category_service::normalize_category_pair;
use crate::features::categories::CategoryService;
use crate::features::reports::dtos::{CreateReportDto, ReportQueryParams, ReportResponseDto};
use crate::features::reports::models::Report;
use crate::features::suggestions::SuggestionCache;

/// Service for failure report intake
pub struct ReportService {
    pool: PgPool,
    suggestion_cache: Arc<SuggestionCache>,
}

impl ReportService {
    pub fn new(pool: PgPool, suggestion_cache: Arc<SuggestionCache>) -> Self {
        Self {
            pool,
            suggestion_cache,
        }
    }

    /// Record a report, creating its category and sub-category if needed.
    ///
    /// The category upserts and the report insert commit together.
    pub async fn create(&self, dto: CreateReportDto) -> Result<ReportResponseDto> {
        let description = dto.description.trim();
        if description.is_empty() {
            return Err(AppError::Validation(
                "description must not be blank".to_string(),
            ));
        }
        let (main, sub) = normalize_category_pair(&dto.main_category, &dto.sub_category)?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin report transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let (category, sub_category) = CategoryService::upsert_chain(&mut tx, &main, &sub).await?;

        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (description, main_category_name, sub_category_name)
            VALUES ($1, $2, $3)
            RETURNING id, description, main_category_name, sub_category_name, created_at
            "#,
        )
        .bind(description)
        .bind(&category.name)
        .bind(&sub_category.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit report: {:?}", e);
            AppError::Database(e)
        })?;

        // A new category pair may have been created
        self.suggestion_cache.clear().await;

        tracing::info!(
            "Report created: id={}, category={}/{}",
            report.id,
            report.main_category_name,
            report.sub_category_name
        );

        Ok(report.into())
    }

    /// Get report by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<ReportResponseDto> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            SELECT id, description, main_category_name, sub_category_name, created_at
            FROM reports
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        Ok(report.into())
    }

    /// List reports newest first with optional filters
    pub async fn list(&self, params: &ReportQueryParams) -> Result<(Vec<ReportResponseDto>, i64)> {
        let main_category = params
            .main_category
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let search = params.search_pattern();

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM reports
            WHERE ($1::text IS NULL OR main_category_name = $1)
              AND ($2::text IS NULL OR description ILIKE $2)
            "#,
        )
        .bind(main_category)
        .bind(search.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count reports: {:?}", e);
            AppError::Database(e)
        })?;

        let reports = sqlx::query_as::<_, Report>(
            r#"
            SELECT id, description, main_category_name, sub_category_name, created_at
            FROM reports
            WHERE ($1::text IS NULL OR main_category_name = $1)
              AND ($2::text IS NULL OR description ILIKE $2)
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(main_category)
        .bind(search.as_deref())
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((reports.into_iter().map(Into::into).collect(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::lazy_pool;

    fn dto(description: &str, main: &str, sub: &str) -> CreateReportDto {
        CreateReportDto {
            description: description.to_string(),
            main_category: main.to_string(),
            sub_category: sub.to_string(),
        }
    }

    async fn count(pool: &PgPool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_blank_fields_rejected_before_store() {
        let service = ReportService::new(lazy_pool(), Arc::new(SuggestionCache::new(4)));

        let err = service
            .create(dto("   ", "Elektrik", "Far Sistemi"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service
            .create(dto("far yanmıyor", "Elektrik", "  "))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_new_category_creates_chain_and_report(pool: PgPool) {
        let service = ReportService::new(pool.clone(), Arc::new(SuggestionCache::new(4)));

        let report = service
            .create(dto("ön far arızalı, ışık yanmıyor", "Elektrik", "Far Sistemi"))
            .await
            .unwrap();

        assert_eq!(report.main_category_name, "Elektrik");
        assert_eq!(report.sub_category_name, "Far Sistemi");
        assert_eq!(count(&pool, "failure_categories").await, 1);
        assert_eq!(count(&pool, "failure_sub_categories").await, 1);
        assert_eq!(count(&pool, "reports").await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_duplicate_reports_share_categories(pool: PgPool) {
        let service = ReportService::new(pool.clone(), Arc::new(SuggestionCache::new(4)));

        for _ in 0..2 {
            service
                .create(dto("boya kabarması", "Boya", "Kabarma"))
                .await
                .unwrap();
        }

        assert_eq!(count(&pool, "failure_categories").await, 1);
        assert_eq!(count(&pool, "failure_sub_categories").await, 1);
        assert_eq!(count(&pool, "reports").await, 2);

        let params = ReportQueryParams {
            page: 1,
            page_size: 10,
            main_category: Some("Boya".to_string()),
            search: Some("kabar".to_string()),
        };
        let (reports, total) = service.list(&params).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(reports.len(), 2);

        let fetched = service.get_by_id(reports[0].id).await.unwrap();
        assert_eq!(fetched.description, "boya kabarması");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_unknown_report_is_not_found(pool: PgPool) {
        let service = ReportService::new(pool, Arc::new(SuggestionCache::new(4)));

        let err = service.get_by_id(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
