use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::checklists::ChecklistService;
use crate::features::questions::dtos::{
    CreateQuestionDto, NotifyChecklistsDto, QuestionQueryParams, QuestionResponseDto,
    UpdateQuestionDto,
};
use crate::features::questions::models::{NewQuestionVersion, QuestionCatalogEntry};
use crate::shared::text::{normalize_list, normalize_name};

/// Outcome of a question revision
#[derive(Debug, Clone)]
pub struct QuestionRevision {
    pub question: QuestionResponseDto,
    /// Checklist links that stayed pinned to the previous version
    pub pinned_checklist_links: u64,
}

/// Service for the versioned question catalog
pub struct QuestionService {
    pool: PgPool,
}

impl QuestionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the first version of a new question
    pub async fn create(&self, dto: CreateQuestionDto) -> Result<QuestionResponseDto> {
        let name = normalize_name(&dto.name)
            .ok_or_else(|| AppError::Validation("name must not be blank".to_string()))?;
        let question_type = normalize_name(&dto.question_type)
            .ok_or_else(|| AppError::Validation("type must not be blank".to_string()))?;

        let new_version = NewQuestionVersion::first(
            Uuid::now_v7(),
            name,
            dto.description.map(|d| d.trim().to_string()),
            question_type,
            dto.grade.map(|g| g.trim().to_string()),
            normalize_list(dto.tags),
            normalize_list(dto.images),
            normalize_list(dto.docs),
        );

        let mut conn = self.pool.acquire().await.map_err(|e| {
            tracing::error!("Failed to acquire connection: {:?}", e);
            AppError::Database(e)
        })?;
        let question = Self::insert_version(&mut conn, &new_version).await?;

        tracing::info!(
            "Question created: id={}, name={}",
            question.id,
            question.name
        );

        Ok(question.into())
    }

    /// Get any version of a question by its ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<QuestionResponseDto> {
        let question = sqlx::query_as::<_, QuestionCatalogEntry>(
            r#"
            SELECT id, root_id, name, description, question_type, grade, version,
                   is_latest, prev_id, tags, images, docs, created_at
            FROM question_catalog
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get question: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Question {} not found", id)))?;

        Ok(question.into())
    }

    /// List questions, latest versions only unless history is requested
    pub async fn list(
        &self,
        params: &QuestionQueryParams,
    ) -> Result<(Vec<QuestionResponseDto>, i64)> {
        let search = params.search_pattern();
        let tag = params.tag_filter();

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM question_catalog
            WHERE ($1 OR is_latest)
              AND ($2::text IS NULL OR name ILIKE $2 OR description ILIKE $2)
              AND ($3::text IS NULL OR $3 = ANY(tags))
            "#,
        )
        .bind(params.include_history)
        .bind(search.as_deref())
        .bind(tag.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count questions: {:?}", e);
            AppError::Database(e)
        })?;

        let questions = sqlx::query_as::<_, QuestionCatalogEntry>(
            r#"
            SELECT id, root_id, name, description, question_type, grade, version,
                   is_latest, prev_id, tags, images, docs, created_at
            FROM question_catalog
            WHERE ($1 OR is_latest)
              AND ($2::text IS NULL OR name ILIKE $2 OR description ILIKE $2)
              AND ($3::text IS NULL OR $3 = ANY(tags))
            ORDER BY name, root_id, version DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(params.include_history)
        .bind(search.as_deref())
        .bind(tag.as_deref())
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list questions: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((questions.into_iter().map(Into::into).collect(), total))
    }

    /// Every version in the chain of the given question, newest first
    pub async fn list_versions(&self, id: Uuid) -> Result<Vec<QuestionResponseDto>> {
        let versions = sqlx::query_as::<_, QuestionCatalogEntry>(
            r#"
            SELECT id, root_id, name, description, question_type, grade, version,
                   is_latest, prev_id, tags, images, docs, created_at
            FROM question_catalog
            WHERE root_id = (SELECT root_id FROM question_catalog WHERE id = $1)
            ORDER BY version DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list question versions: {:?}", e);
            AppError::Database(e)
        })?;

        if versions.is_empty() {
            return Err(AppError::NotFound(format!("Question {} not found", id)));
        }

        Ok(versions.into_iter().map(Into::into).collect())
    }

    /// Revise a question by creating its next version.
    ///
    /// Only the chain head can be revised. The previous version stays in the
    /// catalog and checklists that pinned it keep pointing at it.
    pub async fn revise(&self, id: Uuid, dto: UpdateQuestionDto) -> Result<QuestionRevision> {
        let changes = dto.into_changes()?;
        if changes.is_empty() {
            return Err(AppError::Validation(
                "At least one field must be provided".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin revision transaction: {:?}", e);
            AppError::Database(e)
        })?;

        // Row lock serialises concurrent revisions of the same head
        let current = sqlx::query_as::<_, QuestionCatalogEntry>(
            r#"
            SELECT id, root_id, name, description, question_type, grade, version,
                   is_latest, prev_id, tags, images, docs, created_at
            FROM question_catalog
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load question for revision: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Question {} not found", id)))?;

        if !current.is_latest {
            return Err(AppError::Conflict(format!(
                "Question {} is version {} and has been superseded; revise the latest version",
                current.id, current.version
            )));
        }

        sqlx::query("UPDATE question_catalog SET is_latest = FALSE WHERE id = $1")
            .bind(current.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to retire question version: {:?}", e);
                AppError::Database(e)
            })?;

        let next = current.revise(Uuid::now_v7(), changes);
        let question = Self::insert_version(&mut tx, &next).await?;

        let pinned_checklist_links =
            ChecklistService::reassert_pins(&mut tx, current.id, current.version).await?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit question revision: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Question revised: root={}, v{} ({}) -> v{} ({}), {} checklist link(s) kept v{}",
            question.root_id,
            current.version,
            current.id,
            question.version,
            question.id,
            pinned_checklist_links,
            current.version
        );

        Ok(QuestionRevision {
            question: question.into(),
            pinned_checklist_links,
        })
    }

    /// Re-assert the pinned version of every checklist link to a question
    pub async fn notify_checklists(&self, dto: NotifyChecklistsDto) -> Result<u64> {
        if dto.new_version <= dto.prev_version {
            return Err(AppError::Validation(format!(
                "newVersion ({}) must be greater than prevVersion ({})",
                dto.new_version, dto.prev_version
            )));
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin notify transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let question = sqlx::query_as::<_, QuestionCatalogEntry>(
            r#"
            SELECT id, root_id, name, description, question_type, grade, version,
                   is_latest, prev_id, tags, images, docs, created_at
            FROM question_catalog
            WHERE id = $1
            "#,
        )
        .bind(dto.question_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load question: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Question {} not found", dto.question_id)))?;

        if question.version != dto.prev_version && question.version != dto.new_version {
            tracing::warn!(
                "Checklist notification for question {} (v{}) names v{} -> v{}",
                question.id,
                question.version,
                dto.prev_version,
                dto.new_version
            );
        }

        let links = ChecklistService::reassert_pins(&mut tx, question.id, question.version).await?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit checklist notification: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Re-asserted {} checklist pin(s) for question {} (v{} -> v{})",
            links,
            question.id,
            dto.prev_version,
            dto.new_version
        );

        Ok(links)
    }

    async fn insert_version(
        conn: &mut PgConnection,
        new_version: &NewQuestionVersion,
    ) -> Result<QuestionCatalogEntry> {
        sqlx::query_as::<_, QuestionCatalogEntry>(
            r#"
            INSERT INTO question_catalog (
                id, root_id, name, description, question_type, grade, version,
                is_latest, prev_id, tags, images, docs
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8, $9, $10, $11)
            RETURNING id, root_id, name, description, question_type, grade, version,
                      is_latest, prev_id, tags, images, docs, created_at
            "#,
        )
        .bind(new_version.id)
        .bind(new_version.root_id)
        .bind(&new_version.name)
        .bind(&new_version.description)
        .bind(&new_version.question_type)
        .bind(&new_version.grade)
        .bind(new_version.version)
        .bind(new_version.prev_id)
        .bind(&new_version.tags)
        .bind(&new_version.images)
        .bind(&new_version.docs)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| handle_db_error(e, "This question already has a newer version"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::lazy_pool;

    fn create_dto(name: &str) -> CreateQuestionDto {
        CreateQuestionDto {
            name: name.to_string(),
            description: Some("Sol ve sağ far yüksekliği".to_string()),
            question_type: "yes_no".to_string(),
            grade: Some("B".to_string()),
            tags: vec!["elektrik".to_string()],
            images: Vec::new(),
            docs: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_revise_without_changes_is_rejected() {
        let service = QuestionService::new(lazy_pool());

        let err = service
            .revise(Uuid::now_v7(), UpdateQuestionDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_notify_rejects_non_increasing_versions() {
        let service = QuestionService::new(lazy_pool());

        let err = service
            .notify_checklists(NotifyChecklistsDto {
                question_id: Uuid::now_v7(),
                new_version: 2,
                prev_version: 2,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let service = QuestionService::new(lazy_pool());

        let err = service.create(create_dto("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_revise_creates_linked_version(pool: PgPool) {
        let service = QuestionService::new(pool);
        let v1 = service.create(create_dto("Far ayarı kontrolü")).await.unwrap();
        assert_eq!(v1.version, 1);
        assert_eq!(v1.root_id, v1.id);

        let revision = service
            .revise(
                v1.id,
                UpdateQuestionDto {
                    grade: Some("A".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let v2 = revision.question;

        assert_eq!(v2.version, 2);
        assert_eq!(v2.prev_id, Some(v1.id));
        assert_eq!(v2.root_id, v1.id);
        assert!(v2.is_latest);
        assert_eq!(v2.grade.as_deref(), Some("A"));
        assert_eq!(v2.name, v1.name);

        let old = service.get_by_id(v1.id).await.unwrap();
        assert!(!old.is_latest);

        let versions = service.list_versions(v2.id).await.unwrap();
        let numbers: Vec<i32> = versions.iter().map(|v| v.version).collect();
        assert_eq!(numbers, vec![2, 1]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_superseded_version_cannot_be_revised(pool: PgPool) {
        let service = QuestionService::new(pool);
        let v1 = service.create(create_dto("Kapı boşluğu")).await.unwrap();
        let changes = UpdateQuestionDto {
            name: Some("Kapı boşluğu ölçümü".to_string()),
            ..Default::default()
        };

        service.revise(v1.id, changes.clone()).await.unwrap();
        let err = service.revise(v1.id, changes).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_unknown_question_is_not_created_on_revise(pool: PgPool) {
        let service = QuestionService::new(pool.clone());

        let err = service
            .revise(
                Uuid::now_v7(),
                UpdateQuestionDto {
                    name: Some("Yeni".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM question_catalog")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_list_hides_superseded_versions(pool: PgPool) {
        let service = QuestionService::new(pool);
        let v1 = service.create(create_dto("Boya kalınlığı")).await.unwrap();
        service
            .revise(
                v1.id,
                UpdateQuestionDto {
                    tags: Some(vec!["boya".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let mut params = QuestionQueryParams {
            page: 1,
            page_size: 10,
            search: None,
            tag: None,
            include_history: false,
        };
        let (latest, total) = service.list(&params).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(latest[0].version, 2);

        params.include_history = true;
        let (_, total) = service.list(&params).await.unwrap();
        assert_eq!(total, 2);

        params.include_history = false;
        params.tag = Some("boya".to_string());
        let (tagged, _) = service.list(&params).await.unwrap();
        assert_eq!(tagged.len(), 1);
    }
}
