use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::checklists::dtos::{
    AttachQuestionDto, ChecklistDetailDto, ChecklistQueryParams, ChecklistQuestionLinkDto,
    ChecklistResponseDto, CreateChecklistDto,
};
use crate::features::checklists::models::{
    Checklist, ChecklistQuestionLink, ChecklistSummaryRow, PinnedQuestionRow,
};
use crate::features::questions::models::QuestionCatalogEntry;
use crate::shared::text::normalize_name;

/// Service for checklists and their pinned question versions
pub struct ChecklistService {
    pool: PgPool,
}

impl ChecklistService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateChecklistDto) -> Result<ChecklistResponseDto> {
        let name = normalize_name(&dto.name)
            .ok_or_else(|| AppError::Validation("name must not be blank".to_string()))?;
        let description = dto
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let checklist = sqlx::query_as::<_, Checklist>(
            r#"
            INSERT INTO checklists (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(&name)
        .bind(&description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create checklist: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Checklist created: id={}, name={}", checklist.id, checklist.name);

        Ok(checklist.into())
    }

    /// Get a checklist with its pinned questions in position order.
    ///
    /// Each question is rendered from the version row the checklist pinned,
    /// not from the latest version of the question.
    pub async fn get(&self, id: Uuid) -> Result<ChecklistDetailDto> {
        let checklist = sqlx::query_as::<_, Checklist>(
            "SELECT id, name, description, created_at FROM checklists WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get checklist: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Checklist {} not found", id)))?;

        let questions = sqlx::query_as::<_, PinnedQuestionRow>(
            r#"
            SELECT cq.question_id, q.root_id, cq.version AS pinned_version, cq.position,
                   q.name, q.description, q.question_type, q.grade, q.is_latest,
                   cq.created_at AS attached_at
            FROM checklist_questions cq
            JOIN question_catalog q ON q.id = cq.question_id
            WHERE cq.checklist_id = $1
            ORDER BY cq.position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load checklist questions: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(ChecklistDetailDto::new(checklist, questions))
    }

    pub async fn list(
        &self,
        params: &ChecklistQueryParams,
    ) -> Result<(Vec<ChecklistResponseDto>, i64)> {
        let search = params.search_pattern();

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM checklists WHERE ($1::text IS NULL OR name ILIKE $1)",
        )
        .bind(search.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count checklists: {:?}", e);
            AppError::Database(e)
        })?;

        let checklists = sqlx::query_as::<_, ChecklistSummaryRow>(
            r#"
            SELECT c.id, c.name, c.description, COUNT(cq.question_id) AS question_count,
                   c.created_at
            FROM checklists c
            LEFT JOIN checklist_questions cq ON cq.checklist_id = c.id
            WHERE ($1::text IS NULL OR c.name ILIKE $1)
            GROUP BY c.id
            ORDER BY c.created_at DESC, c.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search.as_deref())
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list checklists: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((checklists.into_iter().map(Into::into).collect(), total))
    }

    /// Attach a question version to a checklist, pinning that version
    pub async fn attach_question(
        &self,
        checklist_id: Uuid,
        dto: AttachQuestionDto,
    ) -> Result<ChecklistQuestionLinkDto> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin attach transaction: {:?}", e);
            AppError::Database(e)
        })?;

        // Locking the checklist serialises position assignment
        let locked: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM checklists WHERE id = $1 FOR UPDATE")
                .bind(checklist_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to lock checklist: {:?}", e);
                    AppError::Database(e)
                })?;
        if locked.is_none() {
            return Err(AppError::NotFound(format!(
                "Checklist {} not found",
                checklist_id
            )));
        }

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

        let already_attached: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM checklist_questions cq
                JOIN question_catalog q ON q.id = cq.question_id
                WHERE cq.checklist_id = $1 AND q.root_id = $2
            )
            "#,
        )
        .bind(checklist_id)
        .bind(question.root_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check checklist links: {:?}", e);
            AppError::Database(e)
        })?;
        if already_attached {
            return Err(AppError::Conflict(format!(
                "A version of question {} is already attached to checklist {}",
                question.root_id, checklist_id
            )));
        }

        let position: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position), 0) + 1 FROM checklist_questions WHERE checklist_id = $1",
        )
        .bind(checklist_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to compute checklist position: {:?}", e);
            AppError::Database(e)
        })?;

        let link = sqlx::query_as::<_, ChecklistQuestionLink>(
            r#"
            INSERT INTO checklist_questions (checklist_id, question_id, version, position)
            VALUES ($1, $2, $3, $4)
            RETURNING checklist_id, question_id, version, position, created_at
            "#,
        )
        .bind(checklist_id)
        .bind(question.id)
        .bind(question.version)
        .bind(position)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| handle_db_error(e, "Question is already attached to this checklist"))?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit attach: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Question {} pinned at v{} in checklist {} (position {})",
            link.question_id,
            link.version,
            link.checklist_id,
            link.position
        );

        Ok(link.into())
    }

    pub async fn detach_question(&self, checklist_id: Uuid, question_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM checklist_questions WHERE checklist_id = $1 AND question_id = $2",
        )
        .bind(checklist_id)
        .bind(question_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to detach question: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Question {} is not attached to checklist {}",
                question_id, checklist_id
            )));
        }

        tracing::info!(
            "Question {} detached from checklist {}",
            question_id,
            checklist_id
        );

        Ok(())
    }

    /// Write back the pinned version of every link to `question_id`.
    ///
    /// Runs on the caller's connection so it commits with the revision that
    /// triggered it. Returns the number of links touched.
    pub async fn reassert_pins(
        conn: &mut PgConnection,
        question_id: Uuid,
        question_version: i32,
    ) -> Result<u64> {
        let links = sqlx::query_as::<_, ChecklistQuestionLink>(
            r#"
            SELECT checklist_id, question_id, version, position, created_at
            FROM checklist_questions
            WHERE question_id = $1
            FOR UPDATE
            "#,
        )
        .bind(question_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load checklist links: {:?}", e);
            AppError::Database(e)
        })?;

        let mut touched = 0;
        for link in &links {
            let result = sqlx::query(
                r#"
                UPDATE checklist_questions
                SET version = $3
                WHERE checklist_id = $1 AND question_id = $2
                "#,
            )
            .bind(link.checklist_id)
            .bind(link.question_id)
            .bind(link.pinned_version(question_version))
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to re-assert checklist pin: {:?}", e);
                AppError::Database(e)
            })?;
            touched += result.rows_affected();
        }

        Ok(touched)
    }
}
