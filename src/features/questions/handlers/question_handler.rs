use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::questions::dtos::{
    CreateQuestionDto, NotifyChecklistsDto, NotifyChecklistsResponseDto, QuestionQueryParams,
    QuestionResponseDto, UpdateQuestionDto,
};
use crate::features::questions::services::QuestionService;
use crate::shared::types::{ApiResponse, Meta};

/// Create a question
///
/// The new question is version 1 and the root of its own version chain.
#[utoipa::path(
    post,
    path = "/api/questions",
    request_body = CreateQuestionDto,
    responses(
        (status = 201, description = "Question created", body = ApiResponse<QuestionResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "questions"
)]
pub async fn create_question(
    State(service): State<Arc<QuestionService>>,
    AppJson(dto): AppJson<CreateQuestionDto>,
) -> Result<(StatusCode, Json<ApiResponse<QuestionResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let question = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(question), None, None)),
    ))
}

/// List questions
#[utoipa::path(
    get,
    path = "/api/questions",
    params(QuestionQueryParams),
    responses(
        (status = 200, description = "List of questions", body = ApiResponse<Vec<QuestionResponseDto>>),
    ),
    tag = "questions"
)]
pub async fn list_questions(
    State(service): State<Arc<QuestionService>>,
    Query(params): Query<QuestionQueryParams>,
) -> Result<Json<ApiResponse<Vec<QuestionResponseDto>>>> {
    let (questions, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(questions),
        None,
        Some(Meta { total }),
    )))
}

/// Get a question version by ID
#[utoipa::path(
    get,
    path = "/api/questions/{id}",
    params(
        ("id" = Uuid, Path, description = "Question version ID")
    ),
    responses(
        (status = 200, description = "Question found", body = ApiResponse<QuestionResponseDto>),
        (status = 404, description = "Question not found")
    ),
    tag = "questions"
)]
pub async fn get_question(
    State(service): State<Arc<QuestionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<QuestionResponseDto>>> {
    let question = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(question), None, None)))
}

/// Revise a question
///
/// Creates the next version of the question. The revised version is kept and
/// checklists that pinned it are not moved to the new version.
#[utoipa::path(
    put,
    path = "/api/questions/{id}",
    params(
        ("id" = Uuid, Path, description = "ID of the latest question version")
    ),
    request_body = UpdateQuestionDto,
    responses(
        (status = 200, description = "New version created", body = ApiResponse<QuestionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Question not found"),
        (status = 409, description = "Question version has been superseded")
    ),
    tag = "questions"
)]
pub async fn revise_question(
    State(service): State<Arc<QuestionService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateQuestionDto>,
) -> Result<Json<ApiResponse<QuestionResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let revision = service.revise(id, dto).await?;
    let message = format!(
        "Version {} created; {} checklist link(s) remain pinned to version {}",
        revision.question.version,
        revision.pinned_checklist_links,
        revision.question.version - 1
    );
    Ok(Json(ApiResponse::success(
        Some(revision.question),
        Some(message),
        None,
    )))
}

/// Version history of a question, newest first
#[utoipa::path(
    get,
    path = "/api/questions/{id}/versions",
    params(
        ("id" = Uuid, Path, description = "ID of any version in the chain")
    ),
    responses(
        (status = 200, description = "Version chain", body = ApiResponse<Vec<QuestionResponseDto>>),
        (status = 404, description = "Question not found")
    ),
    tag = "questions"
)]
pub async fn list_question_versions(
    State(service): State<Arc<QuestionService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<QuestionResponseDto>>>> {
    let versions = service.list_versions(id).await?;
    let total = versions.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(versions),
        None,
        Some(Meta { total }),
    )))
}

/// Re-assert checklist pins after a question version change
#[utoipa::path(
    post,
    path = "/api/questions/notify-checklists",
    request_body = NotifyChecklistsDto,
    responses(
        (status = 200, description = "Pins re-asserted", body = ApiResponse<NotifyChecklistsResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Question not found")
    ),
    tag = "questions"
)]
pub async fn notify_checklists(
    State(service): State<Arc<QuestionService>>,
    AppJson(dto): AppJson<NotifyChecklistsDto>,
) -> Result<Json<ApiResponse<NotifyChecklistsResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let checklist_links = service.notify_checklists(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(NotifyChecklistsResponseDto { checklist_links }),
        None,
        None,
    )))
}
