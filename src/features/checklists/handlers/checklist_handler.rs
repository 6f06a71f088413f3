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
use crate::features::checklists::dtos::{
    AttachQuestionDto, ChecklistDetailDto, ChecklistQueryParams, ChecklistQuestionLinkDto,
    ChecklistResponseDto, CreateChecklistDto,
};
use crate::features::checklists::services::ChecklistService;
use crate::shared::types::{ApiResponse, Meta};

/// Create a checklist
#[utoipa::path(
    post,
    path = "/api/checklists",
    request_body = CreateChecklistDto,
    responses(
        (status = 201, description = "Checklist created", body = ApiResponse<ChecklistResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "checklists"
)]
pub async fn create_checklist(
    State(service): State<Arc<ChecklistService>>,
    AppJson(dto): AppJson<CreateChecklistDto>,
) -> Result<(StatusCode, Json<ApiResponse<ChecklistResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let checklist = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(checklist), None, None)),
    ))
}

/// List checklists
#[utoipa::path(
    get,
    path = "/api/checklists",
    params(ChecklistQueryParams),
    responses(
        (status = 200, description = "List of checklists", body = ApiResponse<Vec<ChecklistResponseDto>>),
    ),
    tag = "checklists"
)]
pub async fn list_checklists(
    State(service): State<Arc<ChecklistService>>,
    Query(params): Query<ChecklistQueryParams>,
) -> Result<Json<ApiResponse<Vec<ChecklistResponseDto>>>> {
    let (checklists, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(checklists),
        None,
        Some(Meta { total }),
    )))
}

/// Get a checklist with its pinned questions
#[utoipa::path(
    get,
    path = "/api/checklists/{id}",
    params(
        ("id" = Uuid, Path, description = "Checklist ID")
    ),
    responses(
        (status = 200, description = "Checklist found", body = ApiResponse<ChecklistDetailDto>),
        (status = 404, description = "Checklist not found")
    ),
    tag = "checklists"
)]
pub async fn get_checklist(
    State(service): State<Arc<ChecklistService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ChecklistDetailDto>>> {
    let checklist = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(checklist), None, None)))
}

/// Attach a question to a checklist
///
/// The checklist pins the version of the referenced question row.
#[utoipa::path(
    post,
    path = "/api/checklists/{id}/questions",
    params(
        ("id" = Uuid, Path, description = "Checklist ID")
    ),
    request_body = AttachQuestionDto,
    responses(
        (status = 201, description = "Question attached", body = ApiResponse<ChecklistQuestionLinkDto>),
        (status = 404, description = "Checklist or question not found"),
        (status = 409, description = "Question already attached")
    ),
    tag = "checklists"
)]
pub async fn attach_question(
    State(service): State<Arc<ChecklistService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AttachQuestionDto>,
) -> Result<(StatusCode, Json<ApiResponse<ChecklistQuestionLinkDto>>)> {
    let link = service.attach_question(id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(link), None, None)),
    ))
}

/// Detach a question from a checklist
#[utoipa::path(
    delete,
    path = "/api/checklists/{id}/questions/{question_id}",
    params(
        ("id" = Uuid, Path, description = "Checklist ID"),
        ("question_id" = Uuid, Path, description = "Pinned question version ID")
    ),
    responses(
        (status = 200, description = "Question detached"),
        (status = 404, description = "Question not attached")
    ),
    tag = "checklists"
)]
pub async fn detach_question(
    State(service): State<Arc<ChecklistService>>,
    Path((id, question_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>> {
    service.detach_question(id, question_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Question detached".to_string()),
        None,
    )))
}
