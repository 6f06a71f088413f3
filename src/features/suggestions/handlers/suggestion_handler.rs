use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::suggestions::dtos::{SuggestRequestDto, SuggestResponseDto};
use crate::features::suggestions::services::SuggestionService;
use crate::shared::types::ApiResponse;

/// Suggest failure categories for a description
///
/// Returns at most five (main, sub) category pairs, best match first.
#[utoipa::path(
    post,
    path = "/api/suggest",
    request_body = SuggestRequestDto,
    responses(
        (status = 200, description = "Ranked category suggestions", body = ApiResponse<SuggestResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "suggestions"
)]
pub async fn suggest_categories(
    State(service): State<Arc<SuggestionService>>,
    AppJson(dto): AppJson<SuggestRequestDto>,
) -> Result<Json<ApiResponse<SuggestResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let auto_suggestions = service.suggest(&dto.description).await?;
    Ok(Json(ApiResponse::success(
        Some(SuggestResponseDto { auto_suggestions }),
        None,
        None,
    )))
}
