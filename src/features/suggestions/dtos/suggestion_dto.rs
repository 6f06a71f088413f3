use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for category suggestions
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequestDto {
    /// Free-text failure description. An empty description yields no suggestions.
    #[validate(length(max = 5000, message = "description must not exceed 5000 characters"))]
    pub description: String,
}

/// One suggested (main, sub) category pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySuggestionDto {
    pub main_category: String,
    pub sub_category: String,
}

/// Ranked suggestions, best match first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestResponseDto {
    pub auto_suggestions: Vec<CategorySuggestionDto>,
}
