use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::core::error::AppError;
use crate::features::questions::models::{QuestionCatalogEntry, QuestionChanges};
use crate::shared::text::{contains_pattern, normalize_list, normalize_name};
use crate::shared::types::{default_page, default_page_size, page_limit, page_offset};

fn validate_entries(values: &[String]) -> Result<(), ValidationError> {
    if values.len() > 50 {
        return Err(ValidationError::new("too_many_entries"));
    }
    if values.iter().any(|v| v.chars().count() > 500) {
        return Err(ValidationError::new("entry_too_long"));
    }
    Ok(())
}

/// Request DTO for creating a question (version 1)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionDto {
    #[validate(length(min = 1, max = 500, message = "name must be 1-500 characters"))]
    pub name: String,

    #[serde(rename = "desc")]
    pub description: Option<String>,

    /// Answer type, e.g. "yes_no" or "measurement"
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 100, message = "type must be 1-100 characters"))]
    pub question_type: String,

    #[validate(length(max = 50, message = "grade must not exceed 50 characters"))]
    pub grade: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_entries"))]
    pub tags: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_entries"))]
    pub images: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_entries"))]
    pub docs: Vec<String>,
}

/// Request DTO for revising a question. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionDto {
    #[validate(length(min = 1, max = 500, message = "name must be 1-500 characters"))]
    pub name: Option<String>,

    #[serde(rename = "desc")]
    pub description: Option<String>,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 100, message = "type must be 1-100 characters"))]
    pub question_type: Option<String>,

    #[validate(length(max = 50, message = "grade must not exceed 50 characters"))]
    pub grade: Option<String>,

    #[validate(custom(function = "validate_entries"))]
    pub tags: Option<Vec<String>>,

    #[validate(custom(function = "validate_entries"))]
    pub images: Option<Vec<String>>,

    #[validate(custom(function = "validate_entries"))]
    pub docs: Option<Vec<String>>,
}

impl UpdateQuestionDto {
    /// Normalised changes. A name or type that is present but blank is rejected.
    pub fn into_changes(self) -> Result<QuestionChanges, AppError> {
        let name = self
            .name
            .as_deref()
            .map(|n| {
                normalize_name(n)
                    .ok_or_else(|| AppError::Validation("name must not be blank".to_string()))
            })
            .transpose()?;
        let question_type = self
            .question_type
            .as_deref()
            .map(|t| {
                normalize_name(t)
                    .ok_or_else(|| AppError::Validation("type must not be blank".to_string()))
            })
            .transpose()?;

        Ok(QuestionChanges {
            name,
            description: self.description.map(|d| d.trim().to_string()),
            question_type,
            grade: self.grade.map(|g| g.trim().to_string()),
            tags: self.tags.map(normalize_list),
            images: self.images.map(normalize_list),
            docs: self.docs.map(normalize_list),
        })
    }
}

/// Response DTO for a question version
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponseDto {
    pub id: Uuid,
    pub root_id: Uuid,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub question_type: String,
    pub grade: Option<String>,
    pub version: i32,
    pub is_latest: bool,
    pub prev_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub docs: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<QuestionCatalogEntry> for QuestionResponseDto {
    fn from(q: QuestionCatalogEntry) -> Self {
        Self {
            id: q.id,
            root_id: q.root_id,
            name: q.name,
            description: q.description,
            question_type: q.question_type,
            grade: q.grade,
            version: q.version,
            is_latest: q.is_latest,
            prev_id: q.prev_id,
            tags: q.tags,
            images: q.images,
            docs: q.docs,
            created_at: q.created_at,
        }
    }
}

/// Query params for listing questions
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct QuestionQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Case-insensitive search in name and description
    pub search: Option<String>,

    /// Only questions carrying this tag
    pub tag: Option<String>,

    /// Include superseded versions (default: latest versions only)
    #[serde(default)]
    pub include_history: bool,
}

impl QuestionQueryParams {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.page_size)
    }

    pub fn limit(&self) -> i64 {
        page_limit(self.page_size)
    }

    pub fn search_pattern(&self) -> Option<String> {
        contains_pattern(self.search.as_deref())
    }

    pub fn tag_filter(&self) -> Option<String> {
        self.tag.as_deref().and_then(normalize_name)
    }
}

/// Request DTO for re-asserting checklist pins after a question revision
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotifyChecklistsDto {
    pub question_id: Uuid,

    #[validate(range(min = 2, message = "newVersion must be at least 2"))]
    pub new_version: i32,

    #[validate(range(min = 1, message = "prevVersion must be at least 1"))]
    pub prev_version: i32,
}

/// Result of re-asserting checklist pins
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotifyChecklistsResponseDto {
    /// Number of checklist links whose pinned version was re-asserted
    pub checklist_links: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use serde_json::json;

    #[test]
    fn test_create_dto_uses_wire_names() {
        let dto: CreateQuestionDto = serde_json::from_value(json!({
            "name": "Far ayarı kontrolü",
            "desc": "Sol ve sağ far",
            "type": "yes_no",
            "grade": "B"
        }))
        .unwrap();

        assert_eq!(dto.description.as_deref(), Some("Sol ve sağ far"));
        assert_eq!(dto.question_type, "yes_no");
        assert!(dto.tags.is_empty());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_too_many_tags() {
        let dto = CreateQuestionDto {
            name: "Kapı boşluğu".to_string(),
            description: None,
            question_type: "measurement".to_string(),
            grade: None,
            tags: (0..51).map(|i| format!("t{}", i)).collect(),
            images: Vec::new(),
            docs: Vec::new(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_into_changes_normalizes() {
        let dto = UpdateQuestionDto {
            name: Some("  Far   ayarı ".to_string()),
            tags: Some(vec![" far ".to_string(), "far".to_string(), "".to_string()]),
            grade: Some(" A ".to_string()),
            ..Default::default()
        };

        let changes = dto.into_changes().unwrap();
        assert_eq!(changes.name.as_deref(), Some("Far ayarı"));
        assert_eq!(changes.tags, Some(vec!["far".to_string()]));
        assert_eq!(changes.grade.as_deref(), Some("A"));
        assert_eq!(changes.question_type, None);
    }

    #[test]
    fn test_update_rejects_blank_name_or_type() {
        let dto = UpdateQuestionDto {
            name: Some("   ".to_string()),
            grade: Some("A".to_string()),
            ..Default::default()
        };
        assert!(matches!(dto.into_changes(), Err(AppError::Validation(_))));

        let dto = UpdateQuestionDto {
            question_type: Some("\t".to_string()),
            ..Default::default()
        };
        assert!(matches!(dto.into_changes(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_query_params_use_snake_case() {
        let uri: axum::http::Uri =
            "/api/questions?page_size=20&include_history=true&tag=%20boya%20&search=50%25"
                .parse()
                .unwrap();
        let Query(params) = Query::<QuestionQueryParams>::try_from_uri(&uri).unwrap();

        assert!(params.include_history);
        assert_eq!(params.page, 1);
        assert_eq!(params.limit(), 20);
        assert_eq!(params.tag_filter().as_deref(), Some("boya"));
        assert_eq!(params.search_pattern().as_deref(), Some("%50\\%%"));
    }

    #[test]
    fn test_response_dto_serializes_wire_names() {
        let dto = QuestionResponseDto {
            id: Uuid::nil(),
            root_id: Uuid::nil(),
            name: "n".to_string(),
            description: None,
            question_type: "yes_no".to_string(),
            grade: None,
            version: 1,
            is_latest: true,
            prev_id: None,
            tags: Vec::new(),
            images: Vec::new(),
            docs: Vec::new(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(dto).unwrap();
        assert_eq!(value["type"], "yes_no");
        assert_eq!(value["isLatest"], true);
        assert!(value.get("desc").is_some());
        assert!(value.get("prevId").is_some());
    }

    #[test]
    fn test_notify_dto_range_validation() {
        let dto = NotifyChecklistsDto {
            question_id: Uuid::nil(),
            new_version: 1,
            prev_version: 0,
        };
        assert!(dto.validate().is_err());

        let dto = NotifyChecklistsDto {
            question_id: Uuid::nil(),
            new_version: 2,
            prev_version: 1,
        };
        assert!(dto.validate().is_ok());
    }
}
