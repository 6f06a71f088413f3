use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::checklists::models::{
    Checklist, ChecklistQuestionLink, ChecklistSummaryRow, PinnedQuestionRow,
};
use crate::shared::text::contains_pattern;
use crate::shared::types::{default_page, default_page_size, page_limit, page_offset};

/// Request DTO for creating a checklist
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChecklistDto {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 5000, message = "description must not exceed 5000 characters"))]
    pub description: Option<String>,
}

/// Request DTO for attaching a question to a checklist
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachQuestionDto {
    /// ID of the question version to pin
    pub question_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub question_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ChecklistSummaryRow> for ChecklistResponseDto {
    fn from(row: ChecklistSummaryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            question_count: row.question_count,
            created_at: row.created_at,
        }
    }
}

impl From<Checklist> for ChecklistResponseDto {
    fn from(checklist: Checklist) -> Self {
        Self {
            id: checklist.id,
            name: checklist.name,
            description: checklist.description,
            question_count: 0,
            created_at: checklist.created_at,
        }
    }
}

/// A question as pinned by a checklist
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PinnedQuestionDto {
    pub question_id: Uuid,
    pub root_id: Uuid,
    /// Version the checklist was built with
    pub version: i32,
    pub position: i32,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub question_type: String,
    pub grade: Option<String>,
    /// False when a newer version of the question exists
    pub is_latest: bool,
    pub attached_at: DateTime<Utc>,
}

impl From<PinnedQuestionRow> for PinnedQuestionDto {
    fn from(row: PinnedQuestionRow) -> Self {
        Self {
            question_id: row.question_id,
            root_id: row.root_id,
            version: row.pinned_version,
            position: row.position,
            name: row.name,
            description: row.description,
            question_type: row.question_type,
            grade: row.grade,
            is_latest: row.is_latest,
            attached_at: row.attached_at,
        }
    }
}

/// Checklist with its pinned questions in position order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistDetailDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<PinnedQuestionDto>,
}

impl ChecklistDetailDto {
    pub fn new(checklist: Checklist, questions: Vec<PinnedQuestionRow>) -> Self {
        Self {
            id: checklist.id,
            name: checklist.name,
            description: checklist.description,
            created_at: checklist.created_at,
            questions: questions.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistQuestionLinkDto {
    pub checklist_id: Uuid,
    pub question_id: Uuid,
    pub version: i32,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl From<ChecklistQuestionLink> for ChecklistQuestionLinkDto {
    fn from(link: ChecklistQuestionLink) -> Self {
        Self {
            checklist_id: link.checklist_id,
            question_id: link.question_id,
            version: link.version,
            position: link.position,
            created_at: link.created_at,
        }
    }
}

/// Query params for listing checklists
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ChecklistQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Case-insensitive search in name
    pub search: Option<String>,
}

impl ChecklistQueryParams {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.page_size)
    }

    pub fn limit(&self) -> i64 {
        page_limit(self.page_size)
    }

    pub fn search_pattern(&self) -> Option<String> {
        contains_pattern(self.search.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pinned_question_reports_pinned_version() {
        let row = PinnedQuestionRow {
            question_id: Uuid::now_v7(),
            root_id: Uuid::now_v7(),
            pinned_version: 1,
            position: 2,
            name: "Far ayarı kontrolü".to_string(),
            description: None,
            question_type: "yes_no".to_string(),
            grade: None,
            is_latest: false,
            attached_at: Utc::now(),
        };

        let value = serde_json::to_value(PinnedQuestionDto::from(row)).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["isLatest"], false);
        assert_eq!(value["type"], "yes_no");
    }

    #[test]
    fn test_attach_dto_requires_question_id() {
        let parsed: Result<AttachQuestionDto, _> = serde_json::from_value(json!({}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_create_dto_validation() {
        let dto = CreateChecklistDto {
            name: String::new(),
            description: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let params = ChecklistQueryParams {
            page: 2,
            page_size: 500,
            search: Some("  ".to_string()),
        };
        assert_eq!(params.search_pattern(), None);
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 100);
    }
}
