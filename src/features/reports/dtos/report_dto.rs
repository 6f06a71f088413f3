use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::shared::text::contains_pattern;
use crate::shared::types::{default_page, default_page_size, page_limit, page_offset};

/// Request DTO for submitting a failure report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportDto {
    #[validate(length(min = 1, max = 5000, message = "description must be 1-5000 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 255, message = "mainCategory must be 1-255 characters"))]
    pub main_category: String,

    #[validate(length(min = 1, max = 255, message = "subCategory must be 1-255 characters"))]
    pub sub_category: String,
}

/// Response DTO for a report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub description: String,
    pub main_category_name: String,
    pub sub_category_name: String,
    pub created_at: DateTime<Utc>,
}

/// Query params for listing reports
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ReportQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Only reports filed under this main category
    pub main_category: Option<String>,

    /// Case-insensitive search in the description
    pub search: Option<String>,
}

impl ReportQueryParams {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.page_size)
    }

    pub fn limit(&self) -> i64 {
        page_limit(self.page_size)
    }

    /// LIKE pattern for `search`, or `None` when absent or blank
    pub fn search_pattern(&self) -> Option<String> {
        contains_pattern(self.search.as_deref())
    }
}
