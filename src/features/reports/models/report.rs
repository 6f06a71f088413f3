use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::reports::dtos::ReportResponseDto;

/// Database model for a failure report.
///
/// Reports are immutable and carry the category names as submitted rather
/// than foreign keys.
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub description: String,
    pub main_category_name: String,
    pub sub_category_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            description: r.description,
            main_category_name: r.main_category_name,
            sub_category_name: r.sub_category_name,
            created_at: r.created_at,
        }
    }
}
