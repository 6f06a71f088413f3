use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Checklist {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Checklist row with the number of attached questions
#[derive(Debug, Clone, FromRow)]
pub struct ChecklistSummaryRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub question_count: i64,
    pub created_at: DateTime<Utc>,
}

/// A question attached to a checklist, pinned at `version`
#[derive(Debug, Clone, FromRow)]
pub struct ChecklistQuestionLink {
    pub checklist_id: Uuid,
    pub question_id: Uuid,
    pub version: i32,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Link joined with the question row it pins
#[derive(Debug, Clone, FromRow)]
pub struct PinnedQuestionRow {
    pub question_id: Uuid,
    pub root_id: Uuid,
    pub pinned_version: i32,
    pub position: i32,
    pub name: String,
    pub description: Option<String>,
    pub question_type: String,
    pub grade: Option<String>,
    pub is_latest: bool,
    pub attached_at: DateTime<Utc>,
}

impl ChecklistQuestionLink {
    /// Version this link should carry after a revision of its question.
    ///
    /// Links pin the version they were attached with, so the recorded value
    /// is kept whatever `question_version` says.
    pub fn pinned_version(&self, question_version: i32) -> i32 {
        if self.version != question_version {
            tracing::warn!(
                "Checklist {} pins question {} at v{} but the row is v{}",
                self.checklist_id,
                self.question_id,
                self.version,
                question_version
            );
        }
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(version: i32) -> ChecklistQuestionLink {
        ChecklistQuestionLink {
            checklist_id: Uuid::now_v7(),
            question_id: Uuid::now_v7(),
            version,
            position: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_pinned_version_is_kept() {
        assert_eq!(link(1).pinned_version(1), 1);
    }

    #[test]
    fn test_pinned_version_survives_drift() {
        assert_eq!(link(3).pinned_version(4), 3);
    }
}
