use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// One version of an inspection question.
///
/// Versions of the same logical question share `root_id` and link back
/// through `prev_id`. Only the chain head has `is_latest` set.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionCatalogEntry {
    pub id: Uuid,
    pub root_id: Uuid,
    pub name: String,
    pub description: Option<String>,
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

/// Field changes for a revision. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct QuestionChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub question_type: Option<String>,
    pub grade: Option<String>,
    pub tags: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub docs: Option<Vec<String>>,
}

impl QuestionChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.question_type.is_none()
            && self.grade.is_none()
            && self.tags.is_none()
            && self.images.is_none()
            && self.docs.is_none()
    }
}

/// A question version ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestionVersion {
    pub id: Uuid,
    pub root_id: Uuid,
    pub prev_id: Option<Uuid>,
    pub version: i32,
    pub name: String,
    pub description: Option<String>,
    pub question_type: String,
    pub grade: Option<String>,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub docs: Vec<String>,
}

impl NewQuestionVersion {
    /// First version of a new question; the chain is rooted at its own id
    #[allow(clippy::too_many_arguments)]
    pub fn first(
        id: Uuid,
        name: String,
        description: Option<String>,
        question_type: String,
        grade: Option<String>,
        tags: Vec<String>,
        images: Vec<String>,
        docs: Vec<String>,
    ) -> Self {
        Self {
            id,
            root_id: id,
            prev_id: None,
            version: 1,
            name,
            description,
            question_type,
            grade,
            tags,
            images,
            docs,
        }
    }
}

impl QuestionCatalogEntry {
    /// Build the next version of this entry with `changes` applied
    pub fn revise(&self, new_id: Uuid, changes: QuestionChanges) -> NewQuestionVersion {
        NewQuestionVersion {
            id: new_id,
            root_id: self.root_id,
            prev_id: Some(self.id),
            version: self.version + 1,
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            description: changes.description.or_else(|| self.description.clone()),
            question_type: changes
                .question_type
                .unwrap_or_else(|| self.question_type.clone()),
            grade: changes.grade.or_else(|| self.grade.clone()),
            tags: changes.tags.unwrap_or_else(|| self.tags.clone()),
            images: changes.images.unwrap_or_else(|| self.images.clone()),
            docs: changes.docs.unwrap_or_else(|| self.docs.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> QuestionCatalogEntry {
        let id = Uuid::now_v7();
        QuestionCatalogEntry {
            id,
            root_id: id,
            name: "Far ayarı kontrolü".to_string(),
            description: Some("Sol ve sağ far yüksekliği".to_string()),
            question_type: "yes_no".to_string(),
            grade: Some("B".to_string()),
            version: 1,
            is_latest: true,
            prev_id: None,
            tags: vec!["elektrik".to_string()],
            images: Vec::new(),
            docs: vec!["far-talimat.pdf".to_string()],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_revise_links_to_previous_version() {
        let current = entry();
        let new_id = Uuid::now_v7();

        let next = current.revise(
            new_id,
            QuestionChanges {
                grade: Some("A".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(next.id, new_id);
        assert_eq!(next.root_id, current.root_id);
        assert_eq!(next.prev_id, Some(current.id));
        assert_eq!(next.version, 2);
    }

    #[test]
    fn test_revise_copies_unchanged_fields() {
        let current = entry();

        let next = current.revise(
            Uuid::now_v7(),
            QuestionChanges {
                name: Some("Far yüksekliği kontrolü".to_string()),
                tags: Some(vec!["elektrik".to_string(), "far".to_string()]),
                ..Default::default()
            },
        );

        assert_eq!(next.name, "Far yüksekliği kontrolü");
        assert_eq!(next.tags, vec!["elektrik", "far"]);
        assert_eq!(next.description, current.description);
        assert_eq!(next.question_type, current.question_type);
        assert_eq!(next.grade, current.grade);
        assert_eq!(next.docs, current.docs);
        assert!(next.images.is_empty());
    }

    #[test]
    fn test_revise_of_later_version_keeps_root() {
        let mut current = entry();
        let root = current.root_id;
        current.id = Uuid::now_v7();
        current.version = 4;
        current.prev_id = Some(root);

        let next = current.revise(Uuid::now_v7(), QuestionChanges::default());
        assert_eq!(next.version, 5);
        assert_eq!(next.root_id, root);
        assert_eq!(next.prev_id, Some(current.id));
    }

    #[test]
    fn test_first_version_is_its_own_root() {
        let id = Uuid::now_v7();
        let first = NewQuestionVersion::first(
            id,
            "Kapı boşluğu".to_string(),
            None,
            "measurement".to_string(),
            None,
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );

        assert_eq!(first.root_id, id);
        assert_eq!(first.prev_id, None);
        assert_eq!(first.version, 1);
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(QuestionChanges::default().is_empty());
        assert!(!QuestionChanges {
            docs: Some(Vec::new()),
            ..Default::default()
        }
        .is_empty());
    }
}
