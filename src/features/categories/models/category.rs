use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Top-level failure category
#[derive(Debug, Clone, FromRow)]
pub struct FailureCategory {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Second-level failure category, unique per (name, main_category_id)
#[derive(Debug, Clone, FromRow)]
pub struct FailureSubCategory {
    pub id: Uuid,
    pub name: String,
    pub main_category_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// One row of the category/sub-category join. `sub_category` is `None` for
/// main categories that have no sub-categories yet.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryPairRow {
    pub main_category: String,
    pub sub_category: Option<String>,
}

/// A main category with the names of all its sub-categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub main: String,
    pub subs: Vec<String>,
}

impl CategoryGroup {
    #[cfg(test)]
    pub fn new(main: impl Into<String>, subs: &[&str]) -> Self {
        Self {
            main: main.into(),
            subs: subs.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Group joined rows by main category.
    ///
    /// Rows must arrive ordered by main category; the order of groups and of
    /// subs inside a group follows the row order.
    pub fn from_rows(rows: Vec<CategoryPairRow>) -> Vec<CategoryGroup> {
        let mut groups: Vec<CategoryGroup> = Vec::new();

        for row in rows {
            let starts_new_group = groups
                .last()
                .map(|g| g.main != row.main_category)
                .unwrap_or(true);

            if starts_new_group {
                groups.push(CategoryGroup {
                    main: row.main_category,
                    subs: Vec::new(),
                });
            }

            if let (Some(sub), Some(group)) = (row.sub_category, groups.last_mut()) {
                group.subs.push(sub);
            }
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(main: &str, sub: Option<&str>) -> CategoryPairRow {
        CategoryPairRow {
            main_category: main.to_string(),
            sub_category: sub.map(String::from),
        }
    }

    #[test]
    fn test_from_rows_groups_consecutive_mains() {
        let rows = vec![
            row("Elektrik", Some("Aydınlatma")),
            row("Elektrik", Some("Far Sistemi")),
            row("Motor", Some("Yağ Kaçağı")),
        ];

        let groups = CategoryGroup::from_rows(rows);
        assert_eq!(
            groups,
            vec![
                CategoryGroup::new("Elektrik", &["Aydınlatma", "Far Sistemi"]),
                CategoryGroup::new("Motor", &["Yağ Kaçağı"]),
            ]
        );
    }

    #[test]
    fn test_from_rows_keeps_main_without_subs() {
        let rows = vec![row("Boya", None), row("Kaporta", Some("Çizik"))];

        let groups = CategoryGroup::from_rows(rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].main, "Boya");
        assert!(groups[0].subs.is_empty());
        assert_eq!(groups[1].subs, vec!["Çizik"]);
    }

    #[test]
    fn test_from_rows_empty() {
        assert!(CategoryGroup::from_rows(Vec::new()).is_empty());
    }
}
