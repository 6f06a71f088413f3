use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::{CategoryGroup, FailureCategory, FailureSubCategory};

/// Request DTO for upserting a category chain
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCategoryDto {
    /// Main category name, created if it does not exist yet
    #[validate(length(min = 1, max = 255, message = "mainCategory must be 1-255 characters"))]
    pub main_category: String,

    /// Sub-category name, created under the main category if missing
    #[validate(length(min = 1, max = 255, message = "subCategory must be 1-255 characters"))]
    pub sub_category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub main_category_id: Uuid,
}

/// Response DTO for an upserted category chain
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub sub_category: SubCategoryResponseDto,
}

impl From<(FailureCategory, FailureSubCategory)> for CategoryResponseDto {
    fn from((category, sub): (FailureCategory, FailureSubCategory)) -> Self {
        Self {
            id: category.id,
            name: category.name,
            sub_category: SubCategoryResponseDto {
                id: sub.id,
                name: sub.name,
                main_category_id: sub.main_category_id,
            },
        }
    }
}

/// Select option for a sub-category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubCategoryOptionDto {
    pub value: String,
    pub label: String,
}

/// Main category with its sub-categories as select options
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListItemDto {
    pub main_category: String,
    pub sub_categories: Vec<SubCategoryOptionDto>,
}

impl From<CategoryGroup> for CategoryListItemDto {
    fn from(group: CategoryGroup) -> Self {
        Self {
            main_category: group.main,
            sub_categories: group
                .subs
                .into_iter()
                .map(|sub| SubCategoryOptionDto {
                    value: sub.clone(),
                    label: sub,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_item_serializes_options() {
        let item = CategoryListItemDto::from(CategoryGroup::new("Elektrik", &["Far Sistemi"]));
        let value = serde_json::to_value(item).unwrap();

        assert_eq!(value["mainCategory"], "Elektrik");
        assert_eq!(value["subCategories"][0]["value"], "Far Sistemi");
        assert_eq!(value["subCategories"][0]["label"], "Far Sistemi");
    }

    #[test]
    fn test_upsert_dto_rejects_empty_fields() {
        let dto = UpsertCategoryDto {
            main_category: String::new(),
            sub_category: "Aydınlatma".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto = UpsertCategoryDto {
            main_category: "Elektrik".to_string(),
            sub_category: "Aydınlatma".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
