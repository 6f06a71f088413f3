mod category_dto;

pub use category_dto::{
    CategoryListItemDto, CategoryResponseDto, SubCategoryOptionDto, SubCategoryResponseDto,
    UpsertCategoryDto,
};
