mod category;

pub use category::{CategoryGroup, CategoryPairRow, FailureCategory, FailureSubCategory};
