pub mod categories;
pub mod checklists;
pub mod questions;
pub mod reports;
pub mod suggestions;
