pub mod checklist_service;

pub use checklist_service::ChecklistService;
