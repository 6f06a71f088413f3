mod checklist;

pub use checklist::{Checklist, ChecklistQuestionLink, ChecklistSummaryRow, PinnedQuestionRow};
