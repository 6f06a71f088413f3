mod question;

pub use question::{NewQuestionVersion, QuestionCatalogEntry, QuestionChanges};
