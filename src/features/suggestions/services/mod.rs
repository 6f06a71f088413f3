mod suggestion_service;

pub use suggestion_service::SuggestionService;
