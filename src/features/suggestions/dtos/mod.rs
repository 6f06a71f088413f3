mod suggestion_dto;

pub use suggestion_dto::{CategorySuggestionDto, SuggestRequestDto, SuggestResponseDto};
