mod question_dto;

pub use question_dto::{
    CreateQuestionDto, NotifyChecklistsDto, NotifyChecklistsResponseDto, QuestionQueryParams,
    QuestionResponseDto, UpdateQuestionDto,
};
