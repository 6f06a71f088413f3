mod checklist_dto;

pub use checklist_dto::{
    AttachQuestionDto, ChecklistDetailDto, ChecklistQuestionLinkDto, ChecklistQueryParams,
    ChecklistResponseDto, CreateChecklistDto, PinnedQuestionDto,
};
