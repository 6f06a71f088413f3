use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::checklists::{dtos as checklists_dtos, handlers as checklists_handlers};
use crate::features::questions::{dtos as questions_dtos, handlers as questions_handlers};
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::suggestions::{dtos as suggestions_dtos, handlers as suggestions_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::upsert_category,
        categories_handlers::list_categories,
        // Suggestions
        suggestions_handlers::suggest_categories,
        // Reports
        reports_handlers::create_report,
        reports_handlers::list_reports,
        reports_handlers::get_report,
        // Questions
        questions_handlers::create_question,
        questions_handlers::list_questions,
        questions_handlers::get_question,
        questions_handlers::revise_question,
        questions_handlers::list_question_versions,
        questions_handlers::notify_checklists,
        // Checklists
        checklists_handlers::create_checklist,
        checklists_handlers::list_checklists,
        checklists_handlers::get_checklist,
        checklists_handlers::attach_question,
        checklists_handlers::detach_question,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Categories
            categories_dtos::UpsertCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::SubCategoryResponseDto,
            categories_dtos::SubCategoryOptionDto,
            categories_dtos::CategoryListItemDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryListItemDto>>,
            // Suggestions
            suggestions_dtos::SuggestRequestDto,
            suggestions_dtos::CategorySuggestionDto,
            suggestions_dtos::SuggestResponseDto,
            ApiResponse<suggestions_dtos::SuggestResponseDto>,
            // Reports
            reports_dtos::CreateReportDto,
            reports_dtos::ReportResponseDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            // Questions
            questions_dtos::CreateQuestionDto,
            questions_dtos::UpdateQuestionDto,
            questions_dtos::QuestionResponseDto,
            questions_dtos::NotifyChecklistsDto,
            questions_dtos::NotifyChecklistsResponseDto,
            ApiResponse<questions_dtos::QuestionResponseDto>,
            ApiResponse<Vec<questions_dtos::QuestionResponseDto>>,
            ApiResponse<questions_dtos::NotifyChecklistsResponseDto>,
            // Checklists
            checklists_dtos::CreateChecklistDto,
            checklists_dtos::AttachQuestionDto,
            checklists_dtos::ChecklistResponseDto,
            checklists_dtos::PinnedQuestionDto,
            checklists_dtos::ChecklistDetailDto,
            checklists_dtos::ChecklistQuestionLinkDto,
            ApiResponse<checklists_dtos::ChecklistResponseDto>,
            ApiResponse<Vec<checklists_dtos::ChecklistResponseDto>>,
            ApiResponse<checklists_dtos::ChecklistDetailDto>,
            ApiResponse<checklists_dtos::ChecklistQuestionLinkDto>,
        )
    ),
    tags(
        (name = "categories", description = "Failure category taxonomy"),
        (name = "suggestions", description = "Category suggestions for failure descriptions"),
        (name = "reports", description = "Failure report intake"),
        (name = "questions", description = "Versioned question catalog"),
        (name = "checklists", description = "Checklists with pinned question versions"),
    ),
    info(
        title = "Qualisu API",
        version = "0.1.0",
        description = "API documentation for Qualisu",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
