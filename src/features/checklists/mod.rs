//! Checklists built from pinned question versions.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/checklists` | Create a checklist |
//! | GET | `/api/checklists` | List checklists |
//! | GET | `/api/checklists/{id}` | Checklist with pinned questions |
//! | POST | `/api/checklists/{id}/questions` | Attach a question version |
//! | DELETE | `/api/checklists/{id}/questions/{questionId}` | Detach a question |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ChecklistService;
