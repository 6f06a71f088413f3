//! Versioned question catalog.
//!
//! Revising a question never edits it in place: a new version is appended to
//! the chain and the old one stays available to checklists that pinned it.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/questions` | Create a question (version 1) |
//! | GET | `/api/questions` | List questions |
//! | GET | `/api/questions/{id}` | Get a question version |
//! | PUT | `/api/questions/{id}` | Revise a question into a new version |
//! | GET | `/api/questions/{id}/versions` | Version history of a question |
//! | POST | `/api/questions/notify-checklists` | Re-assert checklist pins |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::QuestionService;
