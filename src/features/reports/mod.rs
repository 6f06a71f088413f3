//! Failure report intake.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/reports` | Submit a report, upserting its category pair |
//! | GET | `/api/reports` | List reports |
//! | GET | `/api/reports/{id}` | Get a report |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ReportService;
