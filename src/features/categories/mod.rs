//! Failure category taxonomy.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | Main categories with sub-category options |
//! | POST | `/api/categories` | Upsert a (main, sub) category pair |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
