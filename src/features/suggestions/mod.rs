//! Category suggestions for free-text failure descriptions.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/suggest` | Top five (main, sub) categories for a description |

pub mod cache;
pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod scorer;
pub mod services;

pub use cache::SuggestionCache;
pub use services::SuggestionService;
