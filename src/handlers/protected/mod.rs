// handlers/protected/mod.rs - Protected handlers (Basic authentication required)
//
// Security Level: valid `Authorization: Basic` credentials
// Middleware: `basic_auth_middleware` injects `AuthUser` before any handler runs

pub mod reviews; // /api/reviews, /api/reviews/:review_id
pub mod things; // /api/things/:thing_id, /api/things/:thing_id/reviews

pub use reviews::{review_get, review_post};
pub use things::{thing_get, thing_reviews_get};
