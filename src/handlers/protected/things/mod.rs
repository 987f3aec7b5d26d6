pub mod thing_get; // GET /api/things/:thing_id
pub mod thing_reviews_get; // GET /api/things/:thing_id/reviews

pub use thing_get::thing_get;
pub use thing_reviews_get::thing_reviews_get;
