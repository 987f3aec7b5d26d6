pub mod review_get; // GET /api/reviews/:review_id
pub mod review_post; // POST /api/reviews

pub use review_get::review_get;
pub use review_post::review_post;
