pub mod review;
pub mod thing;
pub mod user;

pub use review::{NewReview, Review};
pub use thing::Thing;
pub use user::User;
