pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use models::{NewReview, Review, Thing, User};
pub use postgres::PgStore;
pub use store::{DatabaseError, Store};
