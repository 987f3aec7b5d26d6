pub mod auth;
pub mod response;

pub use auth::{authenticate, basic_auth_middleware, AuthError, AuthUser};
pub use response::{ApiResponse, ApiResult};
