// handlers/mod.rs - Two-tier handler architecture
//
// Public (no auth) → Protected (Basic auth via `middleware::basic_auth_middleware`)
//
// Every handler receives its store through `State<AppState>`; nothing reads a
// global database handle.
pub mod protected; // Basic authentication required
pub mod public; // No authentication required
pub mod utils;
