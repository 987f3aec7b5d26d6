// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Middleware: request tracing only

pub mod things; // GET /api/things

pub use things::things_get;
