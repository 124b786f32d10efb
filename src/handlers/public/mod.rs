// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Routes: /register, /login, /health
// Middleware: global CORS and tracing only

pub mod auth;
pub mod health;

pub use auth::*;
pub use health::health;
