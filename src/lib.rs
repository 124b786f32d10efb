pub mod app;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use app::app;
pub use state::AppState;
