pub mod manager;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryRepository;
pub use postgres::PgRepository;
pub use repository::Repository;
