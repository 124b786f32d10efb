use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::MemoryRepository;
use crate::state::AppState;

pub const TEST_JWT_SECRET: &str = "datagate-test-secret";

/// Configuration for in-process tests: no real database, cheapest bcrypt cost
pub fn test_config() -> AppConfig {
    AppConfig::from_vars(|key| match key {
        "DATABASE_URL" => Some("postgres://unused@localhost/datagate_test".to_string()),
        "JWT_SECRET" => Some(TEST_JWT_SECRET.to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        "DATABASE_RUN_MIGRATIONS" => Some("false".to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

/// Application state over a fresh in-memory repository.
/// The repository handle is returned too, for direct inspection.
pub fn memory_state() -> (AppState, Arc<MemoryRepository>) {
    let repo = Arc::new(MemoryRepository::new());
    let state = AppState::new(&test_config(), repo.clone()).expect("test bcrypt cost is valid");
    (state, repo)
}
