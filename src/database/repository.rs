use async_trait::async_trait;

use crate::database::models::{DataRecord, NewDataRecord, NewUser, User};
use crate::database::DatabaseError;

/// Storage operations behind the HTTP handlers.
///
/// Every method maps to a single statement. `update_data` and `delete_data`
/// return `None` when no row carries the given id.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Insert a user. A taken email yields [`DatabaseError::Conflict`].
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn list_data(&self) -> Result<Vec<DataRecord>, DatabaseError>;

    async fn create_data(&self, record: NewDataRecord) -> Result<DataRecord, DatabaseError>;

    async fn update_data(
        &self,
        id: i32,
        record: NewDataRecord,
    ) -> Result<Option<DataRecord>, DatabaseError>;

    async fn delete_data(&self, id: i32) -> Result<Option<DataRecord>, DatabaseError>;

    /// Round-trip to the backing store
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
