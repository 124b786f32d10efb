use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DataRecord {
    pub id: i32,
    pub title: String,
    pub description: String,
}

/// Writable fields of a data record, shared by create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDataRecord {
    pub title: String,
    pub description: String,
}
