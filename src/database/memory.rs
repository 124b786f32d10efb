use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::models::{DataRecord, NewDataRecord, NewUser, User};
use crate::database::repository::Repository;
use crate::database::DatabaseError;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    data: Vec<DataRecord>,
    next_user_id: i32,
    next_data_id: i32,
}

/// In-process [`Repository`] with the same uniqueness rules as the SQL schema.
/// Ids are assigned from 1 and never reused, like a SERIAL column.
#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict("Email already registered".to_string()));
        }

        tables.next_user_id += 1;
        let created = User {
            id: tables.next_user_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_data(&self) -> Result<Vec<DataRecord>, DatabaseError> {
        Ok(self.tables.read().await.data.clone())
    }

    async fn create_data(&self, record: NewDataRecord) -> Result<DataRecord, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.next_data_id += 1;
        let created = DataRecord {
            id: tables.next_data_id,
            title: record.title,
            description: record.description,
        };
        tables.data.push(created.clone());
        Ok(created)
    }

    async fn update_data(
        &self,
        id: i32,
        record: NewDataRecord,
    ) -> Result<Option<DataRecord>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.data.iter_mut().find(|r| r.id == id).map(|existing| {
            existing.title = record.title;
            existing.description = record.description;
            existing.clone()
        }))
    }

    async fn delete_data(&self, id: i32) -> Result<Option<DataRecord>, DatabaseError> {
        let mut tables = self.tables.write().await;
        let index = tables.data.iter().position(|r| r.id == id);
        Ok(index.map(|index| tables.data.remove(index)))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Role;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            username: "someone".into(),
            email: email.into(),
            password_hash: "hash".into(),
            role: Role::User,
        }
    }

    fn new_record(title: &str) -> NewDataRecord {
        NewDataRecord {
            title: title.into(),
            description: format!("{} description", title),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = MemoryRepository::new();
        repo.create_user(new_user("a@example.com")).await.unwrap();

        let err = repo.create_user(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)));
        assert_eq!(repo.user_count().await, 1);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = MemoryRepository::new();
        let first = repo.create_data(new_record("one")).await.unwrap();
        repo.delete_data(first.id).await.unwrap();

        let second = repo.create_data(new_record("two")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let repo = MemoryRepository::new();
        let kept = repo.create_data(new_record("kept")).await.unwrap();

        assert!(repo.update_data(99, new_record("x")).await.unwrap().is_none());
        assert!(repo.delete_data(99).await.unwrap().is_none());
        assert_eq!(repo.list_data().await.unwrap(), vec![kept]);
    }
}
