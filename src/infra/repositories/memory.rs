//! In-process user store.
//!
//! Keeps rows in insertion order behind an async lock. Used by tests and by
//! `serve --in-memory` when no database is available.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UserRepository;
use crate::domain::User;
use crate::errors::{unique_violation, AppError, AppResult};
use crate::types::PaginationParams;

/// Volatile implementation of UserRepository
#[derive(Default)]
pub struct MemoryUserStore {
    rows: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows held, soft-deleted ones included
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn create(&self, user: &User) -> AppResult<User> {
        let mut rows = self.rows.write().await;

        // Mirrors the primary key and the partial unique index on email.
        if rows.iter().any(|row| row.id == user.id) {
            return Err(AppError::store(
                "insert user",
                unique_violation(format!("primary key {}", user.id)),
            ));
        }
        if rows
            .iter()
            .any(|row| !row.is_deleted() && row.email == user.email)
        {
            return Err(AppError::store(
                "insert user",
                unique_violation(format!("active email {}", user.email)),
            ));
        }

        rows.push(user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|row| !row.is_deleted() && row.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|row| !row.is_deleted() && row.email == email)
            .cloned())
    }

    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)> {
        let rows = self.rows.read().await;
        let active = rows.iter().filter(|row| !row.is_deleted());

        let total = active.clone().count() as u64;
        let offset = usize::try_from(params.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(params.limit()).unwrap_or(usize::MAX);
        let page = active.skip(offset).take(limit).cloned().collect();

        Ok((page, total))
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut rows = self.rows.write().await;

        if rows
            .iter()
            .any(|row| !row.is_deleted() && row.id != user.id && row.email == user.email)
        {
            return Err(AppError::store(
                "update user",
                unique_violation(format!("active email {}", user.email)),
            ));
        }

        let row = rows
            .iter_mut()
            .find(|row| !row.is_deleted() && row.id == user.id)
            .ok_or(AppError::NotFound)?;

        row.name = user.name.clone();
        row.email = user.email.clone();
        row.updated_at = user.updated_at;
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        if let Some(row) = rows
            .iter_mut()
            .find(|row| !row.is_deleted() && row.id == id)
        {
            row.soft_delete();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn soft_deleted_rows_are_invisible_but_kept() {
        let store = MemoryUserStore::new();
        let user = store.create(&User::new("Ada", "ada@x.com")).await.unwrap();

        store.delete(user.id).await.unwrap();

        assert!(store.find_by_id(user.id).await.unwrap().is_none());
        assert!(store.find_by_email("ada@x.com").await.unwrap().is_none());
        assert_eq!(store.list(PaginationParams::default()).await.unwrap().1, 0);
        assert_eq!(store.row_count().await, 1);
    }

    #[tokio::test]
    async fn deleting_twice_is_silent() {
        let store = MemoryUserStore::new();
        let user = store.create(&User::new("Ada", "ada@x.com")).await.unwrap();

        store.delete(user.id).await.unwrap();
        store.delete(user.id).await.unwrap();
        store.delete(Uuid::new_v4()).await.unwrap();
    }

    #[tokio::test]
    async fn email_of_deleted_user_can_be_reused() {
        let store = MemoryUserStore::new();
        let first = store.create(&User::new("Ada", "ada@x.com")).await.unwrap();
        store.delete(first.id).await.unwrap();

        let second = store.create(&User::new("Ada", "ada@x.com")).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn duplicate_active_email_is_a_store_error() {
        let store = MemoryUserStore::new();
        store.create(&User::new("Ada", "ada@x.com")).await.unwrap();

        let err = store
            .create(&User::new("Bea", "ada@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Store { operation: "insert user", .. }));
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn update_onto_active_email_is_a_unique_violation() {
        let store = MemoryUserStore::new();
        store.create(&User::new("Ada", "ada@x.com")).await.unwrap();
        let mut bea = store.create(&User::new("Bea", "bea@x.com")).await.unwrap();

        bea.update_email("ada@x.com");
        let err = store.update(&bea).await.unwrap_err();

        assert!(matches!(err, AppError::Store { operation: "update user", .. }));
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn list_pages_in_insertion_order() {
        let store = MemoryUserStore::new();
        for i in 0..5 {
            store
                .create(&User::new(&format!("User {i}"), &format!("u{i}@x.com")))
                .await
                .unwrap();
        }

        let (page, total) = store.list(PaginationParams::new(2, 2)).await.unwrap();
        assert_eq!(total, 5);
        let names: Vec<_> = page.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["User 2", "User 3"]);
    }
}
