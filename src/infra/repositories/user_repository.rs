//! User repository implementation with soft delete support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult, StoreContext};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every method only sees rows whose `deleted_at` is NULL. Absence is
/// reported as `Ok(None)`; any persistence failure is `AppError::Store`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user row
    async fn create(&self, user: &User) -> AppResult<User>;

    /// Find active user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find active user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// One page of active users plus the total number of active users
    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)>;

    /// Overwrite every mutable column of an active user
    async fn update(&self, user: &User) -> AppResult<User>;

    /// Soft delete user by ID (sets deleted_at timestamp)
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: &User) -> AppResult<User> {
        let model = ActiveModel::from(user)
            .insert(&self.db)
            .await
            .store_context("insert user")?;

        Ok(User::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .store_context("get user by ID")?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .store_context("get user by email")?;

        Ok(result.map(User::from))
    }

    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)> {
        let active = UserEntity::find().filter(user::Column::DeletedAt.is_null());

        let total = active
            .clone()
            .count(&self.db)
            .await
            .store_context("count users")?;

        if params.offset() >= total {
            return Ok((Vec::new(), total));
        }

        let models = active
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .offset(params.offset())
            .limit(params.limit())
            .all(&self.db)
            .await
            .store_context("list users")?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut changes = ActiveModel::from(user);
        changes.id = ActiveValue::NotSet;

        let result = UserEntity::update_many()
            .set(changes)
            .filter(user::Column::Id.eq(user.id))
            .filter(user::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .store_context("update user")?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let now = Utc::now();

        UserEntity::update_many()
            .col_expr(user::Column::DeletedAt, Expr::value(now))
            .col_expr(user::Column::UpdatedAt, Expr::value(now))
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .store_context("delete user")?;

        Ok(())
    }
}
