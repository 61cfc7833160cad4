//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.
//! Owns email uniqueness, existence checks before mutation, partial-update
//! semantics and pagination normalization.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::ValidationError;

use crate::domain::validation::{describe, validate_email, validate_name};
use crate::domain::{NewUser, User, UserChanges};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;
use crate::types::{Paginated, PaginationParams};

/// User service trait for dependency injection.
///
/// Soft-deleted users are invisible to every operation.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user; fails with `AlreadyExists` if the email is taken
    async fn create_user(&self, new_user: NewUser) -> AppResult<User>;

    /// Get active user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// One page of active users
    async fn list_users(&self, params: PaginationParams) -> AppResult<Paginated<User>>;

    /// Apply a partial update to an active user
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    /// Soft delete user (sets deleted_at timestamp)
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Fail with `AlreadyExists` if an active user holds `email`.
    async fn ensure_email_free(&self, email: &str) -> AppResult<()> {
        match self.repo.find_by_email(email).await? {
            Some(_) => Err(AppError::AlreadyExists),
            None => Ok(()),
        }
    }
}

fn check(rule: Result<(), ValidationError>) -> AppResult<()> {
    rule.map_err(|e| AppError::validation(describe(&e)))
}

/// The pre-check lost a race and the unique index caught the duplicate.
fn conflict_on_unique_violation(err: AppError) -> AppError {
    if err.is_unique_violation() {
        tracing::warn!("Unique index rejected a duplicate email");
        AppError::AlreadyExists
    } else {
        err
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        check(validate_name(&new_user.name))?;
        check(validate_email(&new_user.email))?;

        let candidate = User::new(&new_user.name, &new_user.email);
        self.ensure_email_free(&candidate.email).await?;

        let user = self
            .repo
            .create(&candidate)
            .await
            .map_err(conflict_on_unique_violation)?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self, params: PaginationParams) -> AppResult<Paginated<User>> {
        let params = params.normalized();
        let (users, total) = self.repo.list(params).await?;

        tracing::debug!(page = params.page, per_page = params.per_page, total, "Listed users");
        Ok(Paginated::new(users, params.page, params.per_page, total))
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        if let Some(name) = &changes.name {
            check(validate_name(name))?;
        }
        if let Some(email) = &changes.email {
            check(validate_email(email))?;
        }

        let mut user = self.repo.find_by_id(id).await?.ok_or_not_found()?;

        if let Some(email) = changes.email.as_deref().map(str::trim) {
            if email != user.email {
                self.ensure_email_free(email).await?;
                user.update_email(email);
            }
        }
        if let Some(name) = &changes.name {
            user.update_name(name);
        }
        // Written even when nothing changed.
        if changes.is_empty() {
            tracing::debug!(user_id = %id, "Empty update, refreshing updated_at only");
        }
        user.touch();

        let user = self
            .repo
            .update(&user)
            .await
            .map_err(conflict_on_unique_violation)?;

        tracing::info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        // Existence check and soft delete are separate round-trips.
        self.repo.find_by_id(id).await?.ok_or_not_found()?;
        self.repo.delete(id).await?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::unique_violation;
    use crate::infra::MockUserRepository;
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    fn existing(name: &str, email: &str) -> User {
        User::new(name, email)
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn create_checks_email_before_insert() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("ada@x.com"))
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|user| Ok(user.clone()));

        let user = service(repo)
            .create_user(NewUser {
                name: "Ada".into(),
                email: "ada@x.com".into(),
            })
            .await
            .unwrap();

        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@x.com");
        assert!(user.deleted_at.is_none());
    }

    #[tokio::test]
    async fn create_with_taken_email_never_writes() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(existing("Someone", email))));
        repo.expect_create().never();

        let err = service(repo)
            .create_user(NewUser {
                name: "Bea".into(),
                email: "ada@x.com".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AlreadyExists));
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_without_touching_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_create().never();
        let svc = service(repo);

        let short_name = svc
            .create_user(NewUser {
                name: "A".into(),
                email: "a@x.com".into(),
            })
            .await;
        assert!(matches!(short_name, Err(AppError::Validation(_))));

        let bad_email = svc
            .create_user(NewUser {
                name: "Ada".into(),
                email: "not-an-email".into(),
            })
            .await;
        assert!(matches!(bad_email, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn create_propagates_store_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().returning(|_| {
            Err(AppError::store("insert user", DbErr::Custom("disk full".into())))
        });

        let err = service(repo)
            .create_user(NewUser {
                name: "Ada".into(),
                email: "ada@x.com".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Store { operation: "insert user", .. }));
    }

    #[tokio::test]
    async fn create_losing_uniqueness_race_is_already_exists() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().times(1).returning(|user| {
            Err(AppError::store(
                "insert user",
                unique_violation(format!("active email {}", user.email)),
            ))
        });

        let err = service(repo)
            .create_user(NewUser {
                name: "Ada".into(),
                email: "ada@x.com".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AlreadyExists));
    }

    #[tokio::test]
    async fn update_losing_uniqueness_race_is_already_exists() {
        let user = existing("Ada", "ada@x.com");
        let id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_update().times(1).returning(|user| {
            Err(AppError::store(
                "update user",
                unique_violation(format!("active email {}", user.email)),
            ))
        });

        let err = service(repo)
            .update_user(
                id,
                UserChanges {
                    name: None,
                    email: Some("bea@x.com".into()),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AlreadyExists));
    }

    #[tokio::test]
    async fn get_missing_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = service(repo).get_user(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn list_normalizes_zero_params_and_computes_pages() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .with(eq(PaginationParams::new(1, 10)))
            .times(1)
            .returning(|_| Ok((vec![existing("Ada", "ada@x.com")], 25)));

        let page = service(repo)
            .list_users(PaginationParams::new(0, 0))
            .await
            .unwrap();

        assert_eq!(page.meta.page, 1);
        assert_eq!(page.meta.per_page, 10);
        assert_eq!(page.meta.total, 25);
        assert_eq!(page.meta.total_pages, 3);
    }

    #[tokio::test]
    async fn update_to_own_email_skips_uniqueness_check() {
        let user = existing("Ada", "ada@x.com");
        let id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_find_by_email().never();
        repo.expect_update()
            .times(1)
            .returning(|user| Ok(user.clone()));

        let updated = service(repo)
            .update_user(
                id,
                UserChanges {
                    name: Some("Ada L.".into()),
                    email: Some("ada@x.com".into()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Ada L.");
        assert_eq!(updated.email, "ada@x.com");
    }

    #[tokio::test]
    async fn update_to_taken_email_fails_without_writing() {
        let user = existing("Ada", "ada@x.com");
        let id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_find_by_email()
            .with(eq("bea@x.com"))
            .returning(|email| Ok(Some(existing("Bea", email))));
        repo.expect_update().never();

        let err = service(repo)
            .update_user(
                id,
                UserChanges {
                    name: None,
                    email: Some("bea@x.com".into()),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AlreadyExists));
    }

    #[tokio::test]
    async fn empty_update_still_writes() {
        let user = existing("Ada", "ada@x.com");
        let id = user.id;
        let before = user.updated_at;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_update()
            .times(1)
            .returning(|user| Ok(user.clone()));

        let updated = service(repo)
            .update_user(id, UserChanges::default())
            .await
            .unwrap();

        assert_eq!(updated.name, "Ada");
        assert!(updated.updated_at >= before);
    }

    #[tokio::test]
    async fn update_rejects_empty_name() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();

        let err = service(repo)
            .update_user(
                Uuid::new_v4(),
                UserChanges {
                    name: Some(String::new()),
                    email: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_checks_existence_first() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let err = service(repo).delete_user(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn delete_existing_user() {
        let user = existing("Ada", "ada@x.com");
        let id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_delete().with(eq(id)).times(1).returning(|_| Ok(()));

        assert!(service(repo).delete_user(id).await.is_ok());
    }
}
