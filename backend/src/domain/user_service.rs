//! User account domain service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{UserRepository, UserRepositoryError, UsersCommand, UsersQuery};
use crate::domain::{
    AccountStatus, DocumentId, Error, InsertOutcome, Role, UpdateOutcome, UserAccount, UserDraft,
};

/// Message returned when registering an e-mail that is already taken.
pub const USER_ALREADY_EXISTS: &str = "User already exists";

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { email } => Error::invalid_request(USER_ALREADY_EXISTS)
            .with_details(json!({
                "field": "email",
                "value": email,
                "code": "duplicate_email",
            })),
    }
}

/// User account service backed by a repository.
#[derive(Clone)]
pub struct UserService<R> {
    repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create the service over `repo`.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<UserAccount>, Error> {
        self.repo.list_all().await.map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn register(&self, draft: UserDraft) -> Result<InsertOutcome, Error> {
        match self.repo.insert(&draft).await {
            Ok(inserted_id) => {
                info!(user_id = %inserted_id, "user registered");
                Ok(InsertOutcome { inserted_id })
            }
            Err(error @ UserRepositoryError::DuplicateEmail { .. }) => {
                warn!("registration rejected: e-mail already in use");
                Err(map_repository_error(error))
            }
            Err(error) => Err(map_repository_error(error)),
        }
    }

    async fn set_role(&self, id: &DocumentId, role: Role) -> Result<UpdateOutcome, Error> {
        let outcome = self
            .repo
            .set_role(id, &role)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %id, %role, matched = outcome.matched_count, "user role set");
        Ok(outcome)
    }

    async fn set_status(
        &self,
        id: &DocumentId,
        status: AccountStatus,
    ) -> Result<UpdateOutcome, Error> {
        let outcome = self
            .repo
            .set_status(id, &status)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %id, %status, matched = outcome.matched_count, "user status set");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::{Attributes, Email, ErrorCode};

    fn user_id() -> DocumentId {
        DocumentId::new("65a1f0c2e4b0a1b2c3d4e5f8").expect("valid id")
    }

    fn draft() -> UserDraft {
        UserDraft::new(
            Email::new("ada@example.com").expect("valid email"),
            None,
            Attributes::default(),
        )
    }

    #[tokio::test]
    async fn register_inserts_active_account() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .withf(|draft| draft.status().as_ref() == AccountStatus::ACTIVE)
            .times(1)
            .return_once(|_| Ok(user_id()));

        let service = UserService::new(Arc::new(repo));
        let outcome = service.register(draft()).await.expect("register succeeds");
        assert_eq!(outcome.inserted_id, user_id());
    }

    #[tokio::test]
    async fn register_duplicate_email_is_invalid_request() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .times(1)
            .return_once(|_| Err(UserRepositoryError::duplicate_email("ada@example.com")));

        let service = UserService::new(Arc::new(repo));
        let error = service.register(draft()).await.expect_err("duplicate");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), USER_ALREADY_EXISTS);
    }

    #[tokio::test]
    async fn set_role_passes_role_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_role()
            .withf(|_, role| role.as_ref() == "admin")
            .times(1)
            .return_once(|_, _| {
                Ok(UpdateOutcome {
                    matched_count: 1,
                    modified_count: 1,
                })
            });

        let service = UserService::new(Arc::new(repo));
        let outcome = service
            .set_role(&user_id(), Role::new("admin").expect("valid role"))
            .await
            .expect("update succeeds");
        assert_eq!(outcome.matched_count, 1);
    }

    #[tokio::test]
    async fn set_status_maps_query_failure_to_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_status()
            .times(1)
            .return_once(|_, _| Err(UserRepositoryError::query("write concern failed")));

        let service = UserService::new(Arc::new(repo));
        let error = service
            .set_status(&user_id(), AccountStatus::new("suspended").expect("valid status"))
            .await
            .expect_err("update fails");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
