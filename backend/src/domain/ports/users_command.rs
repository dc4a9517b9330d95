//! Driving port for registering and administering user accounts.

use async_trait::async_trait;

use crate::domain::{AccountStatus, DocumentId, Error, InsertOutcome, Role, UpdateOutcome, UserDraft};

/// Write-side use cases for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create an account; fails with `invalid_request` when the e-mail is taken.
    async fn register(&self, draft: UserDraft) -> Result<InsertOutcome, Error>;

    /// Assign a role.
    async fn set_role(&self, id: &DocumentId, role: Role) -> Result<UpdateOutcome, Error>;

    /// Change the account status.
    async fn set_status(&self, id: &DocumentId, status: AccountStatus)
    -> Result<UpdateOutcome, Error>;
}
