//! Driven port for the user account collection.

use async_trait::async_trait;

use crate::domain::{AccountStatus, DocumentId, Role, UpdateOutcome, UserAccount, UserDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// The operation failed or returned an unreadable document.
        Query { message: String } => "user store query failed: {message}",
        /// Another account already uses the e-mail address.
        DuplicateEmail { email: String } => "an account already exists for {email}",
    }
}

/// Persistence operations over user accounts.
///
/// Adapters must enforce e-mail uniqueness atomically with the insert.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Read every account in store order.
    async fn list_all(&self) -> Result<Vec<UserAccount>, UserRepositoryError>;

    /// Insert a new account, failing with
    /// [`UserRepositoryError::DuplicateEmail`] when the e-mail is taken.
    async fn insert(&self, draft: &UserDraft) -> Result<DocumentId, UserRepositoryError>;

    /// Replace the role of one account.
    async fn set_role(&self, id: &DocumentId, role: &Role)
    -> Result<UpdateOutcome, UserRepositoryError>;

    /// Replace the status of one account.
    async fn set_status(
        &self,
        id: &DocumentId,
        status: &AccountStatus,
    ) -> Result<UpdateOutcome, UserRepositoryError>;
}
