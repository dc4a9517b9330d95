//! Driving port for reading user accounts.

use async_trait::async_trait;

use crate::domain::{Error, UserAccount};

/// Read-side use cases for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every account.
    async fn list_users(&self) -> Result<Vec<UserAccount>, Error>;
}
