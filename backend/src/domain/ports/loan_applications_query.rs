//! Driving port for reading loan applications.

use async_trait::async_trait;

use crate::domain::{Error, LoanApplication};

/// Read-side use cases for loan applications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanApplicationsQuery: Send + Sync {
    /// Every application.
    async fn all_applications(&self) -> Result<Vec<LoanApplication>, Error>;

    /// Applications submitted under exactly `email` (case-sensitive).
    async fn applications_for(&self, email: &str) -> Result<Vec<LoanApplication>, Error>;

    /// Applications an administrator has approved.
    async fn approved_applications(&self) -> Result<Vec<LoanApplication>, Error>;
}
