//! Driving port for submitting, withdrawing, and reviewing loan applications.

use async_trait::async_trait;

use crate::domain::{
    ApplicationStatus, DeleteOutcome, DocumentId, Error, InsertOutcome, LoanApplicationDraft,
    UpdateOutcome,
};

/// Write-side use cases for loan applications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanApplicationsCommand: Send + Sync {
    /// Record a new pending application.
    async fn submit(&self, draft: LoanApplicationDraft) -> Result<InsertOutcome, Error>;

    /// Withdraw an application.
    ///
    /// Fails with `not_found` for an unknown id and `invalid_request` once the
    /// application has left the pending state.
    async fn cancel(&self, id: &DocumentId) -> Result<DeleteOutcome, Error>;

    /// Record an administrator's review decision.
    async fn set_status(
        &self,
        id: &DocumentId,
        status: ApplicationStatus,
    ) -> Result<UpdateOutcome, Error>;
}
