//! Driven port for the loan application collection.

use async_trait::async_trait;

use crate::domain::{
    ApplicationStatus, DeleteOutcome, DocumentId, LoanApplication, LoanApplicationDraft,
    UpdateOutcome,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by loan application repository adapters.
    pub enum LoanApplicationRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "loan application store connection failed: {message}",
        /// The operation failed or returned an unreadable document.
        Query { message: String } => "loan application store query failed: {message}",
    }
}

/// Outcome of a conditional delete of a pending application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDeletion {
    /// The application was pending and has been removed.
    Deleted(DeleteOutcome),
    /// No application has the given identifier.
    NotFound,
    /// The application exists but is not pending; nothing was removed.
    ///
    /// Carries the stored status verbatim, which may be a value outside
    /// [`ApplicationStatus`] for documents written by older clients.
    NotPending(String),
}

/// Persistence operations over loan applications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanApplicationRepository: Send + Sync {
    /// Read every application in store order.
    async fn list_all(&self) -> Result<Vec<LoanApplication>, LoanApplicationRepositoryError>;

    /// Read applications whose `email` equals `email` exactly.
    async fn list_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<LoanApplication>, LoanApplicationRepositoryError>;

    /// Read applications in the given review state.
    async fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<LoanApplication>, LoanApplicationRepositoryError>;

    /// Insert a new application and return the identifier the store assigned.
    async fn insert(
        &self,
        draft: &LoanApplicationDraft,
    ) -> Result<DocumentId, LoanApplicationRepositoryError>;

    /// Remove the application only if it is still pending.
    ///
    /// The removal itself must be a single store operation filtered on both
    /// the identifier and the pending status.
    async fn delete_pending(
        &self,
        id: &DocumentId,
    ) -> Result<PendingDeletion, LoanApplicationRepositoryError>;

    /// Replace the review state of one application.
    async fn set_status(
        &self,
        id: &DocumentId,
        status: ApplicationStatus,
    ) -> Result<UpdateOutcome, LoanApplicationRepositoryError>;
}
