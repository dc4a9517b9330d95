//! Loan application domain service.
//!
//! Implements both loan application driving ports. Withdrawal is the one
//! business rule here: an application can only be removed while it is
//! pending, which keeps reviewed applications on record.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    LoanApplicationRepository, LoanApplicationRepositoryError, LoanApplicationsCommand,
    LoanApplicationsQuery, PendingDeletion,
};
use crate::domain::{
    ApplicationStatus, DeleteOutcome, DocumentId, Error, InsertOutcome, LoanApplication,
    LoanApplicationDraft, UpdateOutcome,
};

/// Message returned when an application lookup misses.
pub const APPLICATION_NOT_FOUND: &str = "Application not found";

fn map_repository_error(error: LoanApplicationRepositoryError) -> Error {
    match error {
        LoanApplicationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("loan application store unavailable: {message}"))
        }
        LoanApplicationRepositoryError::Query { message } => {
            Error::internal(format!("loan application store error: {message}"))
        }
    }
}

fn not_pending_error(status: &str) -> Error {
    Error::invalid_request(format!(
        "Only pending applications can be cancelled; this application is {status}"
    ))
    .with_details(serde_json::json!({
        "field": "status",
        "value": status,
        "code": "application_not_pending",
    }))
}

/// Loan application service backed by a repository.
#[derive(Clone)]
pub struct LoanApplicationService<R> {
    repo: Arc<R>,
}

impl<R> LoanApplicationService<R> {
    /// Create the service over `repo`.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> LoanApplicationsQuery for LoanApplicationService<R>
where
    R: LoanApplicationRepository,
{
    async fn all_applications(&self) -> Result<Vec<LoanApplication>, Error> {
        self.repo.list_all().await.map_err(map_repository_error)
    }

    async fn applications_for(&self, email: &str) -> Result<Vec<LoanApplication>, Error> {
        self.repo
            .list_by_email(email)
            .await
            .map_err(map_repository_error)
    }

    async fn approved_applications(&self) -> Result<Vec<LoanApplication>, Error> {
        self.repo
            .list_by_status(ApplicationStatus::Approved)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> LoanApplicationsCommand for LoanApplicationService<R>
where
    R: LoanApplicationRepository,
{
    async fn submit(&self, draft: LoanApplicationDraft) -> Result<InsertOutcome, Error> {
        let inserted_id = self
            .repo
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(application_id = %inserted_id, "loan application submitted");
        Ok(InsertOutcome { inserted_id })
    }

    async fn cancel(&self, id: &DocumentId) -> Result<DeleteOutcome, Error> {
        match self
            .repo
            .delete_pending(id)
            .await
            .map_err(map_repository_error)?
        {
            PendingDeletion::Deleted(outcome) => {
                info!(application_id = %id, "loan application cancelled");
                Ok(outcome)
            }
            PendingDeletion::NotFound => Err(Error::not_found(APPLICATION_NOT_FOUND)),
            PendingDeletion::NotPending(status) => {
                warn!(application_id = %id, %status, "refused to cancel reviewed application");
                Err(not_pending_error(&status))
            }
        }
    }

    async fn set_status(
        &self,
        id: &DocumentId,
        status: ApplicationStatus,
    ) -> Result<UpdateOutcome, Error> {
        let outcome = self
            .repo
            .set_status(id, status)
            .await
            .map_err(map_repository_error)?;
        info!(application_id = %id, %status, matched = outcome.matched_count, "application status set");
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "loan_application_service_tests.rs"]
mod tests;
