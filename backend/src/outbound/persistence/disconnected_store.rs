//! Stand-in store used when the database could not be reached at startup.
//!
//! Every operation fails with a connection error so data routes answer 503
//! while the process keeps serving liveness probes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    LoanApplicationRepository, LoanApplicationRepositoryError, LoanOfferRepository,
    LoanOfferRepositoryError, PendingDeletion, UserRepository, UserRepositoryError,
};
use crate::domain::{
    AccountStatus, ApplicationStatus, DeleteOutcome, DocumentId, LoanApplication,
    LoanApplicationDraft, LoanOffer, LoanOfferDraft, Role, UpdateOutcome, UserAccount, UserDraft,
};

/// Store that reports the startup connection failure on every call.
#[derive(Debug, Clone)]
pub struct DisconnectedStore {
    reason: Arc<str>,
}

impl DisconnectedStore {
    /// Remember why the connection failed.
    #[must_use]
    pub fn new(reason: impl Into<Arc<str>>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn message(&self) -> String {
        format!("database is not connected: {}", self.reason)
    }
}

#[async_trait]
impl LoanOfferRepository for DisconnectedStore {
    async fn list(&self, _limit: Option<u32>) -> Result<Vec<LoanOffer>, LoanOfferRepositoryError> {
        Err(LoanOfferRepositoryError::connection(self.message()))
    }

    async fn find_by_id(
        &self,
        _id: &DocumentId,
    ) -> Result<Option<LoanOffer>, LoanOfferRepositoryError> {
        Err(LoanOfferRepositoryError::connection(self.message()))
    }

    async fn insert(&self, _draft: &LoanOfferDraft) -> Result<DocumentId, LoanOfferRepositoryError> {
        Err(LoanOfferRepositoryError::connection(self.message()))
    }

    async fn delete(&self, _id: &DocumentId) -> Result<DeleteOutcome, LoanOfferRepositoryError> {
        Err(LoanOfferRepositoryError::connection(self.message()))
    }

    async fn set_show_on_home(
        &self,
        _id: &DocumentId,
        _show_on_home: bool,
    ) -> Result<UpdateOutcome, LoanOfferRepositoryError> {
        Err(LoanOfferRepositoryError::connection(self.message()))
    }
}

#[async_trait]
impl LoanApplicationRepository for DisconnectedStore {
    async fn list_all(&self) -> Result<Vec<LoanApplication>, LoanApplicationRepositoryError> {
        Err(LoanApplicationRepositoryError::connection(self.message()))
    }

    async fn list_by_email(
        &self,
        _email: &str,
    ) -> Result<Vec<LoanApplication>, LoanApplicationRepositoryError> {
        Err(LoanApplicationRepositoryError::connection(self.message()))
    }

    async fn list_by_status(
        &self,
        _status: ApplicationStatus,
    ) -> Result<Vec<LoanApplication>, LoanApplicationRepositoryError> {
        Err(LoanApplicationRepositoryError::connection(self.message()))
    }

    async fn insert(
        &self,
        _draft: &LoanApplicationDraft,
    ) -> Result<DocumentId, LoanApplicationRepositoryError> {
        Err(LoanApplicationRepositoryError::connection(self.message()))
    }

    async fn delete_pending(
        &self,
        _id: &DocumentId,
    ) -> Result<PendingDeletion, LoanApplicationRepositoryError> {
        Err(LoanApplicationRepositoryError::connection(self.message()))
    }

    async fn set_status(
        &self,
        _id: &DocumentId,
        _status: ApplicationStatus,
    ) -> Result<UpdateOutcome, LoanApplicationRepositoryError> {
        Err(LoanApplicationRepositoryError::connection(self.message()))
    }
}

#[async_trait]
impl UserRepository for DisconnectedStore {
    async fn list_all(&self) -> Result<Vec<UserAccount>, UserRepositoryError> {
        Err(UserRepositoryError::connection(self.message()))
    }

    async fn insert(&self, _draft: &UserDraft) -> Result<DocumentId, UserRepositoryError> {
        Err(UserRepositoryError::connection(self.message()))
    }

    async fn set_role(
        &self,
        _id: &DocumentId,
        _role: &Role,
    ) -> Result<UpdateOutcome, UserRepositoryError> {
        Err(UserRepositoryError::connection(self.message()))
    }

    async fn set_status(
        &self,
        _id: &DocumentId,
        _status: &AccountStatus,
    ) -> Result<UpdateOutcome, UserRepositoryError> {
        Err(UserRepositoryError::connection(self.message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn every_call_reports_a_connection_failure() {
        let store = DisconnectedStore::new("server selection timed out");

        let offers = store.list(None).await.expect_err("disconnected");
        let users = UserRepository::list_all(&store)
            .await
            .expect_err("disconnected");

        assert!(matches!(offers, LoanOfferRepositoryError::Connection { .. }));
        assert!(matches!(users, UserRepositoryError::Connection { .. }));
        assert!(offers.to_string().contains("server selection timed out"));
    }
}
