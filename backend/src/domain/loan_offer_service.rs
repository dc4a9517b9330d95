//! Loan offer domain service.
//!
//! Implements both loan offer driving ports over a [`LoanOfferRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    LoanOfferRepository, LoanOfferRepositoryError, LoanOffersCommand, LoanOffersQuery,
};
use crate::domain::{
    DeleteOutcome, DocumentId, Error, HOME_OFFER_LIMIT, InsertOutcome, LoanOffer, LoanOfferDraft,
    UpdateOutcome,
};

/// Message returned when an offer lookup misses.
pub const LOAN_NOT_FOUND: &str = "Loan not found";

fn map_repository_error(error: LoanOfferRepositoryError) -> Error {
    match error {
        LoanOfferRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("loan offer store unavailable: {message}"))
        }
        LoanOfferRepositoryError::Query { message } => {
            Error::internal(format!("loan offer store error: {message}"))
        }
    }
}

/// Loan offer service backed by a repository.
#[derive(Clone)]
pub struct LoanOfferService<R> {
    repo: Arc<R>,
}

impl<R> LoanOfferService<R> {
    /// Create the service over `repo`.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> LoanOffersQuery for LoanOfferService<R>
where
    R: LoanOfferRepository,
{
    async fn home_offers(&self) -> Result<Vec<LoanOffer>, Error> {
        self.repo
            .list(Some(HOME_OFFER_LIMIT))
            .await
            .map_err(map_repository_error)
    }

    async fn all_offers(&self) -> Result<Vec<LoanOffer>, Error> {
        self.repo.list(None).await.map_err(map_repository_error)
    }

    async fn offer(&self, id: &DocumentId) -> Result<LoanOffer, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(LOAN_NOT_FOUND))
    }
}

#[async_trait]
impl<R> LoanOffersCommand for LoanOfferService<R>
where
    R: LoanOfferRepository,
{
    async fn submit(&self, draft: LoanOfferDraft) -> Result<InsertOutcome, Error> {
        let inserted_id = self
            .repo
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(offer_id = %inserted_id, "loan offer published");
        Ok(InsertOutcome { inserted_id })
    }

    async fn remove(&self, id: &DocumentId) -> Result<DeleteOutcome, Error> {
        let outcome = self.repo.delete(id).await.map_err(map_repository_error)?;
        info!(offer_id = %id, deleted = outcome.deleted_count, "loan offer removed");
        Ok(outcome)
    }

    async fn set_home_visibility(
        &self,
        id: &DocumentId,
        show_on_home: bool,
    ) -> Result<UpdateOutcome, Error> {
        self.repo
            .set_show_on_home(id, show_on_home)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "loan_offer_service_tests.rs"]
mod tests;
