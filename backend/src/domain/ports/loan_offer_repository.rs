//! Driven port for the loan offer collection.

use async_trait::async_trait;

use crate::domain::{DeleteOutcome, DocumentId, LoanOffer, LoanOfferDraft, UpdateOutcome};

use super::define_port_error;

define_port_error! {
    /// Errors raised by loan offer repository adapters.
    pub enum LoanOfferRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "loan offer store connection failed: {message}",
        /// The operation failed or returned an unreadable document.
        Query { message: String } => "loan offer store query failed: {message}",
    }
}

/// Persistence operations over loan offers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanOfferRepository: Send + Sync {
    /// Read offers in store order, at most `limit` when given.
    async fn list(&self, limit: Option<u32>) -> Result<Vec<LoanOffer>, LoanOfferRepositoryError>;

    /// Fetch one offer.
    async fn find_by_id(
        &self,
        id: &DocumentId,
    ) -> Result<Option<LoanOffer>, LoanOfferRepositoryError>;

    /// Insert a new offer and return the identifier the store assigned.
    async fn insert(&self, draft: &LoanOfferDraft) -> Result<DocumentId, LoanOfferRepositoryError>;

    /// Delete one offer.
    async fn delete(&self, id: &DocumentId) -> Result<DeleteOutcome, LoanOfferRepositoryError>;

    /// Set the landing-page flag on one offer.
    async fn set_show_on_home(
        &self,
        id: &DocumentId,
        show_on_home: bool,
    ) -> Result<UpdateOutcome, LoanOfferRepositoryError>;
}
