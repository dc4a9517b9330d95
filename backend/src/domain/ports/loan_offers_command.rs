//! Driving port for administrative changes to loan offers.

use async_trait::async_trait;

use crate::domain::{DeleteOutcome, DocumentId, Error, InsertOutcome, LoanOfferDraft, UpdateOutcome};

/// Write-side use cases for loan offers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanOffersCommand: Send + Sync {
    /// Publish a new offer.
    async fn submit(&self, draft: LoanOfferDraft) -> Result<InsertOutcome, Error>;

    /// Remove an offer. Removing an unknown id reports a zero count.
    async fn remove(&self, id: &DocumentId) -> Result<DeleteOutcome, Error>;

    /// Show or hide an offer on the landing page.
    async fn set_home_visibility(
        &self,
        id: &DocumentId,
        show_on_home: bool,
    ) -> Result<UpdateOutcome, Error>;
}
