//! Driving port for reading loan offers.

use async_trait::async_trait;

use crate::domain::{DocumentId, Error, LoanOffer};

/// Read-side use cases for loan offers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanOffersQuery: Send + Sync {
    /// Offers featured on the landing page (at most [`crate::domain::HOME_OFFER_LIMIT`]).
    async fn home_offers(&self) -> Result<Vec<LoanOffer>, Error>;

    /// Every offer.
    async fn all_offers(&self) -> Result<Vec<LoanOffer>, Error>;

    /// One offer; fails with `not_found` when absent.
    async fn offer(&self, id: &DocumentId) -> Result<LoanOffer, Error>;
}
