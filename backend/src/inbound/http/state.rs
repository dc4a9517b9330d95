//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoanApplicationRepository, LoanApplicationsCommand, LoanApplicationsQuery,
    LoanOfferRepository, LoanOffersCommand, LoanOffersQuery, UserRepository, UsersCommand,
    UsersQuery,
};
use crate::domain::{LoanApplicationService, LoanOfferService, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Offer mutations.
    pub loan_offers: Arc<dyn LoanOffersCommand>,
    /// Offer reads.
    pub loan_offers_query: Arc<dyn LoanOffersQuery>,
    /// Application mutations.
    pub loan_applications: Arc<dyn LoanApplicationsCommand>,
    /// Application reads.
    pub loan_applications_query: Arc<dyn LoanApplicationsQuery>,
    /// Account mutations.
    pub users: Arc<dyn UsersCommand>,
    /// Account reads.
    pub users_query: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Wire the domain services over one set of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use microloan_backend::inbound::http::state::HttpState;
    /// use microloan_backend::outbound::persistence::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_repositories(store.clone(), store.clone(), store);
    /// let _offers = state.loan_offers_query.clone();
    /// ```
    pub fn from_repositories<O, A, U>(offers: Arc<O>, applications: Arc<A>, users: Arc<U>) -> Self
    where
        O: LoanOfferRepository + 'static,
        A: LoanApplicationRepository + 'static,
        U: UserRepository + 'static,
    {
        let offer_service = Arc::new(LoanOfferService::new(offers));
        let application_service = Arc::new(LoanApplicationService::new(applications));
        let user_service = Arc::new(UserService::new(users));
        Self {
            loan_offers: offer_service.clone(),
            loan_offers_query: offer_service,
            loan_applications: application_service.clone(),
            loan_applications_query: application_service,
            users: user_service.clone(),
            users_query: user_service,
        }
    }
}
