//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are what inbound adapters call;
//! driven ports (`*Repository`) are what outbound adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod loan_application_repository;
mod loan_applications_command;
mod loan_applications_query;
mod loan_offer_repository;
mod loan_offers_command;
mod loan_offers_query;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use loan_application_repository::MockLoanApplicationRepository;
pub use loan_application_repository::{
    LoanApplicationRepository, LoanApplicationRepositoryError, PendingDeletion,
};
pub use loan_applications_command::LoanApplicationsCommand;
#[cfg(test)]
pub use loan_applications_command::MockLoanApplicationsCommand;
pub use loan_applications_query::LoanApplicationsQuery;
#[cfg(test)]
pub use loan_applications_query::MockLoanApplicationsQuery;
#[cfg(test)]
pub use loan_offer_repository::MockLoanOfferRepository;
pub use loan_offer_repository::{LoanOfferRepository, LoanOfferRepositoryError};
pub use loan_offers_command::LoanOffersCommand;
#[cfg(test)]
pub use loan_offers_command::MockLoanOffersCommand;
pub use loan_offers_query::LoanOffersQuery;
#[cfg(test)]
pub use loan_offers_query::MockLoanOffersQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_query::UsersQuery;
#[cfg(test)]
pub use users_query::MockUsersQuery;
