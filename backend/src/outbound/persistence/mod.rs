//! Document-store persistence adapters.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by MongoDB through the official async driver.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   stored documents and domain types. No business logic resides here.
//! - **Internal mapping**: Field names and document conversions
//!   (`mongo_documents.rs`) never leak into the domain layer.
//! - **Shared client**: One verified connection is opened by [`MongoStore`]
//!   and handed out as per-collection repositories.
//! - **Strongly typed errors**: Driver errors are mapped to the port error
//!   enums, separating unreachable stores from failed operations.
//!
//! [`InMemoryStore`] and [`DisconnectedStore`] implement the same ports for
//! local runs, tests, and degraded startup.
//!
//! # Example
//!
//! ```ignore
//! use microloan_backend::outbound::persistence::{MongoStore, StoreConfig};
//!
//! let config = StoreConfig::new("mongodb://localhost:27017", "microLoanRequestDB");
//! let store = MongoStore::connect(&config).await?;
//! let offers = store.loan_offers();
//! ```

mod disconnected_store;
mod in_memory_store;
mod mongo_documents;
mod mongo_error_mapping;
mod mongo_loan_application_repository;
mod mongo_loan_offer_repository;
mod mongo_store;
mod mongo_user_repository;

pub use disconnected_store::DisconnectedStore;
pub use in_memory_store::InMemoryStore;
pub use mongo_loan_application_repository::MongoLoanApplicationRepository;
pub use mongo_loan_offer_repository::MongoLoanOfferRepository;
pub use mongo_store::{
    LOAN_APPLICATIONS_COLLECTION, LOAN_OFFERS_COLLECTION, MongoStore, StoreConfig, StoreError,
    USERS_COLLECTION,
};
pub use mongo_user_repository::MongoUserRepository;
