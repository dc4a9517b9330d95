//! Domain primitives, entities, and services.
//!
//! Purpose: define the marketplace's entities (loan offers, loan
//! applications, user accounts), the value types guarding their invariants,
//! and the services implementing the driving ports. Nothing here knows about
//! HTTP or MongoDB.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `DocumentId`, `Attributes`, and write outcomes shared by every entity.
//! - `LoanOffer`, `LoanApplication`, `UserAccount` and their drafts.
//! - `LoanOfferService`, `LoanApplicationService`, `UserService`.

pub mod document;
pub mod email;
pub mod error;
pub mod loan_application;
pub mod loan_application_service;
pub mod loan_offer;
pub mod loan_offer_service;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::document::{
    Attributes, AttributesError, DeleteOutcome, DocumentId, DocumentIdError, InsertOutcome,
    UpdateOutcome,
};
pub use self::email::{Email, EmailValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::loan_application::{
    ApplicationStatus, LoanApplication, LoanApplicationDraft, UnknownApplicationStatus,
};
pub use self::loan_application_service::{APPLICATION_NOT_FOUND, LoanApplicationService};
pub use self::loan_offer::{HOME_OFFER_LIMIT, LoanOffer, LoanOfferDraft};
pub use self::loan_offer_service::{LOAN_NOT_FOUND, LoanOfferService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{AccountStatus, LabelValidationError, Role, UserAccount, UserDraft};
pub use self::user_service::{USER_ALREADY_EXISTS, UserService};
