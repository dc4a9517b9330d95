//! Microloan marketplace backend.
//!
//! Loan offers, loan applications and user accounts are stored as documents
//! and served over a small REST surface. The crate follows a hexagonal
//! layout: `domain` owns entities and ports, `inbound` adapts HTTP requests
//! onto driving ports, and `outbound` implements the driven ports over
//! MongoDB or an in-memory store.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
