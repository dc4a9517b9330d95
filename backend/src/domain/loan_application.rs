//! Loan applications submitted by borrowers and reviewed by administrators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Attributes, DocumentId, Email};

/// Review state of a loan application.
///
/// Applications start as [`ApplicationStatus::Pending`]; only pending
/// applications may be withdrawn by the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// Awaiting review.
    Pending,
    /// Accepted by an administrator.
    Approved,
    /// Declined by an administrator.
    Rejected,
}

impl ApplicationStatus {
    /// Wire representation, matching the stored string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string is not a known [`ApplicationStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be one of Pending, Approved, or Rejected (got `{value}`)")]
pub struct UnknownApplicationStatus {
    /// Rejected input.
    pub value: String,
}

impl FromStr for ApplicationStatus {
    type Err = UnknownApplicationStatus;

    /// Exact, case-sensitive match against the wire representation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            other => Err(UnknownApplicationStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Content of a new application. The status is always `Pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanApplicationDraft {
    email: Email,
    attributes: Attributes,
}

impl LoanApplicationDraft {
    /// Build a draft for `email` carrying the submitted fields.
    #[must_use]
    pub fn new(email: Email, attributes: Attributes) -> Self {
        Self { email, attributes }
    }

    /// Applicant e-mail.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Status every new application starts with.
    #[must_use]
    pub const fn status(&self) -> ApplicationStatus {
        ApplicationStatus::Pending
    }

    /// Free-form application fields.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// A stored loan application.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanApplication {
    id: DocumentId,
    email: Email,
    status: ApplicationStatus,
    attributes: Attributes,
}

impl LoanApplication {
    /// Materialise a freshly inserted draft.
    #[must_use]
    pub fn new(id: DocumentId, draft: LoanApplicationDraft) -> Self {
        let status = draft.status();
        let LoanApplicationDraft { email, attributes } = draft;
        Self {
            id,
            email,
            status,
            attributes,
        }
    }

    /// Rebuild an application read back from the store.
    #[must_use]
    pub fn from_parts(
        id: DocumentId,
        email: Email,
        status: ApplicationStatus,
        attributes: Attributes,
    ) -> Self {
        Self {
            id,
            email,
            status,
            attributes,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Applicant e-mail.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Current review state.
    #[must_use]
    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Free-form application fields.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Whether the applicant may still withdraw the application.
    #[must_use]
    pub fn is_cancellable(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }

    /// Replace the review state, reporting whether it changed.
    pub fn set_status(&mut self, status: ApplicationStatus) -> bool {
        let changed = self.status != status;
        self.status = status;
        changed
    }
}
