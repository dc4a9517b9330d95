//! User accounts.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Attributes, DocumentId, Email};

/// Maximum accepted length of a role or account status label.
pub const LABEL_MAX: usize = 64;

/// Validation errors for account labels ([`Role`], [`AccountStatus`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelValidationError {
    /// Input was blank.
    #[error("{field} must not be empty")]
    Empty {
        /// Field being validated.
        field: &'static str,
    },
    /// Input exceeded [`LABEL_MAX`] characters.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Field being validated.
        field: &'static str,
        /// Upper bound.
        max: usize,
    },
}

fn validate_label(field: &'static str, raw: String) -> Result<String, LabelValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LabelValidationError::Empty { field });
    }
    if trimmed.chars().count() > LABEL_MAX {
        return Err(LabelValidationError::TooLong {
            field,
            max: LABEL_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

/// Free-text role assigned by an administrator (for example `admin`,
/// `manager`, `borrower`). Surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Role(String);

impl Role {
    /// Validate and construct a role.
    ///
    /// # Errors
    /// Returns [`LabelValidationError`] when blank or too long.
    pub fn new(raw: impl Into<String>) -> Result<Self, LabelValidationError> {
        validate_label("role", raw.into()).map(Self)
    }

    pub(crate) fn from_store(raw: String) -> Self {
        Self(raw)
    }
}

/// Free-text account status (`active` on creation; administrators may set
/// any other label such as `suspended`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountStatus(String);

impl AccountStatus {
    /// Status every new account starts with.
    pub const ACTIVE: &'static str = "active";

    /// Validate and construct a status label.
    ///
    /// # Errors
    /// Returns [`LabelValidationError`] when blank or too long.
    pub fn new(raw: impl Into<String>) -> Result<Self, LabelValidationError> {
        validate_label("status", raw.into()).map(Self)
    }

    /// The `active` status.
    #[must_use]
    pub fn active() -> Self {
        Self(Self::ACTIVE.to_owned())
    }

    pub(crate) fn from_store(raw: String) -> Self {
        Self(raw)
    }
}

macro_rules! label_conversions {
    ($($ty:ident),*) => {
        $(
            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl TryFrom<String> for $ty {
                type Error = LabelValidationError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }
        )*
    };
}

label_conversions!(Role, AccountStatus);

/// Content of a new account. The status is always [`AccountStatus::ACTIVE`].
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    email: Email,
    role: Option<Role>,
    attributes: Attributes,
}

impl UserDraft {
    /// Build a draft; any submitted status is discarded.
    #[must_use]
    pub fn new(email: Email, role: Option<Role>, attributes: Attributes) -> Self {
        Self {
            email,
            role,
            attributes,
        }
    }

    /// Account e-mail, unique across all accounts.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Initial role, if any.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Status every new account starts with.
    #[must_use]
    pub fn status(&self) -> AccountStatus {
        AccountStatus::active()
    }

    /// Free-form account fields (name, photo URL, ...).
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// A stored user account.
///
/// ## Invariants
/// - No two accounts share an [`Email`].
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccount {
    id: DocumentId,
    email: Email,
    role: Option<Role>,
    status: AccountStatus,
    attributes: Attributes,
}

impl UserAccount {
    /// Materialise a freshly inserted draft.
    #[must_use]
    pub fn new(id: DocumentId, draft: UserDraft) -> Self {
        let status = draft.status();
        let UserDraft {
            email,
            role,
            attributes,
        } = draft;
        Self {
            id,
            email,
            role,
            status,
            attributes,
        }
    }

    /// Rebuild an account read back from the store.
    #[must_use]
    pub fn from_parts(
        id: DocumentId,
        email: Email,
        role: Option<Role>,
        status: AccountStatus,
        attributes: Attributes,
    ) -> Self {
        Self {
            id,
            email,
            role,
            status,
            attributes,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Account e-mail.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Assigned role, if any.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Account status.
    #[must_use]
    pub fn status(&self) -> &AccountStatus {
        &self.status
    }

    /// Free-form account fields.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Replace the role, reporting whether it changed.
    pub fn set_role(&mut self, role: Role) -> bool {
        let changed = self.role.as_ref() != Some(&role);
        self.role = Some(role);
        changed
    }

    /// Replace the status, reporting whether it changed.
    pub fn set_status(&mut self, status: AccountStatus) -> bool {
        let changed = self.status != status;
        self.status = status;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn role_trims_whitespace() {
        let role = Role::new("  admin ").expect("valid role");
        assert_eq!(role.as_ref(), "admin");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_labels_are_rejected(#[case] raw: &str) {
        assert_eq!(
            Role::new(raw),
            Err(LabelValidationError::Empty { field: "role" })
        );
        assert_eq!(
            AccountStatus::new(raw),
            Err(LabelValidationError::Empty { field: "status" })
        );
    }

    #[rstest]
    fn overlong_labels_are_rejected() {
        let raw = "x".repeat(LABEL_MAX + 1);
        assert_eq!(
            AccountStatus::new(raw),
            Err(LabelValidationError::TooLong {
                field: "status",
                max: LABEL_MAX
            })
        );
    }

    #[rstest]
    fn new_accounts_are_active() {
        let draft = UserDraft::new(
            Email::new("ada@example.com").expect("valid email"),
            None,
            Attributes::default(),
        );
        let account = UserAccount::new(DocumentId::from_bytes([9; 12]), draft);
        assert_eq!(account.status().as_ref(), AccountStatus::ACTIVE);
    }

    #[rstest]
    fn set_role_reports_change() {
        let mut account = UserAccount::new(
            DocumentId::from_bytes([9; 12]),
            UserDraft::new(
                Email::new("ada@example.com").expect("valid email"),
                Some(Role::new("borrower").expect("valid role")),
                Attributes::default(),
            ),
        );
        assert!(!account.set_role(Role::new("borrower").expect("valid role")));
        assert!(account.set_role(Role::new("admin").expect("valid role")));
        assert_eq!(account.role().map(AsRef::as_ref), Some("admin"));
    }
}
