//! Shared validation helpers for inbound HTTP adapters.

use serde_json::{Map, Value, json};

use crate::domain::document::ID_FIELD;
use crate::domain::{
    AccountStatus, ApplicationStatus, Attributes, AttributesError, DocumentId, Email, Error,
    LabelValidationError, Role,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidObjectId,
    InvalidEmail,
    InvalidField,
    InvalidStatus,
    InvalidLabel,
    InvalidJson,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidObjectId => "invalid_object_id",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidField => "invalid_field",
            Self::InvalidStatus => "invalid_status",
            Self::InvalidLabel => "invalid_label",
            Self::InvalidJson => "invalid_json",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(name, format!("missing required field: {name}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn invalid_json_error(message: impl Into<String>) -> Error {
    ValidationError::new("body", message).with_code(ErrorCode::InvalidJson)
}

/// Parse a path segment into a store identifier.
pub(crate) fn parse_document_id(value: &str, field: FieldName) -> Result<DocumentId, Error> {
    DocumentId::new(value).map_err(|err| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} is not a valid ObjectId: {err}"))
            .with_value(ErrorCode::InvalidObjectId, value)
    })
}

pub(crate) fn parse_email(value: String, field: FieldName) -> Result<Email, Error> {
    Email::new(value.as_str()).map_err(|err| {
        ValidationError::new(field.as_str(), err.to_string())
            .with_value(ErrorCode::InvalidEmail, value)
    })
}

/// Validate free-form document fields.
pub(crate) fn parse_attributes(fields: Map<String, Value>) -> Result<Attributes, Error> {
    Attributes::new(fields).map_err(|err| {
        let field = match &err {
            AttributesError::EmptyKey => String::new(),
            AttributesError::ReservedKey => ID_FIELD.to_owned(),
            AttributesError::OperatorKey { key } | AttributesError::DottedKey { key } => {
                key.clone()
            }
        };
        ValidationError::new(field, err.to_string()).with_code(ErrorCode::InvalidField)
    })
}

pub(crate) fn parse_application_status(
    value: String,
    field: FieldName,
) -> Result<ApplicationStatus, Error> {
    value.parse().map_err(|_| {
        let field = field.as_str();
        ValidationError::new(
            field,
            format!("{field} must be one of Pending, Approved or Rejected"),
        )
        .with_value(ErrorCode::InvalidStatus, value)
    })
}

fn label_error(field: FieldName, err: &LabelValidationError, value: String) -> Error {
    ValidationError::new(field.as_str(), err.to_string()).with_value(ErrorCode::InvalidLabel, value)
}

pub(crate) fn parse_role(value: String, field: FieldName) -> Result<Role, Error> {
    Role::new(value.as_str()).map_err(|err| label_error(field, &err, value))
}

pub(crate) fn parse_account_status(value: String, field: FieldName) -> Result<AccountStatus, Error> {
    AccountStatus::new(value.as_str()).map_err(|err| label_error(field, &err, value))
}
