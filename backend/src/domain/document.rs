//! Building blocks shared by every stored entity: identifiers, free-form
//! attributes, and the outcomes reported by store writes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the store keeps the document identifier.
pub const ID_FIELD: &str = "_id";

/// Length in bytes of a store identifier.
pub const DOCUMENT_ID_LEN: usize = 12;

/// Errors raised when parsing a [`DocumentId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentIdError {
    /// Input was empty.
    #[error("identifier must not be empty")]
    Empty,
    /// Input was not 24 hexadecimal characters.
    #[error("identifier must be a 24 character hex string")]
    Malformed,
}

/// Opaque identifier assigned by the document store on insertion.
///
/// Rendered as a 24 character lowercase hex string. Once assigned the
/// identifier never changes and is the only lookup key for its document.
///
/// # Examples
/// ```
/// use microloan_backend::domain::DocumentId;
///
/// let id = DocumentId::new("65a1f0c2e4b0a1b2c3d4e5f6").expect("valid id");
/// assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
/// assert!(DocumentId::new("42").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId([u8; DOCUMENT_ID_LEN]);

impl DocumentId {
    /// Parse an identifier from its hex rendering.
    ///
    /// # Errors
    /// Returns [`DocumentIdError`] when `raw` is empty or not 24 hex characters.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DocumentIdError> {
        let raw = raw.as_ref();
        if raw.is_empty() {
            return Err(DocumentIdError::Empty);
        }
        let mut bytes = [0_u8; DOCUMENT_ID_LEN];
        hex::decode_to_slice(raw, &mut bytes).map_err(|_| DocumentIdError::Malformed)?;
        Ok(Self(bytes))
    }

    /// Wrap raw identifier bytes produced by a store adapter.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; DOCUMENT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw identifier bytes.
    #[must_use]
    pub const fn bytes(&self) -> [u8; DOCUMENT_ID_LEN] {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for DocumentId {
    type Err = DocumentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = DocumentIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentId> for String {
    fn from(value: DocumentId) -> Self {
        value.to_string()
    }
}

/// Errors raised when validating [`Attributes`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributesError {
    /// A field name was empty.
    #[error("field names must not be empty")]
    EmptyKey,
    /// A field tried to set the store-managed identifier.
    #[error("field `_id` is assigned by the store")]
    ReservedKey,
    /// A field name would be read as a store operator.
    #[error("field `{key}` must not start with `$`")]
    OperatorKey {
        /// Offending field name.
        key: String,
    },
    /// A field name would be read as a nested path.
    #[error("field `{key}` must not contain `.`")]
    DottedKey {
        /// Offending field name.
        key: String,
    },
}

/// Free-form fields carried by a document alongside its typed fields.
///
/// ## Invariants
/// - No top-level key is empty, equal to `_id`, starts with `$`, or contains `.`.
///
/// Documents already held by the store are admitted through a crate-private
/// constructor so legacy data never becomes unreadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Validate submitted fields.
    ///
    /// # Errors
    /// Returns the first [`AttributesError`] found among the keys.
    ///
    /// # Examples
    /// ```
    /// use microloan_backend::domain::Attributes;
    /// use serde_json::json;
    ///
    /// let map = json!({ "amount": 500, "purpose": "medical" });
    /// let attrs = Attributes::new(map.as_object().cloned().unwrap_or_default());
    /// assert!(attrs.is_ok());
    /// ```
    pub fn new(fields: Map<String, Value>) -> Result<Self, AttributesError> {
        for key in fields.keys() {
            validate_key(key)?;
        }
        Ok(Self(fields))
    }

    /// Admit fields read back from the store without re-validating them.
    pub(crate) fn from_store(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrow the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying map.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Whether no free-form fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn validate_key(key: &str) -> Result<(), AttributesError> {
    if key.is_empty() {
        return Err(AttributesError::EmptyKey);
    }
    if key == ID_FIELD {
        return Err(AttributesError::ReservedKey);
    }
    if key.starts_with('$') {
        return Err(AttributesError::OperatorKey {
            key: key.to_owned(),
        });
    }
    if key.contains('.') {
        return Err(AttributesError::DottedKey {
            key: key.to_owned(),
        });
    }
    Ok(())
}

impl TryFrom<Map<String, Value>> for Attributes {
    type Error = AttributesError;

    fn try_from(value: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Attributes> for Map<String, Value> {
    fn from(value: Attributes) -> Self {
        value.0
    }
}

/// Result of inserting one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Identifier the store assigned to the new document.
    pub inserted_id: DocumentId,
}

/// Result of updating one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Documents matching the filter (0 or 1).
    pub matched_count: u64,
    /// Documents whose content actually changed (0 or 1).
    pub modified_count: u64,
}

/// Result of deleting one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteOutcome {
    /// Documents removed (0 or 1).
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object literal")
    }

    #[rstest]
    #[case("65a1f0c2e4b0a1b2c3d4e5f6")]
    #[case("65A1F0C2E4B0A1B2C3D4E5F6")]
    fn document_id_accepts_hex(#[case] raw: &str) {
        let id = DocumentId::new(raw).expect("valid id");
        assert_eq!(id.to_string(), raw.to_ascii_lowercase());
    }

    #[rstest]
    #[case("", DocumentIdError::Empty)]
    #[case("not-an-id", DocumentIdError::Malformed)]
    #[case("65a1f0c2e4b0a1b2c3d4e5", DocumentIdError::Malformed)]
    #[case("65a1f0c2e4b0a1b2c3d4e5f6aa", DocumentIdError::Malformed)]
    #[case("zza1f0c2e4b0a1b2c3d4e5f6", DocumentIdError::Malformed)]
    fn document_id_rejects_malformed_input(#[case] raw: &str, #[case] expected: DocumentIdError) {
        assert_eq!(DocumentId::new(raw), Err(expected));
    }

    #[rstest]
    fn document_id_serialises_as_hex_string() {
        let id = DocumentId::from_bytes([1; DOCUMENT_ID_LEN]);
        let value = serde_json::to_value(id).expect("serialise");
        assert_eq!(value, json!("010101010101010101010101"));
    }

    #[rstest]
    fn attributes_accept_plain_fields() {
        let attrs = Attributes::new(map(json!({ "amount": 500, "purpose": "medical" })))
            .expect("valid attributes");
        assert_eq!(attrs.get("amount"), Some(&json!(500)));
    }

    #[rstest]
    #[case(json!({ "": 1 }), AttributesError::EmptyKey)]
    #[case(json!({ "_id": "x" }), AttributesError::ReservedKey)]
    #[case(json!({ "$where": "1" }), AttributesError::OperatorKey { key: "$where".to_owned() })]
    #[case(json!({ "a.b": 1 }), AttributesError::DottedKey { key: "a.b".to_owned() })]
    fn attributes_reject_unsafe_keys(#[case] fields: Value, #[case] expected: AttributesError) {
        assert_eq!(Attributes::new(map(fields)), Err(expected));
    }

    #[rstest]
    fn attributes_allow_nested_operator_like_values() {
        let attrs = Attributes::new(map(json!({ "notes": { "$text": "fine when nested" } })));
        assert!(attrs.is_ok());
    }
}
