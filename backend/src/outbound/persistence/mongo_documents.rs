//! Translation between domain entities and MongoDB documents.
//!
//! Typed fields (`_id`, `showOnHome`, `email`, `status`, `role`) are lifted
//! out of the stored document; whatever remains becomes the entity's
//! free-form [`Attributes`], rendered as relaxed extended JSON.

use mongodb::bson::{self, Bson, Document, doc, oid::ObjectId};
use serde_json::Value;
use tracing::warn;

use crate::domain::document::ID_FIELD;
use crate::domain::ports::PendingDeletion;
use crate::domain::{
    AccountStatus, ApplicationStatus, Attributes, DocumentId, Email, LoanApplication,
    LoanApplicationDraft, LoanOffer, LoanOfferDraft, Role, UnknownApplicationStatus, UserAccount,
    UserDraft,
};

pub(crate) const SHOW_ON_HOME_FIELD: &str = "showOnHome";
pub(crate) const EMAIL_FIELD: &str = "email";
pub(crate) const STATUS_FIELD: &str = "status";
pub(crate) const ROLE_FIELD: &str = "role";

/// Failures converting between stored documents and domain entities.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub(crate) enum DocumentMappingError {
    #[error("document is missing `{field}`")]
    MissingField { field: &'static str },
    #[error("field `{field}` has an unexpected type")]
    UnexpectedType { field: &'static str },
    #[error("field `{field}` holds an invalid value: {message}")]
    InvalidValue { field: &'static str, message: String },
    #[error("failed to encode document: {message}")]
    Encode { message: String },
}

pub(crate) fn object_id(id: &DocumentId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}

pub(crate) fn document_id(oid: ObjectId) -> DocumentId {
    DocumentId::from_bytes(oid.bytes())
}

pub(crate) fn id_filter(id: &DocumentId) -> Document {
    doc! { ID_FIELD: object_id(id) }
}

fn take_id(document: &mut Document) -> Result<DocumentId, DocumentMappingError> {
    match document.remove(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => Ok(document_id(oid)),
        Some(_) => Err(DocumentMappingError::UnexpectedType { field: ID_FIELD }),
        None => Err(DocumentMappingError::MissingField { field: ID_FIELD }),
    }
}

fn take_string(
    document: &mut Document,
    field: &'static str,
) -> Result<Option<String>, DocumentMappingError> {
    match document.remove(field) {
        Some(Bson::String(value)) => Ok(Some(value)),
        Some(Bson::Null) | None => Ok(None),
        Some(_) => Err(DocumentMappingError::UnexpectedType { field }),
    }
}

fn take_required_string(
    document: &mut Document,
    field: &'static str,
) -> Result<String, DocumentMappingError> {
    take_string(document, field)?.ok_or(DocumentMappingError::MissingField { field })
}

fn take_bool(
    document: &mut Document,
    field: &'static str,
) -> Result<Option<bool>, DocumentMappingError> {
    match document.remove(field) {
        Some(Bson::Boolean(value)) => Ok(Some(value)),
        Some(Bson::Null) | None => Ok(None),
        Some(_) => Err(DocumentMappingError::UnexpectedType { field }),
    }
}

fn into_attributes(document: Document) -> Attributes {
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(fields) => Attributes::from_store(fields),
        _ => Attributes::default(),
    }
}

fn attributes_document(attributes: &Attributes) -> Result<Document, DocumentMappingError> {
    bson::to_document(attributes.as_map()).map_err(|err| DocumentMappingError::Encode {
        message: err.to_string(),
    })
}

/// Decode a batch of stored documents, skipping any that cannot be mapped.
///
/// One legacy or hand-edited document must not take down a whole listing, so
/// failures are logged with the document's `_id` and dropped.
pub(crate) fn decode_readable<T, F>(documents: Vec<Document>, collection: &str, decode: F) -> Vec<T>
where
    F: Fn(Document) -> Result<T, DocumentMappingError>,
{
    documents
        .into_iter()
        .filter_map(|document| {
            let id = document.get(ID_FIELD).map(ToString::to_string);
            decode(document)
                .inspect_err(|err| {
                    warn!(collection, id = ?id, error = %err, "skipping unreadable stored document");
                })
                .ok()
        })
        .collect()
}

/// Raw `status` of a stored document, for reporting why it was not removed.
///
/// Non-string values are rendered as their BSON text; a missing field reads
/// as an empty string.
pub(crate) fn stored_status(document: &Document) -> String {
    match document.get(STATUS_FIELD) {
        Some(Bson::String(status)) => status.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Outcome of a pending-only delete that matched nothing.
///
/// `existing` is the follow-up lookup by `_id`: absent means the id is
/// unknown, present means the document is in some other state.
pub(crate) fn classify_unmatched_delete(existing: Option<&Document>) -> PendingDeletion {
    existing.map_or(PendingDeletion::NotFound, |document| {
        PendingDeletion::NotPending(stored_status(document))
    })
}

pub(crate) fn loan_offer_from_document(
    mut document: Document,
) -> Result<LoanOffer, DocumentMappingError> {
    let id = take_id(&mut document)?;
    let show_on_home = take_bool(&mut document, SHOW_ON_HOME_FIELD)?;
    Ok(LoanOffer::new(
        id,
        LoanOfferDraft {
            show_on_home,
            attributes: into_attributes(document),
        },
    ))
}

pub(crate) fn loan_offer_document(draft: &LoanOfferDraft) -> Result<Document, DocumentMappingError> {
    let mut document = attributes_document(&draft.attributes)?;
    if let Some(show_on_home) = draft.show_on_home {
        document.insert(SHOW_ON_HOME_FIELD, show_on_home);
    }
    Ok(document)
}

pub(crate) fn application_status(raw: &str) -> Result<ApplicationStatus, DocumentMappingError> {
    raw.parse()
        .map_err(|err: UnknownApplicationStatus| DocumentMappingError::InvalidValue {
            field: STATUS_FIELD,
            message: err.to_string(),
        })
}

pub(crate) fn loan_application_from_document(
    mut document: Document,
) -> Result<LoanApplication, DocumentMappingError> {
    let id = take_id(&mut document)?;
    let email = Email::from_store(take_required_string(&mut document, EMAIL_FIELD)?);
    let status = application_status(&take_required_string(&mut document, STATUS_FIELD)?)?;
    Ok(LoanApplication::from_parts(
        id,
        email,
        status,
        into_attributes(document),
    ))
}

pub(crate) fn loan_application_document(
    draft: &LoanApplicationDraft,
) -> Result<Document, DocumentMappingError> {
    let mut document = attributes_document(draft.attributes())?;
    document.insert(EMAIL_FIELD, draft.email().as_ref());
    document.insert(STATUS_FIELD, draft.status().as_str());
    Ok(document)
}

pub(crate) fn user_from_document(
    mut document: Document,
) -> Result<UserAccount, DocumentMappingError> {
    let id = take_id(&mut document)?;
    let email = Email::from_store(take_required_string(&mut document, EMAIL_FIELD)?);
    let role = take_string(&mut document, ROLE_FIELD)?.map(Role::from_store);
    let status = take_string(&mut document, STATUS_FIELD)?
        .map_or_else(AccountStatus::active, AccountStatus::from_store);
    Ok(UserAccount::from_parts(
        id,
        email,
        role,
        status,
        into_attributes(document),
    ))
}

pub(crate) fn user_document(draft: &UserDraft) -> Result<Document, DocumentMappingError> {
    let mut document = attributes_document(draft.attributes())?;
    document.insert(EMAIL_FIELD, draft.email().as_ref());
    if let Some(role) = draft.role() {
        document.insert(ROLE_FIELD, role.as_ref());
    }
    document.insert(STATUS_FIELD, draft.status().as_ref());
    Ok(document)
}
