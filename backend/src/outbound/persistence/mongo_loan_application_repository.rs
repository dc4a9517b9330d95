//! MongoDB-backed `LoanApplicationRepository` over `LoanApplications`.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Bson, Document, doc};
use mongodb::error::Error as MongoError;
use tracing::debug;

use crate::domain::document::ID_FIELD;
use crate::domain::ports::{
    LoanApplicationRepository, LoanApplicationRepositoryError, PendingDeletion,
};
use crate::domain::{
    ApplicationStatus, DeleteOutcome, DocumentId, LoanApplication, LoanApplicationDraft,
    UpdateOutcome,
};

use super::LOAN_APPLICATIONS_COLLECTION;
use super::mongo_documents::{
    DocumentMappingError, EMAIL_FIELD, STATUS_FIELD, classify_unmatched_delete, decode_readable,
    document_id, id_filter, loan_application_document, loan_application_from_document, object_id,
};
use super::mongo_error_mapping::{map_document_error, map_mongo_error};

/// Loan applications stored as free-form documents with `email` and `status`.
#[derive(Clone)]
pub struct MongoLoanApplicationRepository {
    collection: Collection<Document>,
}

impl MongoLoanApplicationRepository {
    /// Wrap an open collection handle.
    #[must_use]
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    async fn find_matching(
        &self,
        filter: Document,
    ) -> Result<Vec<LoanApplication>, LoanApplicationRepositoryError> {
        let cursor = self
            .collection
            .find(filter)
            .await
            .map_err(|err| map_error(&err))?;
        let documents: Vec<Document> = cursor.try_collect().await.map_err(|err| map_error(&err))?;
        Ok(decode_readable(
            documents,
            LOAN_APPLICATIONS_COLLECTION,
            loan_application_from_document,
        ))
    }
}

fn map_error(error: &MongoError) -> LoanApplicationRepositoryError {
    map_mongo_error(
        error,
        LoanApplicationRepositoryError::query,
        LoanApplicationRepositoryError::connection,
    )
}

fn map_document(error: &DocumentMappingError) -> LoanApplicationRepositoryError {
    map_document_error(error, LoanApplicationRepositoryError::query)
}

#[async_trait]
impl LoanApplicationRepository for MongoLoanApplicationRepository {
    async fn list_all(&self) -> Result<Vec<LoanApplication>, LoanApplicationRepositoryError> {
        self.find_matching(doc! {}).await
    }

    async fn list_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<LoanApplication>, LoanApplicationRepositoryError> {
        self.find_matching(doc! { EMAIL_FIELD: email }).await
    }

    async fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<LoanApplication>, LoanApplicationRepositoryError> {
        self.find_matching(doc! { STATUS_FIELD: status.as_str() })
            .await
    }

    async fn insert(
        &self,
        draft: &LoanApplicationDraft,
    ) -> Result<DocumentId, LoanApplicationRepositoryError> {
        let document = loan_application_document(draft).map_err(|err| map_document(&err))?;
        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(|err| map_error(&err))?;
        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(document_id(oid)),
            other => Err(LoanApplicationRepositoryError::query(format!(
                "store assigned a non-ObjectId identifier: {other}"
            ))),
        }
    }

    async fn delete_pending(
        &self,
        id: &DocumentId,
    ) -> Result<PendingDeletion, LoanApplicationRepositoryError> {
        let filter = doc! {
            ID_FIELD: object_id(id),
            STATUS_FIELD: ApplicationStatus::Pending.as_str(),
        };
        let result = self
            .collection
            .delete_one(filter)
            .await
            .map_err(|err| map_error(&err))?;
        if result.deleted_count > 0 {
            return Ok(PendingDeletion::Deleted(DeleteOutcome {
                deleted_count: result.deleted_count,
            }));
        }

        // Nothing matched; a follow-up read tells a missing id from a reviewed one.
        let existing = self
            .collection
            .find_one(id_filter(id))
            .await
            .map_err(|err| map_error(&err))?;
        let outcome = classify_unmatched_delete(existing.as_ref());
        if let PendingDeletion::NotPending(status) = &outcome {
            debug!(id = %id, %status, "application not cancellable");
        }
        Ok(outcome)
    }

    async fn set_status(
        &self,
        id: &DocumentId,
        status: ApplicationStatus,
    ) -> Result<UpdateOutcome, LoanApplicationRepositoryError> {
        let result = self
            .collection
            .update_one(id_filter(id), doc! { "$set": { STATUS_FIELD: status.as_str() } })
            .await
            .map_err(|err| map_error(&err))?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }
}
