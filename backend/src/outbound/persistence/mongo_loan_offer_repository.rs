//! MongoDB-backed `LoanOfferRepository` over the `LoanRequests` collection.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Bson, Document, doc};
use mongodb::error::Error as MongoError;

use crate::domain::ports::{LoanOfferRepository, LoanOfferRepositoryError};
use crate::domain::{DeleteOutcome, DocumentId, LoanOffer, LoanOfferDraft, UpdateOutcome};

use super::LOAN_OFFERS_COLLECTION;
use super::mongo_documents::{
    DocumentMappingError, SHOW_ON_HOME_FIELD, decode_readable, document_id, id_filter,
    loan_offer_document, loan_offer_from_document,
};
use super::mongo_error_mapping::{map_document_error, map_mongo_error};

/// Loan offers stored as free-form documents.
#[derive(Clone)]
pub struct MongoLoanOfferRepository {
    collection: Collection<Document>,
}

impl MongoLoanOfferRepository {
    /// Wrap an open collection handle.
    #[must_use]
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

fn map_error(error: &MongoError) -> LoanOfferRepositoryError {
    map_mongo_error(
        error,
        LoanOfferRepositoryError::query,
        LoanOfferRepositoryError::connection,
    )
}

fn map_document(error: &DocumentMappingError) -> LoanOfferRepositoryError {
    map_document_error(error, LoanOfferRepositoryError::query)
}

#[async_trait]
impl LoanOfferRepository for MongoLoanOfferRepository {
    async fn list(&self, limit: Option<u32>) -> Result<Vec<LoanOffer>, LoanOfferRepositoryError> {
        let all = self.collection.find(doc! {});
        let find = match limit {
            Some(max) => all.limit(i64::from(max)),
            None => all,
        };
        let cursor = find.await.map_err(|err| map_error(&err))?;
        let documents: Vec<Document> = cursor.try_collect().await.map_err(|err| map_error(&err))?;
        Ok(decode_readable(
            documents,
            LOAN_OFFERS_COLLECTION,
            loan_offer_from_document,
        ))
    }

    async fn find_by_id(
        &self,
        id: &DocumentId,
    ) -> Result<Option<LoanOffer>, LoanOfferRepositoryError> {
        let document = self
            .collection
            .find_one(id_filter(id))
            .await
            .map_err(|err| map_error(&err))?;
        document
            .map(|document| loan_offer_from_document(document).map_err(|err| map_document(&err)))
            .transpose()
    }

    async fn insert(&self, draft: &LoanOfferDraft) -> Result<DocumentId, LoanOfferRepositoryError> {
        let document = loan_offer_document(draft).map_err(|err| map_document(&err))?;
        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(|err| map_error(&err))?;
        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(document_id(oid)),
            other => Err(LoanOfferRepositoryError::query(format!(
                "store assigned a non-ObjectId identifier: {other}"
            ))),
        }
    }

    async fn delete(&self, id: &DocumentId) -> Result<DeleteOutcome, LoanOfferRepositoryError> {
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .map_err(|err| map_error(&err))?;
        Ok(DeleteOutcome {
            deleted_count: result.deleted_count,
        })
    }

    async fn set_show_on_home(
        &self,
        id: &DocumentId,
        show_on_home: bool,
    ) -> Result<UpdateOutcome, LoanOfferRepositoryError> {
        let result = self
            .collection
            .update_one(
                id_filter(id),
                doc! { "$set": { SHOW_ON_HOME_FIELD: show_on_home } },
            )
            .await
            .map_err(|err| map_error(&err))?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }
}
