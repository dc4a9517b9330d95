//! MongoDB-backed `UserRepository` over the `Users` collection.
//!
//! E-mail uniqueness rests on the unique index created at connect time; the
//! pre-insert lookup only turns the common case into a clean error before
//! the write is attempted.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Bson, Document, doc};
use mongodb::error::Error as MongoError;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{AccountStatus, DocumentId, Role, UpdateOutcome, UserAccount, UserDraft};

use super::USERS_COLLECTION;
use super::mongo_documents::{
    DocumentMappingError, EMAIL_FIELD, ROLE_FIELD, STATUS_FIELD, decode_readable, document_id,
    id_filter, user_document, user_from_document,
};
use super::mongo_error_mapping::{is_duplicate_key, map_document_error, map_mongo_error};

/// User accounts keyed by a unique `email` field.
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<Document>,
}

impl MongoUserRepository {
    /// Wrap an open collection handle.
    #[must_use]
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    async fn set_field(
        &self,
        id: &DocumentId,
        field: &str,
        value: &str,
    ) -> Result<UpdateOutcome, UserRepositoryError> {
        let result = self
            .collection
            .update_one(id_filter(id), doc! { "$set": { field: value } })
            .await
            .map_err(|err| map_error(&err))?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }
}

fn map_error(error: &MongoError) -> UserRepositoryError {
    map_mongo_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn map_document(error: &DocumentMappingError) -> UserRepositoryError {
    map_document_error(error, UserRepositoryError::query)
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn list_all(&self) -> Result<Vec<UserAccount>, UserRepositoryError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|err| map_error(&err))?;
        let documents: Vec<Document> = cursor.try_collect().await.map_err(|err| map_error(&err))?;
        Ok(decode_readable(documents, USERS_COLLECTION, user_from_document))
    }

    async fn insert(&self, draft: &UserDraft) -> Result<DocumentId, UserRepositoryError> {
        let email = draft.email().as_ref();
        let existing = self
            .collection
            .find_one(doc! { EMAIL_FIELD: email })
            .await
            .map_err(|err| map_error(&err))?;
        if existing.is_some() {
            return Err(UserRepositoryError::duplicate_email(email));
        }

        let document = user_document(draft).map_err(|err| map_document(&err))?;
        let result = match self.collection.insert_one(document).await {
            Ok(result) => result,
            Err(err) if is_duplicate_key(&err) => {
                return Err(UserRepositoryError::duplicate_email(email));
            }
            Err(err) => return Err(map_error(&err)),
        };
        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(document_id(oid)),
            other => Err(UserRepositoryError::query(format!(
                "store assigned a non-ObjectId identifier: {other}"
            ))),
        }
    }

    async fn set_role(
        &self,
        id: &DocumentId,
        role: &Role,
    ) -> Result<UpdateOutcome, UserRepositoryError> {
        self.set_field(id, ROLE_FIELD, role.as_ref()).await
    }

    async fn set_status(
        &self,
        id: &DocumentId,
        status: &AccountStatus,
    ) -> Result<UpdateOutcome, UserRepositoryError> {
        self.set_field(id, STATUS_FIELD, status.as_ref()).await
    }
}
