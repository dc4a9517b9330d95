//! Process-local store implementing every repository port.
//!
//! Backs the `memory` store backend and the HTTP integration tests. Records
//! keep insertion order, which stands in for the natural order of a
//! document store.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::domain::ports::{
    LoanApplicationRepository, LoanApplicationRepositoryError, LoanOfferRepository,
    LoanOfferRepositoryError, PendingDeletion, UserRepository, UserRepositoryError,
};
use crate::domain::{
    AccountStatus, ApplicationStatus, DeleteOutcome, DocumentId, LoanApplication,
    LoanApplicationDraft, LoanOffer, LoanOfferDraft, Role, UpdateOutcome, UserAccount, UserDraft,
};

use super::mongo_documents::document_id;

#[derive(Default)]
struct Collections {
    loan_offers: Vec<LoanOffer>,
    loan_applications: Vec<LoanApplication>,
    users: Vec<UserAccount>,
}

/// Shared in-memory collections; clones observe the same data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id() -> DocumentId {
    document_id(ObjectId::new())
}

fn update_outcome(matched: bool, modified: bool) -> UpdateOutcome {
    UpdateOutcome {
        matched_count: u64::from(matched),
        modified_count: u64::from(modified),
    }
}

fn remove_where<T>(records: &mut Vec<T>, predicate: impl Fn(&T) -> bool) -> DeleteOutcome {
    let Some(position) = records.iter().position(predicate) else {
        return DeleteOutcome::default();
    };
    records.remove(position);
    DeleteOutcome { deleted_count: 1 }
}

#[async_trait]
impl LoanOfferRepository for InMemoryStore {
    async fn list(&self, limit: Option<u32>) -> Result<Vec<LoanOffer>, LoanOfferRepositoryError> {
        let collections = self.collections.read().await;
        let offers = collections.loan_offers.iter().cloned();
        Ok(match limit {
            Some(limit) => offers
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect(),
            None => offers.collect(),
        })
    }

    async fn find_by_id(
        &self,
        id: &DocumentId,
    ) -> Result<Option<LoanOffer>, LoanOfferRepositoryError> {
        let collections = self.collections.read().await;
        Ok(collections
            .loan_offers
            .iter()
            .find(|offer| offer.id() == *id)
            .cloned())
    }

    async fn insert(&self, draft: &LoanOfferDraft) -> Result<DocumentId, LoanOfferRepositoryError> {
        let id = next_id();
        let mut collections = self.collections.write().await;
        collections.loan_offers.push(LoanOffer::new(id, draft.clone()));
        Ok(id)
    }

    async fn delete(&self, id: &DocumentId) -> Result<DeleteOutcome, LoanOfferRepositoryError> {
        let mut collections = self.collections.write().await;
        Ok(remove_where(&mut collections.loan_offers, |offer| {
            offer.id() == *id
        }))
    }

    async fn set_show_on_home(
        &self,
        id: &DocumentId,
        show_on_home: bool,
    ) -> Result<UpdateOutcome, LoanOfferRepositoryError> {
        let mut collections = self.collections.write().await;
        let offer = collections
            .loan_offers
            .iter_mut()
            .find(|offer| offer.id() == *id);
        Ok(match offer {
            Some(offer) => update_outcome(true, offer.set_show_on_home(show_on_home)),
            None => UpdateOutcome::default(),
        })
    }
}

#[async_trait]
impl LoanApplicationRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<LoanApplication>, LoanApplicationRepositoryError> {
        Ok(self.collections.read().await.loan_applications.clone())
    }

    async fn list_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<LoanApplication>, LoanApplicationRepositoryError> {
        let collections = self.collections.read().await;
        Ok(collections
            .loan_applications
            .iter()
            .filter(|application| application.email().as_ref() == email)
            .cloned()
            .collect())
    }

    async fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<LoanApplication>, LoanApplicationRepositoryError> {
        let collections = self.collections.read().await;
        Ok(collections
            .loan_applications
            .iter()
            .filter(|application| application.status() == status)
            .cloned()
            .collect())
    }

    async fn insert(
        &self,
        draft: &LoanApplicationDraft,
    ) -> Result<DocumentId, LoanApplicationRepositoryError> {
        let id = next_id();
        let mut collections = self.collections.write().await;
        collections
            .loan_applications
            .push(LoanApplication::new(id, draft.clone()));
        Ok(id)
    }

    async fn delete_pending(
        &self,
        id: &DocumentId,
    ) -> Result<PendingDeletion, LoanApplicationRepositoryError> {
        let mut collections = self.collections.write().await;
        let applications = &mut collections.loan_applications;
        let Some(status) = applications
            .iter()
            .find(|application| application.id() == *id)
            .map(LoanApplication::status)
        else {
            return Ok(PendingDeletion::NotFound);
        };
        if status != ApplicationStatus::Pending {
            return Ok(PendingDeletion::NotPending(status.as_str().to_owned()));
        }
        applications.retain(|application| application.id() != *id);
        Ok(PendingDeletion::Deleted(DeleteOutcome { deleted_count: 1 }))
    }

    async fn set_status(
        &self,
        id: &DocumentId,
        status: ApplicationStatus,
    ) -> Result<UpdateOutcome, LoanApplicationRepositoryError> {
        let mut collections = self.collections.write().await;
        let application = collections
            .loan_applications
            .iter_mut()
            .find(|application| application.id() == *id);
        Ok(match application {
            Some(application) => update_outcome(true, application.set_status(status)),
            None => UpdateOutcome::default(),
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<UserAccount>, UserRepositoryError> {
        Ok(self.collections.read().await.users.clone())
    }

    async fn insert(&self, draft: &UserDraft) -> Result<DocumentId, UserRepositoryError> {
        let mut collections = self.collections.write().await;
        if collections
            .users
            .iter()
            .any(|user| user.email() == draft.email())
        {
            return Err(UserRepositoryError::duplicate_email(draft.email().as_ref()));
        }
        let id = next_id();
        collections.users.push(UserAccount::new(id, draft.clone()));
        Ok(id)
    }

    async fn set_role(
        &self,
        id: &DocumentId,
        role: &Role,
    ) -> Result<UpdateOutcome, UserRepositoryError> {
        let mut collections = self.collections.write().await;
        let user = collections.users.iter_mut().find(|user| user.id() == *id);
        Ok(match user {
            Some(user) => update_outcome(true, user.set_role(role.clone())),
            None => UpdateOutcome::default(),
        })
    }

    async fn set_status(
        &self,
        id: &DocumentId,
        status: &AccountStatus,
    ) -> Result<UpdateOutcome, UserRepositoryError> {
        let mut collections = self.collections.write().await;
        let user = collections.users.iter_mut().find(|user| user.id() == *id);
        Ok(match user {
            Some(user) => update_outcome(true, user.set_status(status.clone())),
            None => UpdateOutcome::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Attributes, Email};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    fn email(raw: &str) -> Email {
        Email::new(raw).expect("valid email")
    }

    fn application(raw_email: &str) -> LoanApplicationDraft {
        LoanApplicationDraft::new(email(raw_email), Attributes::default())
    }

    #[rstest]
    #[tokio::test]
    async fn list_honours_limit_and_insertion_order(store: InMemoryStore) {
        let mut ids = Vec::new();
        for _ in 0..8 {
            ids.push(
                LoanOfferRepository::insert(&store, &LoanOfferDraft::default())
                    .await
                    .expect("insert"),
            );
        }

        let limited = store.list(Some(6)).await.expect("list");
        let listed: Vec<_> = limited.iter().map(LoanOffer::id).collect();
        assert_eq!(listed, ids[..6]);
        assert_eq!(store.list(None).await.expect("list").len(), 8);
    }

    #[rstest]
    #[tokio::test]
    async fn set_show_on_home_reports_matched_and_modified(store: InMemoryStore) {
        let id = LoanOfferRepository::insert(&store, &LoanOfferDraft::default())
            .await
            .expect("insert");

        let first = store.set_show_on_home(&id, true).await.expect("update");
        let repeat = store.set_show_on_home(&id, true).await.expect("update");
        let missing = store
            .set_show_on_home(&next_id(), true)
            .await
            .expect("update");

        assert_eq!(first, update_outcome(true, true));
        assert_eq!(repeat, update_outcome(true, false));
        assert_eq!(missing, UpdateOutcome::default());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_pending_only_removes_pending_applications(store: InMemoryStore) {
        let pending = LoanApplicationRepository::insert(&store, &application("a@example.com"))
            .await
            .expect("insert");
        let approved = LoanApplicationRepository::insert(&store, &application("b@example.com"))
            .await
            .expect("insert");
        LoanApplicationRepository::set_status(&store, &approved, ApplicationStatus::Approved)
            .await
            .expect("update");

        assert_eq!(
            store.delete_pending(&approved).await.expect("delete"),
            PendingDeletion::NotPending("Approved".to_owned())
        );
        assert_eq!(
            store.delete_pending(&pending).await.expect("delete"),
            PendingDeletion::Deleted(DeleteOutcome { deleted_count: 1 })
        );
        assert_eq!(
            store.delete_pending(&pending).await.expect("delete"),
            PendingDeletion::NotFound
        );
        assert_eq!(
            LoanApplicationRepository::list_all(&store)
                .await
                .expect("list")
                .len(),
            1
        );
    }

    #[rstest]
    #[tokio::test]
    async fn list_by_email_matches_exactly(store: InMemoryStore) {
        LoanApplicationRepository::insert(&store, &application("ada@example.com"))
            .await
            .expect("insert");

        let exact = store.list_by_email("ada@example.com").await.expect("list");
        let other_case = store.list_by_email("Ada@example.com").await.expect("list");

        assert_eq!(exact.len(), 1);
        assert!(other_case.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(store: InMemoryStore) {
        let draft = UserDraft::new(email("ada@example.com"), None, Attributes::default());
        UserRepository::insert(&store, &draft)
            .await
            .expect("first insert");

        let error = UserRepository::insert(&store, &draft)
            .await
            .expect_err("duplicate");

        assert_eq!(
            error,
            UserRepositoryError::duplicate_email("ada@example.com")
        );
        assert_eq!(
            UserRepository::list_all(&store).await.expect("list").len(),
            1
        );
    }
}
