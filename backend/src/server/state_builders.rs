//! Store selection and HTTP state wiring.

use std::sync::Arc;

use tracing::{error, info};

use microloan_backend::config::{AppSettings, StoreBackend, UnknownStoreBackend};
use microloan_backend::inbound::http::state::HttpState;
use microloan_backend::outbound::persistence::{
    DisconnectedStore, InMemoryStore, MongoStore, StoreConfig,
};

/// HTTP state over the selected store, plus whether that store is usable.
pub struct StoreWiring {
    pub state: HttpState,
    pub connected: bool,
}

fn in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    HttpState::from_repositories(store.clone(), store.clone(), store)
}

fn mongo_state(store: &MongoStore) -> HttpState {
    HttpState::from_repositories(
        Arc::new(store.loan_offers()),
        Arc::new(store.loan_applications()),
        Arc::new(store.users()),
    )
}

fn disconnected_state(reason: &str) -> HttpState {
    let store = Arc::new(DisconnectedStore::new(reason));
    HttpState::from_repositories(store.clone(), store.clone(), store)
}

/// Open the configured store and wire the HTTP state over it.
///
/// A MongoDB connection failure is logged and replaced by a
/// [`DisconnectedStore`], so the process keeps serving and data routes answer
/// `503 Service Unavailable`.
///
/// # Errors
///
/// Returns [`UnknownStoreBackend`] when the configured backend is not
/// recognised.
pub async fn open_store(settings: &AppSettings) -> Result<StoreWiring, UnknownStoreBackend> {
    let backend = settings.store_backend()?;
    info!(backend = %backend, "opening document store");
    let wiring = match backend {
        StoreBackend::Memory => StoreWiring {
            state: in_memory_state(),
            connected: true,
        },
        StoreBackend::MongoDb => {
            let config = StoreConfig::new(settings.mongo_uri(), settings.database_name());
            match MongoStore::connect(&config).await {
                Ok(store) => StoreWiring {
                    state: mongo_state(&store),
                    connected: true,
                },
                Err(err) => {
                    error!(error = %err, "failed to connect to MongoDB; serving without a store");
                    StoreWiring {
                        state: disconnected_state(&err.to_string()),
                        connected: false,
                    }
                }
            }
        }
    };
    Ok(wiring)
}

#[cfg(test)]
mod tests {
    //! Tests for store selection.

    use super::*;
    use microloan_backend::domain::ErrorCode;
    use microloan_backend::domain::ports::{LoanOffersQuery, UsersQuery};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn memory_backend_is_connected() {
        let settings = AppSettings {
            store: Some("memory".to_owned()),
            ..AppSettings::default()
        };

        let wiring = open_store(&settings).await.expect("memory store opens");

        assert!(wiring.connected);
        let offers = wiring
            .state
            .loan_offers_query
            .all_offers()
            .await
            .expect("empty store lists");
        assert!(offers.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_mongo_falls_back_to_disconnected_store() {
        let settings = AppSettings {
            mongo_uri: Some("not-a-connection-string".to_owned()),
            ..AppSettings::default()
        };

        let wiring = open_store(&settings).await.expect("fallback wiring");

        assert!(!wiring.connected);
        let err = wiring
            .state
            .users_query
            .list_users()
            .await
            .expect_err("disconnected store fails");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_backend_is_an_error() {
        let settings = AppSettings {
            store: Some("sqlite".to_owned()),
            ..AppSettings::default()
        };

        assert!(open_store(&settings).await.is_err());
    }
}
