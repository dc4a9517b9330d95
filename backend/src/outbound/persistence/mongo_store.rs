//! MongoDB connection manager.
//!
//! A single [`Client`] is opened at startup, verified with a `ping`, and
//! shared by every repository through cheap collection handles.
//!
//! # Design
//!
//! - Connection options come from the configured URI; the stable server API
//!   (v1, strict) is requested on top of them
//! - The unique index on `Users.email` is created once per connection;
//!   failure to create it is logged but does not abort startup
//! - Connection failures surface as [`StoreError`] so the caller decides
//!   whether to serve in a degraded mode

use std::time::Duration;

use mongodb::bson::{Document, doc};
use mongodb::options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::{info, warn};

use super::mongo_documents::EMAIL_FIELD;
use super::{MongoLoanApplicationRepository, MongoLoanOfferRepository, MongoUserRepository};

/// Collection holding loan offers.
pub const LOAN_OFFERS_COLLECTION: &str = "LoanRequests";
/// Collection holding loan applications.
pub const LOAN_APPLICATIONS_COLLECTION: &str = "LoanApplications";
/// Collection holding user accounts.
pub const USERS_COLLECTION: &str = "Users";

/// Errors that can occur while opening the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string or options were rejected.
    #[error("invalid MongoDB connection options: {message}")]
    Options {
        /// Driver error text.
        message: String,
    },

    /// The deployment did not answer the initial ping.
    #[error("MongoDB ping failed: {message}")]
    Ping {
        /// Driver error text.
        message: String,
    },
}

impl StoreError {
    /// Create an options error with the given message.
    #[must_use]
    pub fn options(message: impl Into<String>) -> Self {
        Self::Options {
            message: message.into(),
        }
    }

    /// Create a ping error with the given message.
    #[must_use]
    pub fn ping(message: impl Into<String>) -> Self {
        Self::Ping {
            message: message.into(),
        }
    }
}

/// Connection settings for [`MongoStore::connect`].
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::new("mongodb://localhost:27017", "microLoanRequestDB")
///     .with_server_selection_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    uri: String,
    database: String,
    server_selection_timeout: Duration,
}

impl StoreConfig {
    /// Create a configuration for the given URI and database name.
    ///
    /// Server selection gives up after 10 seconds unless overridden.
    #[must_use]
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            server_selection_timeout: Duration::from_secs(10),
        }
    }

    /// Set how long the driver waits for a usable server.
    #[must_use]
    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    /// Get the connection URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Get the database name.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }
}

/// An open, verified MongoDB connection.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect, ping the deployment, and prepare indexes.
    ///
    /// # Errors
    /// Returns [`StoreError::Options`] when the URI cannot be parsed and
    /// [`StoreError::Ping`] when the deployment is unreachable.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(config.uri())
            .await
            .map_err(|err| StoreError::options(err.to_string()))?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        options.server_selection_timeout = Some(config.server_selection_timeout);

        let client =
            Client::with_options(options).map_err(|err| StoreError::options(err.to_string()))?;
        let database = client.database(config.database());
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| StoreError::ping(err.to_string()))?;
        info!(database = config.database(), "Connected to MongoDB!");

        let store = Self { database };
        store.ensure_indexes().await;
        Ok(store)
    }

    async fn ensure_indexes(&self) {
        let index = IndexModel::builder()
            .keys(doc! { EMAIL_FIELD: 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        match self.collection(USERS_COLLECTION).create_index(index).await {
            Ok(created) => info!(index = %created.index_name, "users e-mail index ready"),
            Err(err) => warn!(
                error = %err,
                "could not create unique e-mail index; duplicate registrations rely on lookups"
            ),
        }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }

    /// Repository over [`LOAN_OFFERS_COLLECTION`].
    #[must_use]
    pub fn loan_offers(&self) -> MongoLoanOfferRepository {
        MongoLoanOfferRepository::new(self.collection(LOAN_OFFERS_COLLECTION))
    }

    /// Repository over [`LOAN_APPLICATIONS_COLLECTION`].
    #[must_use]
    pub fn loan_applications(&self) -> MongoLoanApplicationRepository {
        MongoLoanApplicationRepository::new(self.collection(LOAN_APPLICATIONS_COLLECTION))
    }

    /// Repository over [`USERS_COLLECTION`].
    #[must_use]
    pub fn users(&self) -> MongoUserRepository {
        MongoUserRepository::new(self.collection(USERS_COLLECTION))
    }
}
