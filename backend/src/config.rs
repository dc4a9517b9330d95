//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `MICROLOAN_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::fmt;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DATABASE: &str = "microLoanRequestDB";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CLUSTER_HOST: &str = "cluster0.syckqzu.mongodb.net";

/// Document store backing the HTTP adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB deployment reached through [`AppSettings::mongo_uri`].
    MongoDb,
    /// Process-local store; data is lost on exit.
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MongoDb => "mongodb",
            Self::Memory => "memory",
        })
    }
}

/// Raised when `MICROLOAN_STORE` names an unknown backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown store backend `{value}` (expected `mongodb` or `memory`)")]
pub struct UnknownStoreBackend {
    value: String,
}

impl FromStr for StoreBackend {
    type Err = UnknownStoreBackend;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "memory" => Ok(Self::Memory),
            _ => Err(UnknownStoreBackend {
                value: value.to_owned(),
            }),
        }
    }
}

/// Settings for the HTTP server and its store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MICROLOAN")]
pub struct AppSettings {
    /// TCP port to listen on.
    #[ortho_config(default = 5000)]
    pub port: u16,
    /// Interface to bind.
    pub host: Option<String>,
    /// MongoDB user for the credential template.
    pub db_user: Option<String>,
    /// MongoDB password for the credential template.
    pub db_pass: Option<String>,
    /// Full connection string; takes precedence over the template.
    pub mongo_uri: Option<String>,
    /// Cluster host for the credential template; defaults to the production
    /// Atlas cluster.
    pub cluster_host: Option<String>,
    /// Database name.
    pub database: Option<String>,
    /// Store backend, `mongodb` or `memory`.
    pub store: Option<String>,
}

impl AppSettings {
    /// Return the bind host, falling back to all interfaces.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the database name, falling back to the default.
    #[must_use]
    pub fn database_name(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }

    /// Return the connection string.
    ///
    /// An explicit URI wins; otherwise the Atlas SRV template is filled from
    /// the credential fields and the cluster host. Missing credentials are
    /// left empty and surface as an authentication failure.
    #[must_use]
    pub fn mongo_uri(&self) -> String {
        if let Some(uri) = self.mongo_uri.as_deref() {
            return uri.to_owned();
        }
        format!(
            "mongodb+srv://{user}:{pass}@{cluster}/?appName=Cluster0",
            user = self.db_user.as_deref().unwrap_or_default(),
            pass = self.db_pass.as_deref().unwrap_or_default(),
            cluster = self.cluster_host.as_deref().unwrap_or(DEFAULT_CLUSTER_HOST),
        )
    }

    /// Return the selected store backend, defaulting to MongoDB.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownStoreBackend`] when the configured value is not
    /// recognised.
    pub fn store_backend(&self) -> Result<StoreBackend, UnknownStoreBackend> {
        self.store
            .as_deref()
            .map_or(Ok(StoreBackend::MongoDb), StoreBackend::from_str)
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: None,
            db_user: None,
            db_pass: None,
            mongo_uri: None,
            cluster_host: None,
            database: None,
            store: None,
        }
    }
}
