//! Shared MongoDB error mapping for repository adapters.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use tracing::debug;

use super::mongo_documents::DocumentMappingError;

/// Server error code reported when a unique index rejects a write.
pub(crate) const DUPLICATE_KEY_CODE: i32 = 11000;

/// Whether the driver failed to reach the deployment at all.
pub(crate) fn is_connection_failure(error: &MongoError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. }
    )
}

/// Whether a write was rejected by a unique index.
pub(crate) fn is_duplicate_key(error: &MongoError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

/// Map a driver error into query/connection constructors.
pub(crate) fn map_mongo_error<E, Q, C>(error: &MongoError, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    debug!(error = %error, "mongodb operation failed");
    if is_connection_failure(error) {
        connection(format!("database connection error: {error}"))
    } else {
        query(format!("database error: {error}"))
    }
}

/// Map a malformed stored document into a query error.
pub(crate) fn map_document_error<E, Q>(error: &DocumentMappingError, query: Q) -> E
where
    Q: FnOnce(String) -> E,
{
    debug!(error = %error, "stored document could not be mapped");
    query(format!("malformed stored document: {error}"))
}
