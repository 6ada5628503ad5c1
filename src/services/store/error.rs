use rusqlite::ErrorCode;
use thiserror::Error;

use super::{Collection, DocumentId};

/// Failures reported by a document store. Every call is a single attempt;
/// callers surface the error and never retry.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Permission denied")]
    PermissionDenied,
    #[error("No {collection} document with id {id}")]
    NotFound {
        collection: Collection,
        id: DocumentId,
    },
    #[error("Store unavailable: {0}")]
    Network(String),
    #[error("Store error: {0}")]
    Other(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::PermissionDenied | ErrorCode::ReadOnly) => StoreError::PermissionDenied,
            Some(ErrorCode::CannotOpen | ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
                StoreError::Network(err.to_string())
            }
            _ => StoreError::Other(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Other(format!("Malformed document: {}", err))
    }
}
