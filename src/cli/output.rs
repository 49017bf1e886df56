//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a single line for stderr.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::MissingCredential(var) => {
            format!("error: {} is not set; export it before generating", var)
        }
        ApiError::StorageError(inner) => {
            format!("error: output document not written: {}", inner)
        }
        other => format!("error: {}", other),
    }
}
