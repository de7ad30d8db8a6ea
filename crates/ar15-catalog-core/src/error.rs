//! Error taxonomy for catalog operations.
//!
//! Every variant except [`CatalogError::Store`] describes an expected,
//! caller-correctable condition. The transport maps them to status codes;
//! store failures are reported generically.

use serde::Serialize;

use crate::store::StoreError;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// A single attribute value that is not a member of its registry set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    /// Dotted path of the offending field (e.g. `attributes.color`).
    pub field: String,
    /// The rejected value, or a description of it for non-string fields.
    pub value: String,
    /// Legal values for the field. Empty for range checks.
    pub allowed: Vec<String>,
    /// Human-readable reason.
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("a group with the name \"{name}\" already exists ({existing_id})")]
    DuplicateName { name: String, existing_id: String },

    #[error("a variant with the UPC \"{upc}\" already exists ({existing_id})")]
    DuplicateUpc { upc: String, existing_id: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("group not found: {id}")]
    GroupNotFound { id: String },

    #[error("validation failed: {}", summarize(.violations))]
    Validation { violations: Vec<FieldViolation> },

    #[error("invalid request body: {0}")]
    InvalidPayload(String),

    #[error("store failure: {0}")]
    Store(#[source] anyhow::Error),
}

impl CatalogError {
    pub fn missing(field: impl Into<String>) -> Self {
        CatalogError::MissingField {
            field: field.into(),
        }
    }

    /// True for conditions the caller can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CatalogError::Store(_))
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} ({})", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            // Callers translate duplicates into DuplicateName/DuplicateUpc
            // where the field is known; anything reaching here is unexpected.
            StoreError::Duplicate {
                field,
                value,
                existing_id,
            } => CatalogError::Store(anyhow::anyhow!(
                "unexpected uniqueness violation on {} = {:?} (existing {})",
                field,
                value,
                existing_id
            )),
            StoreError::Backend(e) => CatalogError::Store(e),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::InvalidPayload(err.to_string())
    }
}
