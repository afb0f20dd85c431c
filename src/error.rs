//! Error types for plan ingestion.

use thiserror::Error;

/// Errors raised while ingesting a Terraform plan document.
///
/// The engine itself is total: once a [`Plan`](crate::plan::Plan) exists,
/// assessment cannot fail. Malformed individual resources are skipped rather
/// than rejected; only a document that cannot be shaped into a plan at all
/// surfaces here.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The top-level document is not a JSON object.
    #[error("plan document is not a JSON object")]
    NotAnObject,
    /// The document could not be deserialized into the plan shape, e.g.
    /// `resource_changes` is a mapping where a sequence is required.
    #[error("invalid plan document: {0}")]
    Invalid(#[from] serde_json::Error),
}
