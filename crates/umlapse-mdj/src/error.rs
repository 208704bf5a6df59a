//! Errors raised while loading a model document.

use thiserror::Error;

/// A model document that could not be turned into a revision tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not valid JSON or does not have the expected shape.
    #[error("Invalid model document: {0}")]
    Json(#[from] serde_json::Error),

    /// An association end names an aggregation kind other than
    /// `none`, `shared` or `composite`.
    #[error("Invalid aggregation kind `{value}` on element `{id}`")]
    InvalidAggregation { id: String, value: String },
}
