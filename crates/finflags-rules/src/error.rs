//! Error types for flag rule evaluation.

use thiserror::Error;

/// Errors raised while evaluating flag rules over a document.
#[derive(Error, Debug)]
pub enum RulesError {
    /// The document has no financial statements to evaluate.
    #[error("document contains no financial entries")]
    NoFinancials,

    /// A field required by a rule is absent from the selected entry.
    #[error("missing required field: {field}")]
    MissingField {
        /// Dotted path of the missing field.
        field: &'static str,
    },

    /// The document is not valid JSON or does not match the expected shape.
    #[error("invalid document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for rule evaluation.
pub type Result<T> = std::result::Result<T, RulesError>;
