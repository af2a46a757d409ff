use crate::kind::DocumentKind;

/// Errors that can occur during schema validation.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema could not be compiled.
    #[error("failed to compile schema: {0}")]
    CompileFailed(String),

    /// The document failed schema validation.
    #[error("{kind} document failed validation: {message}")]
    ValidationFailed { kind: DocumentKind, message: String },

    /// The document is not valid JSON.
    #[error("document is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// No schema registered for the given document kind.
    #[error("no schema registered for {0} documents")]
    NoSchema(DocumentKind),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
