use jsonschema::Validator;
use serde_json::Value;

use crate::error::{Result, SchemaError};
use crate::kind::DocumentKind;

/// Most validation errors folded into one report.
const MAX_REPORTED_ERRORS: usize = 4;

pub(crate) fn validate_document(
    kind: DocumentKind,
    document: &Value,
    validator: &Validator,
) -> Result<()> {
    let messages: Vec<String> = validator
        .iter_errors(document)
        .take(MAX_REPORTED_ERRORS)
        .map(|err| err.to_string())
        .collect();

    if messages.is_empty() {
        return Ok(());
    }
    Err(SchemaError::ValidationFailed {
        kind,
        message: messages.join("; "),
    })
}
