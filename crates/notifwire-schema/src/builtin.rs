//! Built-in JSON Schemas (draft 2020-12) describing the channel documents.
//!
//! Optional fields accept either a value or `null` and may be omitted.

use serde_json::{json, Value};

use crate::kind::DocumentKind;

/// The built-in schema for a document kind.
pub fn schema_for(kind: DocumentKind) -> Value {
    match kind {
        DocumentKind::Channel => channel(),
        DocumentKind::Destination => destination(),
        DocumentKind::Slack => url_only("Slack"),
        DocumentKind::Chime => url_only("Chime"),
        DocumentKind::Webhook => webhook(),
    }
}

fn url_only(title: &str) -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": title,
        "type": "object",
        "properties": {
            "url": { "type": "string" }
        },
        "required": ["url"]
    })
}

fn string_map() -> Value {
    json!({
        "type": "object",
        "additionalProperties": { "type": "string" }
    })
}

fn nullable_string() -> Value {
    json!({ "type": ["string", "null"] })
}

fn webhook() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "Webhook",
        "type": "object",
        "properties": {
            "url": { "type": "string" },
            "schema": { "type": "string" },
            "host": { "type": "string" },
            "port": {
                "type": "integer",
                "minimum": i32::MIN,
                "maximum": i32::MAX
            },
            "path": { "type": "string" },
            "queryParams": string_map(),
            "headerParams": string_map(),
            "username": nullable_string(),
            "password": nullable_string()
        },
        "required": ["url", "schema", "host", "port", "path", "queryParams", "headerParams"]
    })
}

fn nullable(schema: Value) -> Value {
    json!({ "anyOf": [{ "type": "null" }, schema] })
}

fn destination() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "Destination",
        "type": "object",
        "properties": {
            "slack": nullable(without_meta(url_only("Slack"))),
            "chime": nullable(without_meta(url_only("Chime"))),
            "webhook": nullable(without_meta(webhook()))
        }
    })
}

fn channel() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "Channel",
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "type": { "enum": ["Slack", "Chime", "Webhook"] },
            "header": nullable_string(),
            "footer": nullable_string(),
            "features": {
                "type": "array",
                "items": { "type": "string" }
            },
            "destination": without_meta(destination())
        },
        "required": ["name", "type", "features", "destination"]
    })
}

/// Drop the `$schema` keyword so a schema can be nested inside another.
fn without_meta(mut schema: Value) -> Value {
    if let Value::Object(map) = &mut schema {
        map.remove("$schema");
    }
    schema
}
