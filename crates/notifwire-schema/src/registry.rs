use std::collections::BTreeMap;

use jsonschema::Validator;
use serde_json::{Map, Value};
use tracing::debug;

use crate::builtin::schema_for;
use crate::config::RegistryConfig;
use crate::error::{Result, SchemaError};
use crate::kind::DocumentKind;
use crate::validator::validate_document;

/// Compiled JSON Schema validators keyed by document kind.
pub struct SchemaRegistry {
    validators: BTreeMap<DocumentKind, Validator>,
    config: RegistryConfig,
}

impl SchemaRegistry {
    /// Create an empty registry with default config.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit config.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            validators: BTreeMap::new(),
            config,
        }
    }

    /// Registry holding the built-in schema for every document kind.
    pub fn builtin() -> Result<Self> {
        Self::builtin_with_config(RegistryConfig::default())
    }

    /// Registry holding the built-in schemas, compiled under explicit config.
    pub fn builtin_with_config(config: RegistryConfig) -> Result<Self> {
        let mut registry = Self::with_config(config);
        for kind in DocumentKind::ALL {
            registry.register_value(kind, &schema_for(kind))?;
        }
        Ok(registry)
    }

    /// Register a schema for a document kind from a JSON string.
    pub fn register(&mut self, kind: DocumentKind, schema_json: &str) -> Result<()> {
        let schema: Value = serde_json::from_str(schema_json)?;
        self.register_value(kind, &schema)
    }

    /// Register a schema for a document kind from a JSON value.
    pub fn register_value(&mut self, kind: DocumentKind, schema: &Value) -> Result<()> {
        let mut schema = schema.clone();
        if self.config.strict_mode {
            forbid_unknown_properties(&mut schema);
        }

        let compiled = jsonschema::validator_for(&schema)
            .map_err(|err| SchemaError::CompileFailed(format!("{kind}: {err}")))?;

        debug!(%kind, strict = self.config.strict_mode, "registered schema");
        self.validators.insert(kind, compiled);
        Ok(())
    }

    /// Load from embedded schema strings.
    pub fn from_embedded(schemas: &[(DocumentKind, &str)]) -> Result<Self> {
        let mut registry = Self::new();
        for (kind, schema) in schemas {
            registry.register(*kind, schema)?;
        }
        Ok(registry)
    }

    /// Validate a JSON document given as raw bytes.
    pub fn validate(&self, kind: DocumentKind, payload: &[u8]) -> Result<()> {
        if !self.should_validate(kind)? {
            return Ok(());
        }
        let document: Value = serde_json::from_slice(payload)?;
        self.validate_value(kind, &document)
    }

    /// Validate an already parsed JSON document.
    pub fn validate_value(&self, kind: DocumentKind, document: &Value) -> Result<()> {
        match self.validators.get(&kind) {
            Some(validator) => validate_document(kind, document, validator),
            None if self.config.fail_on_missing_schema => Err(SchemaError::NoSchema(kind)),
            None => Ok(()),
        }
    }

    /// Check if a document kind has a registered schema.
    pub fn has_schema(&self, kind: DocumentKind) -> bool {
        self.validators.contains_key(&kind)
    }

    /// Document kinds that have registered schemas, in declaration order.
    pub fn kinds(&self) -> Vec<DocumentKind> {
        self.validators.keys().copied().collect()
    }

    /// Get registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn should_validate(&self, kind: DocumentKind) -> Result<bool> {
        if self.has_schema(kind) {
            Ok(true)
        } else if self.config.fail_on_missing_schema {
            Err(SchemaError::NoSchema(kind))
        } else {
            Ok(false)
        }
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Keywords whose value is a map of name to subschema.
const SCHEMA_MAP_KEYWORDS: [&str; 4] = ["properties", "patternProperties", "$defs", "definitions"];

/// Keywords whose value is a single subschema.
const SCHEMA_KEYWORDS: [&str; 6] = ["additionalProperties", "items", "not", "if", "then", "else"];

/// Keywords whose value is a list of subschemas.
const SCHEMA_LIST_KEYWORDS: [&str; 4] = ["prefixItems", "allOf", "anyOf", "oneOf"];

/// Add `additionalProperties: false` to every object schema that leaves it
/// unspecified.
fn forbid_unknown_properties(schema: &mut Value) {
    let Value::Object(map) = schema else {
        return;
    };

    if declares_object(map) && !map.contains_key("additionalProperties") {
        map.insert("additionalProperties".to_string(), Value::Bool(false));
    }

    for keyword in SCHEMA_MAP_KEYWORDS {
        if let Some(Value::Object(children)) = map.get_mut(keyword) {
            children.values_mut().for_each(forbid_unknown_properties);
        }
    }
    for keyword in SCHEMA_KEYWORDS {
        if let Some(child) = map.get_mut(keyword) {
            forbid_unknown_properties(child);
        }
    }
    for keyword in SCHEMA_LIST_KEYWORDS {
        if let Some(Value::Array(children)) = map.get_mut(keyword) {
            children.iter_mut().for_each(forbid_unknown_properties);
        }
    }
}

fn declares_object(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        Some(Value::String(kind)) => kind == "object",
        Some(Value::Array(kinds)) => kinds.iter().any(|kind| kind == "object"),
        _ => map.contains_key("properties") || map.contains_key("required"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const SLACK_DOC: &[u8] = br#"{"url":"https://hooks.slack.com/x"}"#;

    fn channel_doc() -> Value {
        json!({
            "name": "ops",
            "type": "Webhook",
            "header": null,
            "features": ["alerts"],
            "destination": {
                "slack": null,
                "chime": null,
                "webhook": {
                    "url": "https://example.com/hook",
                    "schema": "https",
                    "host": "example.com",
                    "port": 443,
                    "path": "/hook",
                    "queryParams": {"channel": "#ops"},
                    "headerParams": {},
                    "username": null
                }
            }
        })
    }

    #[test]
    fn builtin_registry_covers_every_kind() {
        let registry = SchemaRegistry::builtin().unwrap();
        assert_eq!(registry.kinds(), DocumentKind::ALL.to_vec());
    }

    #[test]
    fn builtin_accepts_valid_channel() {
        let registry = SchemaRegistry::builtin().unwrap();
        assert!(registry
            .validate_value(DocumentKind::Channel, &channel_doc())
            .is_ok());
        assert!(registry.validate(DocumentKind::Slack, SLACK_DOC).is_ok());
    }

    #[test]
    fn builtin_rejects_wrong_types() {
        let registry = SchemaRegistry::builtin().unwrap();

        let mut doc = channel_doc();
        doc["destination"]["webhook"]["port"] = json!("443");
        assert!(matches!(
            registry.validate_value(DocumentKind::Channel, &doc),
            Err(SchemaError::ValidationFailed {
                kind: DocumentKind::Channel,
                ..
            })
        ));

        let mut doc = channel_doc();
        doc["type"] = json!("Email");
        assert!(registry
            .validate_value(DocumentKind::Channel, &doc)
            .is_err());

        let mut doc = channel_doc();
        doc["destination"]["webhook"]["queryParams"] = json!({"channel": 5});
        assert!(registry
            .validate_value(DocumentKind::Channel, &doc)
            .is_err());
    }

    #[test]
    fn port_must_fit_int32() {
        let registry = SchemaRegistry::builtin().unwrap();
        let mut doc = channel_doc();
        doc["destination"]["webhook"]["port"] = json!(4_000_000_000u64);
        assert!(registry
            .validate_value(DocumentKind::Channel, &doc)
            .is_err());
    }

    #[test]
    fn strict_mode_rejects_unknown_properties() {
        let permissive = SchemaRegistry::builtin().unwrap();
        let strict = SchemaRegistry::builtin_with_config(RegistryConfig {
            strict_mode: true,
            ..RegistryConfig::default()
        })
        .unwrap();

        let mut doc = channel_doc();
        doc["destination"]["webhook"]["extra"] = json!(true);
        assert!(permissive
            .validate_value(DocumentKind::Channel, &doc)
            .is_ok());
        assert!(matches!(
            strict.validate_value(DocumentKind::Channel, &doc),
            Err(SchemaError::ValidationFailed { .. })
        ));

        // String maps keep accepting arbitrary keys.
        assert!(strict
            .validate_value(DocumentKind::Channel, &channel_doc())
            .is_ok());
    }

    #[test]
    fn missing_schema_permissive_passes() {
        let registry = SchemaRegistry::new();
        assert!(registry.validate(DocumentKind::Chime, b"not even json").is_ok());
    }

    #[test]
    fn missing_schema_strict_fails() {
        let registry = SchemaRegistry::with_config(RegistryConfig {
            fail_on_missing_schema: true,
            ..RegistryConfig::default()
        });
        assert!(matches!(
            registry.validate(DocumentKind::Chime, br#"{}"#),
            Err(SchemaError::NoSchema(DocumentKind::Chime))
        ));
    }

    #[test]
    fn invalid_json_payload_fails() {
        let registry = SchemaRegistry::builtin().unwrap();
        assert!(matches!(
            registry.validate(DocumentKind::Slack, b"not-json"),
            Err(SchemaError::InvalidJson(_))
        ));
    }

    #[test]
    fn invalid_schema_fails_compile() {
        let mut registry = SchemaRegistry::new();
        assert!(matches!(
            registry.register(DocumentKind::Slack, r#"{"type":"definitely-not-a-type"}"#),
            Err(SchemaError::CompileFailed(_))
        ));
    }

    #[test]
    fn from_embedded_overrides_kinds() {
        let registry = SchemaRegistry::from_embedded(&[(
            DocumentKind::Slack,
            r#"{"type":"object","properties":{"url":{"type":"string","pattern":"^https://"}},"required":["url"]}"#,
        )])
        .unwrap();

        assert_eq!(registry.kinds(), vec![DocumentKind::Slack]);
        assert!(registry.validate(DocumentKind::Slack, SLACK_DOC).is_ok());
        assert!(registry
            .validate(DocumentKind::Slack, br#"{"url":"http://plain"}"#)
            .is_err());
    }

    #[test]
    fn config_is_exposed() {
        let config = RegistryConfig {
            strict_mode: true,
            fail_on_missing_schema: true,
        };
        assert_eq!(SchemaRegistry::with_config(config).config(), &config);
    }
}
