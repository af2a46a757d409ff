/// Controls schema validation behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// When true, object schemas reject properties they do not declare.
    pub strict_mode: bool,
    /// When true, document kinds without a schema return `SchemaError::NoSchema`.
    pub fail_on_missing_schema: bool,
}
