//! JSON Schema validation for notification channel documents.
//!
//! Validate channel JSON against JSON Schema 2020-12 before decoding it.
//! Built-in schemas cover every document kind; hosts can override them with
//! embedded schema strings.

pub mod builtin;
pub mod config;
pub mod error;
pub mod kind;
pub mod registry;
mod validator;

pub use builtin::schema_for;
pub use config::RegistryConfig;
pub use error::{Result, SchemaError};
pub use kind::DocumentKind;
pub use registry::SchemaRegistry;
