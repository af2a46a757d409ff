//! Notification channel configuration model with binary and JSON wire formats.
//!
//! # Crate Structure
//!
//! - [`stream`] — Binary stream and JSON tree cursors, the `Record` field table
//! - [`model`] — `Channel`, its destinations, encode/decode and validation
//! - [`schema`] — JSON Schema validation of channel documents (behind `schema` feature)

/// Re-export stream codec types.
pub mod stream {
    pub use notifwire_stream::*;
}

/// Re-export channel model types.
pub mod model {
    pub use notifwire_model::*;
}

/// Re-export schema types (requires `schema` feature).
#[cfg(feature = "schema")]
pub mod schema {
    pub use notifwire_schema::*;
}
