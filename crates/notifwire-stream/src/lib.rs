//! Binary stream and JSON tree cursors for notification channel records.
//!
//! Records describe their fields once through [`Record`]; the same field
//! table drives both wire representations:
//! - a compact binary layout (big-endian int32, length-prefixed UTF-8,
//!   presence-byte optionals) via [`StreamOutput`] / [`StreamInput`]
//! - a JSON object layout via [`JsonWriter`] / [`JsonReader`]
//!
//! Encoding never fails for strings and collections that fit an int32
//! prefix. Decoding reports a typed [`CodecError`].

pub mod codec;
pub mod error;
pub mod json;
pub mod reader;
pub mod record;
pub mod writer;

#[cfg(test)]
mod testing;

pub use codec::{decode_record, decode_record_with_config, encode_record, StreamConfig};
pub use error::{CodecError, Result};
pub use json::{
    from_json_str, from_json_value, to_json_string, to_json_value, JsonReader, JsonWriter, ROOT_PATH,
};
pub use reader::StreamInput;
pub use record::{FieldReader, FieldWriter, Record, StringMap, WireEnum};
pub use writer::{StreamOutput, MAX_PREFIXED_LEN};
