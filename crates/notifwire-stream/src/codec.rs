use bytes::{Buf, Bytes};
use tracing::{debug, trace};

use crate::error::{CodecError, Result};
use crate::reader::StreamInput;
use crate::record::Record;
use crate::writer::StreamOutput;

/// Presence marker for an absent optional value.
pub const ABSENT: u8 = 0;

/// Presence marker for a present optional value.
pub const PRESENT: u8 = 1;

/// Limits applied while decoding binary input.
///
/// The default is unbounded so that anything the encoder produces decodes
/// again. Length prefixes are always checked against the remaining input
/// before allocating; tighter limits are opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Maximum string length in bytes. Default: unbounded.
    pub max_string_len: usize,
    /// Maximum entries in a sequence or mapping. Default: unbounded.
    pub max_collection_len: usize,
}

impl StreamConfig {
    /// No limit beyond the size of the input itself.
    pub const UNBOUNDED: Self = Self {
        max_string_len: usize::MAX,
        max_collection_len: usize::MAX,
    };
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Encode a record into a standalone buffer.
pub fn encode_record<T: Record>(record: &T) -> Bytes {
    let mut out = StreamOutput::new();
    out.put_record(record);
    let bytes = out.into_inner().freeze();
    trace!(bytes = bytes.len(), "encoded record");
    bytes
}

/// Decode a record that must occupy the whole buffer.
pub fn decode_record<T: Record>(src: &[u8]) -> Result<T> {
    decode_record_with_config(src, StreamConfig::default())
}

/// Decode a record that must occupy the whole buffer, with explicit limits.
pub fn decode_record_with_config<T: Record>(src: &[u8], config: StreamConfig) -> Result<T> {
    let mut input = StreamInput::with_config(src, config);
    let record = input.get_record()?;

    let trailing = input.into_inner().remaining();
    if trailing > 0 {
        debug!(trailing, "record followed by unread bytes");
        return Err(CodecError::TrailingBytes(trailing));
    }
    Ok(record)
}
