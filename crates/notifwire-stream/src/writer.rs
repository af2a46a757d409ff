use bytes::{BufMut, BytesMut};

use crate::codec::{ABSENT, PRESENT};
use crate::record::{FieldWriter, Record, StringMap, WireEnum};

const INITIAL_BUFFER_CAPACITY: usize = 256;

/// Largest string byte length or collection count an int32 prefix can carry.
pub const MAX_PREFIXED_LEN: usize = i32::MAX as usize;

/// Writes record fields to any `BufMut` in the fixed binary layout.
///
/// Layout per primitive (all integers big-endian):
/// ```text
/// int32        4 bytes, two's complement
/// string       int32 byte length, then UTF-8 bytes
/// optional<T>  1 presence byte (0 absent, 1 present), then T if present
/// seq<string>  int32 count, then each string in order
/// map          int32 count, then key/value string pairs
/// enum         int32 ordinal
/// ```
///
/// # Panics
///
/// Writing a string longer than [`MAX_PREFIXED_LEN`] bytes, or a sequence or
/// mapping with more than [`MAX_PREFIXED_LEN`] entries, panics rather than
/// emitting a wrapped length prefix.
pub struct StreamOutput<B = BytesMut> {
    buf: B,
}

impl StreamOutput<BytesMut> {
    /// Create a writer over a fresh growable buffer.
    pub fn new() -> Self {
        Self::with_buffer(BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY))
    }
}

impl Default for StreamOutput<BytesMut> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BufMut> StreamOutput<B> {
    /// Create a writer that appends to a caller-owned buffer.
    pub fn with_buffer(buf: B) -> Self {
        Self { buf }
    }

    pub fn put_int(&mut self, value: i32) {
        self.buf.put_i32(value);
    }

    pub fn put_string(&mut self, value: &str) {
        self.put_len(value.len());
        self.buf.put_slice(value.as_bytes());
    }

    pub fn put_optional_string(&mut self, value: Option<&str>) {
        match value {
            Some(value) => {
                self.buf.put_u8(PRESENT);
                self.put_string(value);
            }
            None => self.buf.put_u8(ABSENT),
        }
    }

    /// Write a count-prefixed sequence, preserving order.
    pub fn put_string_list(&mut self, values: &[String]) {
        self.put_len(values.len());
        for value in values {
            self.put_string(value);
        }
    }

    /// Write a count-prefixed mapping in the map's iteration order.
    pub fn put_string_map(&mut self, values: &StringMap) {
        self.put_len(values.len());
        for (key, value) in values {
            self.put_string(key);
            self.put_string(value);
        }
    }

    pub fn put_enum<E: WireEnum>(&mut self, value: E) {
        self.put_int(value.ordinal());
    }

    /// Write a nested record inline, without a presence marker.
    pub fn put_record<T: Record>(&mut self, value: &T) {
        value.write_fields(self);
    }

    pub fn put_optional_record<T: Record>(&mut self, value: Option<&T>) {
        match value {
            Some(value) => {
                self.buf.put_u8(PRESENT);
                self.put_record(value);
            }
            None => self.buf.put_u8(ABSENT),
        }
    }

    /// Borrow the underlying buffer.
    pub fn get_ref(&self) -> &B {
        &self.buf
    }

    /// Consume the writer and return the underlying buffer.
    pub fn into_inner(self) -> B {
        self.buf
    }

    fn put_len(&mut self, len: usize) {
        let Ok(prefix) = i32::try_from(len) else {
            panic!("length {len} exceeds the int32 prefix limit of {MAX_PREFIXED_LEN}");
        };
        self.buf.put_i32(prefix);
    }
}

impl<B: BufMut> FieldWriter for StreamOutput<B> {
    fn write_string(&mut self, _field: &'static str, value: &str) {
        self.put_string(value);
    }

    fn write_optional_string(&mut self, _field: &'static str, value: Option<&str>) {
        self.put_optional_string(value);
    }

    fn write_int(&mut self, _field: &'static str, value: i32) {
        self.put_int(value);
    }

    fn write_string_list(&mut self, _field: &'static str, values: &[String]) {
        self.put_string_list(values);
    }

    fn write_string_map(&mut self, _field: &'static str, values: &StringMap) {
        self.put_string_map(values);
    }

    fn write_enum<E: WireEnum>(&mut self, _field: &'static str, value: E) {
        self.put_enum(value);
    }

    fn write_record<T: Record>(&mut self, _field: &'static str, value: &T) {
        self.put_record(value);
    }

    fn write_optional_record<T: Record>(&mut self, _field: &'static str, value: Option<&T>) {
        self.put_optional_record(value);
    }
}
