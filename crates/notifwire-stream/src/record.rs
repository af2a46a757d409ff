//! Field tables shared by the binary and JSON cursors.
//!
//! A record declares its fields once, in wire order, by implementing
//! [`Record`]. The binary cursors ([`StreamOutput`](crate::StreamOutput),
//! [`StreamInput`](crate::StreamInput)) ignore field names; the JSON cursors
//! ([`JsonWriter`](crate::JsonWriter), [`JsonReader`](crate::JsonReader)) use
//! them as object keys. Both walk the same declaration, so the two
//! representations cannot drift apart.

use std::collections::BTreeMap;

use crate::error::Result;

/// String-to-string mapping. Keys are unique and equality ignores order.
pub type StringMap = BTreeMap<String, String>;

/// A closed enum with a fixed ordinal order on the wire and a name in JSON.
///
/// Ordinals are load-bearing for binary compatibility and must never be
/// reordered once published.
pub trait WireEnum: Copy + Sized {
    /// Type name reported in decode errors.
    const NAME: &'static str;

    fn ordinal(self) -> i32;
    fn from_ordinal(ordinal: i32) -> Option<Self>;
    fn name(self) -> &'static str;
    fn from_name(name: &str) -> Option<Self>;
}

/// A value object with a single declared field order.
pub trait Record: Sized {
    /// Emit every field, in wire order.
    fn write_fields<W: FieldWriter>(&self, out: &mut W);

    /// Read every field, in the same order [`Record::write_fields`] emits them.
    fn read_fields<R: FieldReader>(input: &mut R) -> Result<Self>;
}

/// Sink for a record's fields. Writing never fails.
pub trait FieldWriter {
    fn write_string(&mut self, field: &'static str, value: &str);
    fn write_optional_string(&mut self, field: &'static str, value: Option<&str>);
    fn write_int(&mut self, field: &'static str, value: i32);
    fn write_string_list(&mut self, field: &'static str, values: &[String]);
    fn write_string_map(&mut self, field: &'static str, values: &StringMap);
    fn write_enum<E: WireEnum>(&mut self, field: &'static str, value: E);
    fn write_record<T: Record>(&mut self, field: &'static str, value: &T);
    fn write_optional_record<T: Record>(&mut self, field: &'static str, value: Option<&T>);
}

/// Source for a record's fields.
pub trait FieldReader {
    fn read_string(&mut self, field: &'static str) -> Result<String>;
    fn read_optional_string(&mut self, field: &'static str) -> Result<Option<String>>;
    fn read_int(&mut self, field: &'static str) -> Result<i32>;
    fn read_string_list(&mut self, field: &'static str) -> Result<Vec<String>>;
    fn read_string_map(&mut self, field: &'static str) -> Result<StringMap>;
    fn read_enum<E: WireEnum>(&mut self, field: &'static str) -> Result<E>;
    fn read_record<T: Record>(&mut self, field: &'static str) -> Result<T>;
    fn read_optional_record<T: Record>(&mut self, field: &'static str) -> Result<Option<T>>;
}
