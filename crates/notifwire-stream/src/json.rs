//! JSON tree cursors over `serde_json` values.
//!
//! Policy for optional values: absent values are written as explicit `null`,
//! and both `null` and a missing key read back as absent. Enums are written by
//! name, never by ordinal. Keys not named by a record's field table are
//! ignored on read.

use serde_json::{Map, Number, Value};
use tracing::trace;

use crate::error::{CodecError, Result};
use crate::record::{FieldReader, FieldWriter, Record, StringMap, WireEnum};

/// Path reported for errors at the document root.
pub const ROOT_PATH: &str = "$";

/// Convert a record into a JSON object.
pub fn to_json_value<T: Record>(record: &T) -> Value {
    let mut writer = JsonWriter::new();
    record.write_fields(&mut writer);
    writer.into_value()
}

/// Build a record from a parsed JSON tree.
pub fn from_json_value<T: Record>(value: &Value) -> Result<T> {
    let mut reader = JsonReader::new(value)?;
    T::read_fields(&mut reader)
}

/// Serialize a record to JSON text.
pub fn to_json_string<T: Record>(record: &T) -> String {
    to_json_value(record).to_string()
}

/// Parse JSON text and build a record from it.
pub fn from_json_str<T: Record>(text: &str) -> Result<T> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| CodecError::malformed(ROOT_PATH, err.to_string()))?;
    from_json_value(&value)
}

/// Collects record fields into a JSON object.
#[derive(Debug, Default)]
pub struct JsonWriter {
    object: Map<String, Value>,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.object)
    }

    fn insert(&mut self, field: &'static str, value: Value) {
        self.object.insert(field.to_string(), value);
    }
}

impl FieldWriter for JsonWriter {
    fn write_string(&mut self, field: &'static str, value: &str) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn write_optional_string(&mut self, field: &'static str, value: Option<&str>) {
        let value = value.map_or(Value::Null, |v| Value::String(v.to_string()));
        self.insert(field, value);
    }

    fn write_int(&mut self, field: &'static str, value: i32) {
        self.insert(field, Value::Number(Number::from(value)));
    }

    fn write_string_list(&mut self, field: &'static str, values: &[String]) {
        let items = values.iter().cloned().map(Value::String).collect();
        self.insert(field, Value::Array(items));
    }

    fn write_string_map(&mut self, field: &'static str, values: &StringMap) {
        let object = values
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        self.insert(field, Value::Object(object));
    }

    fn write_enum<E: WireEnum>(&mut self, field: &'static str, value: E) {
        self.insert(field, Value::String(value.name().to_string()));
    }

    fn write_record<T: Record>(&mut self, field: &'static str, value: &T) {
        self.insert(field, to_json_value(value));
    }

    fn write_optional_record<T: Record>(&mut self, field: &'static str, value: Option<&T>) {
        let value = value.map_or(Value::Null, to_json_value);
        self.insert(field, value);
    }
}

/// Reads record fields out of a JSON object, tracking the field path for
/// error reports.
#[derive(Debug)]
pub struct JsonReader<'a> {
    object: &'a Map<String, Value>,
    path: String,
}

impl<'a> JsonReader<'a> {
    /// Start reading at the document root, which must be an object.
    pub fn new(value: &'a Value) -> Result<Self> {
        Self::at(value, String::new())
    }

    fn at(value: &'a Value, path: String) -> Result<Self> {
        match value {
            Value::Object(object) => Ok(Self { object, path }),
            other => Err(CodecError::malformed(
                display_path(&path),
                format!("expected object, found {}", kind_of(other)),
            )),
        }
    }

    fn child_path(&self, field: &str) -> String {
        if self.path.is_empty() {
            field.to_string()
        } else {
            format!("{}.{field}", self.path)
        }
    }

    fn optional(&self, field: &'static str) -> Option<&'a Value> {
        match self.object.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    fn required(&self, field: &'static str) -> Result<&'a Value> {
        self.optional(field).ok_or_else(|| {
            trace!(path = %self.child_path(field), "missing required json field");
            CodecError::malformed(self.child_path(field), "missing required field")
        })
    }

    fn expect_str(&self, path: String, value: &'a Value) -> Result<&'a str> {
        value.as_str().ok_or_else(|| {
            CodecError::malformed(path, format!("expected string, found {}", kind_of(value)))
        })
    }

    fn nested<T: Record>(&self, field: &'static str, value: &'a Value) -> Result<T> {
        let mut reader = JsonReader::at(value, self.child_path(field))?;
        T::read_fields(&mut reader)
    }
}

impl FieldReader for JsonReader<'_> {
    fn read_string(&mut self, field: &'static str) -> Result<String> {
        let value = self.required(field)?;
        self.expect_str(self.child_path(field), value)
            .map(str::to_string)
    }

    fn read_optional_string(&mut self, field: &'static str) -> Result<Option<String>> {
        self.optional(field)
            .map(|value| {
                self.expect_str(self.child_path(field), value)
                    .map(str::to_string)
            })
            .transpose()
    }

    fn read_int(&mut self, field: &'static str) -> Result<i32> {
        let value = self.required(field)?;
        integral_i32(value).ok_or_else(|| {
            CodecError::malformed(
                self.child_path(field),
                format!("expected 32-bit integer, found {value}"),
            )
        })
    }

    fn read_string_list(&mut self, field: &'static str) -> Result<Vec<String>> {
        let path = self.child_path(field);
        let items = self.required(field)?.as_array().ok_or_else(|| {
            CodecError::malformed(path.clone(), "expected array of strings")
        })?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                self.expect_str(format!("{path}[{i}]"), item)
                    .map(str::to_string)
            })
            .collect()
    }

    fn read_string_map(&mut self, field: &'static str) -> Result<StringMap> {
        let path = self.child_path(field);
        let entries = self.required(field)?.as_object().ok_or_else(|| {
            CodecError::malformed(path.clone(), "expected object of strings")
        })?;

        entries
            .iter()
            .map(|(key, value)| {
                let value = self.expect_str(format!("{path}.{key}"), value)?;
                Ok((key.clone(), value.to_string()))
            })
            .collect()
    }

    fn read_enum<E: WireEnum>(&mut self, field: &'static str) -> Result<E> {
        let value = self.required(field)?;
        let name = self.expect_str(self.child_path(field), value)?;
        E::from_name(name).ok_or_else(|| {
            CodecError::malformed(
                self.child_path(field),
                format!("unknown {} name `{name}`", E::NAME),
            )
        })
    }

    fn read_record<T: Record>(&mut self, field: &'static str) -> Result<T> {
        let value = self.required(field)?;
        self.nested(field, value)
    }

    fn read_optional_record<T: Record>(&mut self, field: &'static str) -> Result<Option<T>> {
        self.optional(field)
            .map(|value| self.nested(field, value))
            .transpose()
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        ROOT_PATH.to_string()
    } else {
        path.to_string()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A JSON number with no fractional part that fits an int32. Integral floats
/// such as `80.0` count, matching the JSON Schema `integer` type.
fn integral_i32(value: &Value) -> Option<i32> {
    if let Some(n) = value.as_i64() {
        return i32::try_from(n).ok();
    }
    let n = value.as_f64()?;
    let in_range = n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX);
    (n.fract() == 0.0 && in_range).then_some(n as i32)
}
