use bytes::Buf;
use tracing::debug;

use crate::codec::{StreamConfig, ABSENT, PRESENT};
use crate::error::{CodecError, Result};
use crate::record::{FieldReader, Record, StringMap, WireEnum};

/// Smallest wire size of one sequence entry (an empty string).
const MIN_STRING_SIZE: usize = 4;

/// Reads record fields from any `Buf` in the fixed binary layout.
///
/// Every read checks the remaining input first, so a buffer cut short at any
/// byte boundary fails with [`CodecError::TruncatedInput`] instead of
/// producing a partial value.
pub struct StreamInput<B> {
    buf: B,
    config: StreamConfig,
    path: Vec<&'static str>,
}

impl<B: Buf> StreamInput<B> {
    /// Create a reader with default limits.
    pub fn new(buf: B) -> Self {
        Self::with_config(buf, StreamConfig::default())
    }

    /// Create a reader with explicit limits.
    pub fn with_config(buf: B, config: StreamConfig) -> Self {
        Self {
            buf,
            config,
            path: Vec::new(),
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Consume the reader and return the underlying buffer, positioned after
    /// the last field read.
    pub fn into_inner(self) -> B {
        self.buf
    }

    pub fn get_int(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.buf.get_i32())
    }

    pub fn get_string(&mut self) -> Result<String> {
        let len = self.get_len()?;
        self.ensure(len)?;
        if len > self.config.max_string_len {
            return Err(CodecError::LimitExceeded {
                what: "string",
                size: len,
                max: self.config.max_string_len,
            });
        }

        let mut bytes = vec![0u8; len];
        self.buf.copy_to_slice(&mut bytes);
        String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8 { path: self.path() })
    }

    pub fn get_optional_string(&mut self) -> Result<Option<String>> {
        if self.get_presence()? {
            self.get_string().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn get_string_list(&mut self) -> Result<Vec<String>> {
        let count = self.get_count(MIN_STRING_SIZE)?;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.get_string()?);
        }
        Ok(values)
    }

    /// Read a count-prefixed mapping. A repeated key keeps its last value.
    pub fn get_string_map(&mut self) -> Result<StringMap> {
        let count = self.get_count(2 * MIN_STRING_SIZE)?;
        let mut values = StringMap::new();
        for _ in 0..count {
            let key = self.get_string()?;
            let value = self.get_string()?;
            values.insert(key, value);
        }
        Ok(values)
    }

    pub fn get_enum<E: WireEnum>(&mut self) -> Result<E> {
        let ordinal = self.get_int()?;
        E::from_ordinal(ordinal).ok_or_else(|| {
            debug!(name = E::NAME, ordinal, path = %self.path(), "unknown enum ordinal");
            CodecError::UnknownEnumOrdinal {
                name: E::NAME,
                ordinal,
            }
        })
    }

    pub fn get_record<T: Record>(&mut self) -> Result<T> {
        T::read_fields(self)
    }

    pub fn get_optional_record<T: Record>(&mut self) -> Result<Option<T>> {
        if self.get_presence()? {
            self.get_record().map(Some)
        } else {
            Ok(None)
        }
    }

    fn get_presence(&mut self) -> Result<bool> {
        self.ensure(1)?;
        match self.buf.get_u8() {
            ABSENT => Ok(false),
            PRESENT => Ok(true),
            other => Err(CodecError::InvalidPresenceByte(other)),
        }
    }

    fn get_len(&mut self) -> Result<usize> {
        let len = self.get_int()?;
        usize::try_from(len).map_err(|_| CodecError::InvalidLength(len))
    }

    /// Read a collection count and reject it early when the remaining input
    /// cannot hold that many entries of `min_entry_size` bytes each.
    fn get_count(&mut self, min_entry_size: usize) -> Result<usize> {
        let count = self.get_len()?;
        self.ensure(count.saturating_mul(min_entry_size))?;
        if count > self.config.max_collection_len {
            return Err(CodecError::LimitExceeded {
                what: "collection",
                size: count,
                max: self.config.max_collection_len,
            });
        }
        Ok(count)
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.buf.remaining();
        if remaining < needed {
            return Err(CodecError::TruncatedInput { needed, remaining });
        }
        Ok(())
    }

    fn scoped<T>(
        &mut self,
        field: &'static str,
        read: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.path.push(field);
        let result = read(self);
        self.path.pop();
        result
    }

    fn path(&self) -> String {
        self.path.join(".")
    }
}

impl<B: Buf> FieldReader for StreamInput<B> {
    fn read_string(&mut self, field: &'static str) -> Result<String> {
        self.scoped(field, Self::get_string)
    }

    fn read_optional_string(&mut self, field: &'static str) -> Result<Option<String>> {
        self.scoped(field, Self::get_optional_string)
    }

    fn read_int(&mut self, field: &'static str) -> Result<i32> {
        self.scoped(field, Self::get_int)
    }

    fn read_string_list(&mut self, field: &'static str) -> Result<Vec<String>> {
        self.scoped(field, Self::get_string_list)
    }

    fn read_string_map(&mut self, field: &'static str) -> Result<StringMap> {
        self.scoped(field, Self::get_string_map)
    }

    fn read_enum<E: WireEnum>(&mut self, field: &'static str) -> Result<E> {
        self.scoped(field, Self::get_enum::<E>)
    }

    fn read_record<T: Record>(&mut self, field: &'static str) -> Result<T> {
        self.scoped(field, Self::get_record::<T>)
    }

    fn read_optional_record<T: Record>(&mut self, field: &'static str) -> Result<Option<T>> {
        self.scoped(field, Self::get_optional_record::<T>)
    }
}
