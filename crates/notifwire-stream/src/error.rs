/// Errors that can occur while encoding or decoding a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The binary input ended before a field was complete.
    #[error("truncated input (needed {needed} bytes, {remaining} remaining)")]
    TruncatedInput { needed: usize, remaining: usize },

    /// A decoded enum ordinal has no corresponding variant.
    #[error("unknown {name} ordinal {ordinal}")]
    UnknownEnumOrdinal { name: &'static str, ordinal: i32 },

    /// A JSON document is missing a required field or has the wrong shape.
    #[error("malformed json at `{path}`: {message}")]
    MalformedJson { path: String, message: String },

    /// String bytes on the wire are not valid UTF-8.
    #[error("invalid utf-8 in string field `{path}`")]
    InvalidUtf8 { path: String },

    /// An optional presence marker was neither 0 nor 1.
    #[error("invalid presence byte {0:#04x} (expected 0 or 1)")]
    InvalidPresenceByte(u8),

    /// A length or count prefix was negative.
    #[error("invalid length prefix {0}")]
    InvalidLength(i32),

    /// A length or count prefix exceeded the configured limit.
    #[error("{what} too large ({size}, max {max})")]
    LimitExceeded {
        what: &'static str,
        size: usize,
        max: usize,
    },

    /// A whole-buffer decode finished with unread bytes left over.
    #[error("{0} trailing bytes after record")]
    TrailingBytes(usize),
}

impl CodecError {
    pub(crate) fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedJson {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
