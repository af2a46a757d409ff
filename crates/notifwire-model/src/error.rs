use notifwire_stream::CodecError;

/// Errors that can occur while decoding or validating a channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    /// Binary or JSON decoding failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The populated destination does not match what the channel declares,
    /// or not exactly one destination slot is populated.
    #[error("destination mismatch: expected {expected}, found {actual}")]
    DestinationMismatch { expected: String, actual: String },
}

pub type Result<T> = std::result::Result<T, ChannelError>;
