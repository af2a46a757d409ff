//! Notification channel configuration model.
//!
//! A [`Channel`] pairs a name, a declared [`ChannelType`], optional
//! header/footer text and an ordered feature list with exactly one
//! [`Destination`]. Channels encode to a compact binary stream and to JSON;
//! both round-trip exactly.
//!
//! On the wire the destination keeps its nullable-slot layout
//! ([`DestinationSlots`]); decoding collapses the slots into the
//! [`Destination`] sum type and fails if not exactly one slot is populated.
//!
//! [`StatusDetail`] carries the outcome a destination reported for a
//! delivery attempt and uses the same two encodings.

pub mod channel;
pub mod codec;
pub mod destination;
pub mod error;
pub mod status_detail;

pub use channel::{Channel, ChannelRecord, ChannelType};
pub use codec::{
    decode_binary, decode_binary_with_config, decode_json, decode_json_str, encode_binary,
    encode_json, encode_json_string, validate_channel,
};
pub use destination::{Chime, Destination, DestinationSlots, Slack, Webhook};
pub use error::{ChannelError, Result};
pub use status_detail::StatusDetail;
pub use notifwire_stream::StringMap;
