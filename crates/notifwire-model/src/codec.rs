//! Whole-value encode/decode entry points for [`Channel`].

use bytes::Bytes;
use notifwire_stream::{
    decode_record_with_config, encode_record, from_json_str, from_json_value, to_json_value,
    StreamConfig,
};
use serde_json::Value;
use tracing::trace;

use crate::channel::{Channel, ChannelRecord};
use crate::error::Result;

/// Encode a channel into its binary form. Never fails.
pub fn encode_binary(channel: &Channel) -> Bytes {
    encode_record(&ChannelRecord::from(channel))
}

/// Decode a channel that occupies the whole buffer.
///
/// Does not check type/destination agreement; call [`validate_channel`] for
/// that.
pub fn decode_binary(src: &[u8]) -> Result<Channel> {
    decode_binary_with_config(src, StreamConfig::default())
}

/// Decode a channel that occupies the whole buffer, with explicit limits.
pub fn decode_binary_with_config(src: &[u8], config: StreamConfig) -> Result<Channel> {
    let record: ChannelRecord = decode_record_with_config(src, config)?;
    trace!(bytes = src.len(), name = %record.name, "decoded binary channel");
    Channel::try_from(record)
}

/// Encode a channel as a JSON object.
pub fn encode_json(channel: &Channel) -> Value {
    to_json_value(&ChannelRecord::from(channel))
}

/// Decode a channel from a parsed JSON object.
pub fn decode_json(value: &Value) -> Result<Channel> {
    let record: ChannelRecord = from_json_value(value)?;
    trace!(name = %record.name, "decoded json channel");
    Channel::try_from(record)
}

/// Encode a channel as compact JSON text.
pub fn encode_json_string(channel: &Channel) -> String {
    encode_json(channel).to_string()
}

/// Parse JSON text and decode a channel from it.
pub fn decode_json_str(text: &str) -> Result<Channel> {
    let record: ChannelRecord = from_json_str(text)?;
    Channel::try_from(record)
}

/// Check that a channel's populated destination matches its declared type.
pub fn validate_channel(channel: &Channel) -> Result<()> {
    channel.validate()
}

#[cfg(test)]
mod tests {
    use notifwire_stream::{CodecError, StringMap};
    use serde_json::json;

    use super::*;
    use crate::channel::ChannelType;
    use crate::destination::{Chime, Destination, Slack, Webhook};
    use crate::error::ChannelError;

    const SAMPLE_URL: &str = "https://domain.com/sample_url#1234567890";

    fn sample_channel() -> Channel {
        Channel::new("name", Chime::new(SAMPLE_URL))
            .with_header("Sample Header")
            .with_footer("Sample Footer")
            .with_features(["Feature1", "Feature2", "Feature3"])
    }

    fn sample_webhook() -> Webhook {
        Webhook {
            url: SAMPLE_URL.to_string(),
            schema: "schema".to_string(),
            host: "slack.com".to_string(),
            port: 1234,
            path: "sample_path".to_string(),
            query_params: StringMap::from([("channel".to_string(), "#1234567890".to_string())]),
            header_params: StringMap::from([(
                "custom_header".to_string(),
                "header_value".to_string(),
            )]),
            username: Some("username".to_string()),
            password: Some("password".to_string()),
        }
    }

    #[test]
    fn channel_binary_roundtrip() {
        let channel = sample_channel();
        let decoded = decode_binary(&encode_binary(&channel)).unwrap();
        assert_eq!(decoded, channel);
        assert_eq!(decoded.features, ["Feature1", "Feature2", "Feature3"]);
    }

    #[test]
    fn channel_json_roundtrip() {
        let channel = sample_channel();
        assert_eq!(decode_json(&encode_json(&channel)).unwrap(), channel);
        assert_eq!(decode_json_str(&encode_json_string(&channel)).unwrap(), channel);
    }

    #[test]
    fn channel_with_absent_header_and_footer_roundtrip() {
        let channel = Channel {
            header: None,
            footer: None,
            ..sample_channel()
        };
        assert_eq!(decode_binary(&encode_binary(&channel)).unwrap(), channel);
        assert_eq!(decode_json(&encode_json(&channel)).unwrap(), channel);
    }

    #[test]
    fn webhook_channel_roundtrip() {
        let channel = Channel::new("hook", sample_webhook()).with_features(["alerts"]);
        assert_eq!(decode_binary(&encode_binary(&channel)).unwrap(), channel);
        assert_eq!(decode_json(&encode_json(&channel)).unwrap(), channel);
    }

    #[test]
    fn binary_layout_matches_field_order() {
        let channel = Channel::new("n", Slack::new("u"));
        let bytes = encode_binary(&channel);
        assert_eq!(
            bytes.as_ref(),
            &[
                0, 0, 0, 1, b'n', // name
                0, 0, 0, 0, // type = Slack
                0, // header absent
                0, // footer absent
                0, 0, 0, 0, // features: empty
                1, 0, 0, 0, 1, b'u', // slack slot
                0, // chime slot
                0, // webhook slot
            ][..]
        );
    }

    #[test]
    fn large_channel_roundtrips_with_default_limits() {
        let channel = Channel::new("n", Slack::new("u"))
            .with_features((0..70_000).map(|i| format!("f{i}")))
            .with_header("h".repeat(17 * 1024 * 1024));

        let decoded = decode_binary(&encode_binary(&channel)).unwrap();
        assert_eq!(decoded, channel);
    }

    #[test]
    fn opt_in_limits_reject_large_channel() {
        let channel =
            Channel::new("n", Slack::new("u")).with_features((0..3).map(|i| format!("f{i}")));
        let config = StreamConfig {
            max_collection_len: 2,
            ..StreamConfig::UNBOUNDED
        };
        assert!(matches!(
            decode_binary_with_config(&encode_binary(&channel), config),
            Err(ChannelError::Codec(CodecError::LimitExceeded {
                what: "collection",
                ..
            }))
        ));
    }

    #[test]
    fn json_layout_matches_field_names() {
        let channel = Channel {
            header: None,
            ..sample_channel()
        };
        assert_eq!(
            encode_json(&channel),
            json!({
                "name": "name",
                "type": "Chime",
                "header": null,
                "footer": "Sample Footer",
                "features": ["Feature1", "Feature2", "Feature3"],
                "destination": {
                    "slack": null,
                    "chime": {"url": SAMPLE_URL},
                    "webhook": null
                }
            })
        );
    }

    #[test]
    fn json_missing_optionals_decode_as_absent() {
        let value = json!({
            "name": "name",
            "type": "Slack",
            "features": [],
            "destination": {"slack": {"url": SAMPLE_URL}}
        });
        let channel = decode_json(&value).unwrap();
        assert_eq!(channel.header, None);
        assert_eq!(channel.destination, Destination::Slack(Slack::new(SAMPLE_URL)));
    }

    #[test]
    fn json_type_mismatch_names_path() {
        let value = json!({
            "name": "hook",
            "type": "Webhook",
            "features": [],
            "destination": {"webhook": {
                "url": "u", "schema": "s", "host": "h", "port": "80", "path": "p",
                "queryParams": {}, "headerParams": {}
            }}
        });
        assert!(matches!(
            decode_json(&value),
            Err(ChannelError::Codec(CodecError::MalformedJson { path, .. }))
                if path == "destination.webhook.port"
        ));
    }

    #[test]
    fn json_invalid_text_is_malformed() {
        assert!(matches!(
            decode_json_str("{\"name\":"),
            Err(ChannelError::Codec(CodecError::MalformedJson { .. }))
        ));
    }

    #[test]
    fn binary_trailing_bytes_rejected() {
        let mut bytes = encode_binary(&sample_channel()).to_vec();
        bytes.push(0);
        assert_eq!(
            decode_binary(&bytes),
            Err(ChannelError::Codec(CodecError::TrailingBytes(1)))
        );
    }

    #[test]
    fn binary_unknown_ordinal_rejected() {
        let mut bytes = encode_binary(&sample_channel()).to_vec();
        // name "name" occupies bytes 0..8; type ordinal follows.
        bytes[8..12].copy_from_slice(&3i32.to_be_bytes());
        assert_eq!(
            decode_binary(&bytes),
            Err(ChannelError::Codec(CodecError::UnknownEnumOrdinal {
                name: "ChannelType",
                ordinal: 3,
            }))
        );
    }

    #[test]
    fn decode_does_not_check_type_agreement() {
        let channel = Channel {
            channel_type: ChannelType::Slack,
            ..sample_channel()
        };
        let decoded = decode_binary(&encode_binary(&channel)).unwrap();
        assert_eq!(decoded, channel);
        assert!(matches!(
            validate_channel(&decoded),
            Err(ChannelError::DestinationMismatch { .. })
        ));
    }
}
