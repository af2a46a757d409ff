//! Delivery destinations and their nullable-slot wire layout.

use std::fmt;

use notifwire_stream::{FieldReader, FieldWriter, Record, StringMap};
use tracing::debug;

use crate::channel::ChannelType;
use crate::error::{ChannelError, Result};

/// Slack incoming-webhook destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slack {
    pub url: String,
}

impl Slack {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Record for Slack {
    fn write_fields<W: FieldWriter>(&self, out: &mut W) {
        out.write_string("url", &self.url);
    }

    fn read_fields<R: FieldReader>(input: &mut R) -> notifwire_stream::Result<Self> {
        Ok(Self {
            url: input.read_string("url")?,
        })
    }
}

/// Amazon Chime webhook destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chime {
    pub url: String,
}

impl Chime {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Record for Chime {
    fn write_fields<W: FieldWriter>(&self, out: &mut W) {
        out.write_string("url", &self.url);
    }

    fn read_fields<R: FieldReader>(input: &mut R) -> notifwire_stream::Result<Self> {
        Ok(Self {
            url: input.read_string("url")?,
        })
    }
}

/// Generic HTTP webhook destination.
///
/// `query_params` and `header_params` compare equal regardless of the order
/// their entries were inserted or decoded in.
#[derive(Clone, PartialEq, Eq)]
pub struct Webhook {
    pub url: String,
    pub schema: String,
    pub host: String,
    pub port: i32,
    pub path: String,
    pub query_params: StringMap,
    pub header_params: StringMap,
    pub username: Option<String>,
    /// Credential material, redacted in debug output.
    pub password: Option<String>,
}

impl fmt::Debug for Webhook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Webhook");
        dbg.field("url", &self.url)
            .field("schema", &self.schema)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("query_params", &self.query_params)
            .field("header_params", &self.header_params)
            .field("username", &self.username);
        if let Some(password) = &self.password {
            dbg.field(
                "password",
                &format_args!("<redacted:{} bytes>", password.len()),
            );
        } else {
            dbg.field("password", &Option::<String>::None);
        }
        dbg.finish()
    }
}

impl Record for Webhook {
    fn write_fields<W: FieldWriter>(&self, out: &mut W) {
        out.write_string("url", &self.url);
        out.write_string("schema", &self.schema);
        out.write_string("host", &self.host);
        out.write_int("port", self.port);
        out.write_string("path", &self.path);
        out.write_string_map("queryParams", &self.query_params);
        out.write_string_map("headerParams", &self.header_params);
        out.write_optional_string("username", self.username.as_deref());
        out.write_optional_string("password", self.password.as_deref());
    }

    fn read_fields<R: FieldReader>(input: &mut R) -> notifwire_stream::Result<Self> {
        Ok(Self {
            url: input.read_string("url")?,
            schema: input.read_string("schema")?,
            host: input.read_string("host")?,
            port: input.read_int("port")?,
            path: input.read_string("path")?,
            query_params: input.read_string_map("queryParams")?,
            header_params: input.read_string_map("headerParams")?,
            username: input.read_optional_string("username")?,
            password: input.read_optional_string("password")?,
        })
    }
}

/// The single delivery target of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Slack(Slack),
    Chime(Chime),
    Webhook(Webhook),
}

impl Destination {
    /// The channel type this destination belongs to.
    pub fn kind(&self) -> ChannelType {
        match self {
            Self::Slack(_) => ChannelType::Slack,
            Self::Chime(_) => ChannelType::Chime,
            Self::Webhook(_) => ChannelType::Webhook,
        }
    }

    pub fn as_slack(&self) -> Option<&Slack> {
        match self {
            Self::Slack(slack) => Some(slack),
            _ => None,
        }
    }

    pub fn as_chime(&self) -> Option<&Chime> {
        match self {
            Self::Chime(chime) => Some(chime),
            _ => None,
        }
    }

    pub fn as_webhook(&self) -> Option<&Webhook> {
        match self {
            Self::Webhook(webhook) => Some(webhook),
            _ => None,
        }
    }
}

impl From<Slack> for Destination {
    fn from(value: Slack) -> Self {
        Self::Slack(value)
    }
}

impl From<Chime> for Destination {
    fn from(value: Chime) -> Self {
        Self::Chime(value)
    }
}

impl From<Webhook> for Destination {
    fn from(value: Webhook) -> Self {
        Self::Webhook(value)
    }
}

/// Wire layout of a destination: one independently optional slot per kind,
/// in fixed order `slack`, `chime`, `webhook`.
///
/// Decoding a `DestinationSlots` accepts any combination of populated slots.
/// Converting to [`Destination`] requires exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationSlots {
    pub slack: Option<Slack>,
    pub chime: Option<Chime>,
    pub webhook: Option<Webhook>,
}

impl DestinationSlots {
    /// Kinds whose slot is populated, in wire order.
    pub fn populated(&self) -> Vec<ChannelType> {
        let mut kinds = Vec::with_capacity(1);
        if self.slack.is_some() {
            kinds.push(ChannelType::Slack);
        }
        if self.chime.is_some() {
            kinds.push(ChannelType::Chime);
        }
        if self.webhook.is_some() {
            kinds.push(ChannelType::Webhook);
        }
        kinds
    }
}

impl Record for DestinationSlots {
    fn write_fields<W: FieldWriter>(&self, out: &mut W) {
        out.write_optional_record("slack", self.slack.as_ref());
        out.write_optional_record("chime", self.chime.as_ref());
        out.write_optional_record("webhook", self.webhook.as_ref());
    }

    fn read_fields<R: FieldReader>(input: &mut R) -> notifwire_stream::Result<Self> {
        Ok(Self {
            slack: input.read_optional_record("slack")?,
            chime: input.read_optional_record("chime")?,
            webhook: input.read_optional_record("webhook")?,
        })
    }
}

impl From<Destination> for DestinationSlots {
    fn from(value: Destination) -> Self {
        match value {
            Destination::Slack(slack) => Self {
                slack: Some(slack),
                ..Self::default()
            },
            Destination::Chime(chime) => Self {
                chime: Some(chime),
                ..Self::default()
            },
            Destination::Webhook(webhook) => Self {
                webhook: Some(webhook),
                ..Self::default()
            },
        }
    }
}

impl TryFrom<DestinationSlots> for Destination {
    type Error = ChannelError;

    fn try_from(value: DestinationSlots) -> Result<Self> {
        match value {
            DestinationSlots {
                slack: Some(slack),
                chime: None,
                webhook: None,
            } => Ok(Self::Slack(slack)),
            DestinationSlots {
                slack: None,
                chime: Some(chime),
                webhook: None,
            } => Ok(Self::Chime(chime)),
            DestinationSlots {
                slack: None,
                chime: None,
                webhook: Some(webhook),
            } => Ok(Self::Webhook(webhook)),
            other => {
                let populated = other.populated();
                let actual = if populated.is_empty() {
                    "no destination".to_string()
                } else {
                    populated
                        .iter()
                        .map(|kind| kind.name())
                        .collect::<Vec<_>>()
                        .join(" + ")
                };
                debug!(%actual, "destination slots do not hold exactly one value");
                Err(ChannelError::DestinationMismatch {
                    expected: "exactly one destination".to_string(),
                    actual,
                })
            }
        }
    }
}
