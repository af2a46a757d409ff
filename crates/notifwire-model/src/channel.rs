use std::fmt;

use bytes::{Buf, BufMut};
use notifwire_stream::{FieldReader, FieldWriter, Record, StreamInput, StreamOutput, WireEnum};
use tracing::debug;

use crate::destination::{Destination, DestinationSlots};
use crate::error::{ChannelError, Result};

/// Delivery kind of a channel.
///
/// The discriminants are the wire ordinals. Never reorder them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    Slack = 0,
    Chime = 1,
    Webhook = 2,
}

impl ChannelType {
    /// All kinds in ordinal order.
    pub const ALL: [ChannelType; 3] = [Self::Slack, Self::Chime, Self::Webhook];

    pub fn name(self) -> &'static str {
        match self {
            Self::Slack => "Slack",
            Self::Chime => "Chime",
            Self::Webhook => "Webhook",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn ordinal(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl WireEnum for ChannelType {
    const NAME: &'static str = "ChannelType";

    fn ordinal(self) -> i32 {
        ChannelType::ordinal(self)
    }

    fn from_ordinal(ordinal: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.ordinal() == ordinal)
    }

    fn name(self) -> &'static str {
        ChannelType::name(self)
    }

    fn from_name(name: &str) -> Option<Self> {
        ChannelType::from_name(name)
    }
}

/// A named notification configuration with exactly one delivery destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
    pub channel_type: ChannelType,
    pub header: Option<String>,
    pub footer: Option<String>,
    /// Feature names; order is preserved on the wire.
    pub features: Vec<String>,
    pub destination: Destination,
}

impl Channel {
    /// Create a channel whose type follows its destination.
    pub fn new(name: impl Into<String>, destination: impl Into<Destination>) -> Self {
        let destination = destination.into();
        Self {
            name: name.into(),
            channel_type: destination.kind(),
            header: None,
            footer: None,
            features: Vec::new(),
            destination,
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Check that the destination kind agrees with the declared type.
    pub fn validate(&self) -> Result<()> {
        let actual = self.destination.kind();
        if actual != self.channel_type {
            debug!(
                channel = %self.name,
                expected = %self.channel_type,
                %actual,
                "channel type does not match destination"
            );
            return Err(ChannelError::DestinationMismatch {
                expected: self.channel_type.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }

    /// Append the binary encoding to a stream.
    pub fn write_to<B: BufMut>(&self, out: &mut StreamOutput<B>) {
        out.put_record(&ChannelRecord::from(self));
    }

    /// Read one channel from a stream, leaving any following bytes unread.
    pub fn read_from<B: Buf>(input: &mut StreamInput<B>) -> Result<Self> {
        let record: ChannelRecord = input.get_record()?;
        Self::try_from(record)
    }
}

/// Wire shape of a [`Channel`], with the destination in nullable-slot layout.
///
/// Field order: `name`, `type`, `header`, `footer`, `features`, `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    pub name: String,
    pub channel_type: ChannelType,
    pub header: Option<String>,
    pub footer: Option<String>,
    pub features: Vec<String>,
    pub destination: DestinationSlots,
}

impl ChannelRecord {
    /// Check that exactly one destination slot is populated and that its kind
    /// matches the declared type.
    pub fn validate(&self) -> Result<()> {
        Channel::try_from(self.clone())?.validate()
    }
}

impl Record for ChannelRecord {
    fn write_fields<W: FieldWriter>(&self, out: &mut W) {
        out.write_string("name", &self.name);
        out.write_enum("type", self.channel_type);
        out.write_optional_string("header", self.header.as_deref());
        out.write_optional_string("footer", self.footer.as_deref());
        out.write_string_list("features", &self.features);
        out.write_record("destination", &self.destination);
    }

    fn read_fields<R: FieldReader>(input: &mut R) -> notifwire_stream::Result<Self> {
        Ok(Self {
            name: input.read_string("name")?,
            channel_type: input.read_enum("type")?,
            header: input.read_optional_string("header")?,
            footer: input.read_optional_string("footer")?,
            features: input.read_string_list("features")?,
            destination: input.read_record("destination")?,
        })
    }
}

impl From<&Channel> for ChannelRecord {
    fn from(value: &Channel) -> Self {
        Self {
            name: value.name.clone(),
            channel_type: value.channel_type,
            header: value.header.clone(),
            footer: value.footer.clone(),
            features: value.features.clone(),
            destination: DestinationSlots::from(value.destination.clone()),
        }
    }
}

impl TryFrom<ChannelRecord> for Channel {
    type Error = ChannelError;

    /// Collapse the destination slots into a [`Destination`]. The declared
    /// type is carried over as-is; see [`Channel::validate`].
    fn try_from(value: ChannelRecord) -> Result<Self> {
        Ok(Self {
            name: value.name,
            channel_type: value.channel_type,
            header: value.header,
            footer: value.footer,
            features: value.features,
            destination: Destination::try_from(value.destination)?,
        })
    }
}
