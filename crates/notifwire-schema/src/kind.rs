use std::fmt;

/// Kinds of JSON document the registry can hold a schema for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocumentKind {
    Channel,
    Destination,
    Slack,
    Chime,
    Webhook,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        Self::Channel,
        Self::Destination,
        Self::Slack,
        Self::Chime,
        Self::Webhook,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Destination => "destination",
            Self::Slack => "slack",
            Self::Chime => "chime",
            Self::Webhook => "webhook",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
