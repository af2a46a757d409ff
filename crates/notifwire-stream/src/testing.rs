//! Record fixtures exercising every primitive kind.

use crate::error::Result;
use crate::record::{FieldReader, FieldWriter, Record, StringMap, WireEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    Low,
    Medium,
    High,
}

impl WireEnum for Level {
    const NAME: &'static str = "Level";

    fn ordinal(self) -> i32 {
        self as i32
    }

    fn from_ordinal(ordinal: i32) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        [Self::Low, Self::Medium, Self::High]
            .into_iter()
            .find(|level| level.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sample {
    pub title: String,
    pub note: Option<String>,
    pub count: i32,
    pub tags: Vec<String>,
    pub labels: StringMap,
    pub level: Level,
    pub child: Option<Box<Sample>>,
}

impl Sample {
    pub fn minimal() -> Self {
        Self {
            title: String::new(),
            note: None,
            count: 0,
            tags: Vec::new(),
            labels: StringMap::new(),
            level: Level::Low,
            child: None,
        }
    }

    pub fn full() -> Self {
        Self {
            title: "alpha".to_string(),
            note: Some("optional note".to_string()),
            count: -42,
            tags: vec!["b".to_string(), "a".to_string(), "c".to_string()],
            labels: StringMap::from([
                ("team".to_string(), "ops".to_string()),
                ("env".to_string(), "prod".to_string()),
            ]),
            level: Level::High,
            child: Some(Box::new(Self {
                title: "inner".to_string(),
                ..Self::minimal()
            })),
        }
    }
}

impl Record for Sample {
    fn write_fields<W: FieldWriter>(&self, out: &mut W) {
        out.write_string("title", &self.title);
        out.write_optional_string("note", self.note.as_deref());
        out.write_int("count", self.count);
        out.write_string_list("tags", &self.tags);
        out.write_string_map("labels", &self.labels);
        out.write_enum("level", self.level);
        out.write_optional_record("child", self.child.as_deref());
    }

    fn read_fields<R: FieldReader>(input: &mut R) -> Result<Self> {
        Ok(Self {
            title: input.read_string("title")?,
            note: input.read_optional_string("note")?,
            count: input.read_int("count")?,
            tags: input.read_string_list("tags")?,
            labels: input.read_string_map("labels")?,
            level: input.read_enum("level")?,
            child: input.read_optional_record::<Sample>("child")?.map(Box::new),
        })
    }
}
