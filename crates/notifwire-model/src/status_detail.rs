//! Delivery status reported back for a notification attempt.

use notifwire_stream::{FieldReader, FieldWriter, Record};

/// Status code and message returned by a delivery attempt.
///
/// Both fields are free-form text as reported by the destination, e.g. an
/// HTTP status code and its reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDetail {
    pub status_code: String,
    pub status_text: String,
}

impl StatusDetail {
    pub fn new(status_code: impl Into<String>, status_text: impl Into<String>) -> Self {
        Self {
            status_code: status_code.into(),
            status_text: status_text.into(),
        }
    }
}

impl Record for StatusDetail {
    fn write_fields<W: FieldWriter>(&self, out: &mut W) {
        out.write_string("statusCode", &self.status_code);
        out.write_string("statusText", &self.status_text);
    }

    fn read_fields<R: FieldReader>(input: &mut R) -> notifwire_stream::Result<Self> {
        Ok(Self {
            status_code: input.read_string("statusCode")?,
            status_text: input.read_string("statusText")?,
        })
    }
}
