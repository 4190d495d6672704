use crate::config::node::CsvSettings;
use crate::core::codec::CsvCodec;
use crate::domain::model::{Diagnostic, Message, Outcome, Payload};
use crate::utils::error::Result;
use serde_json::Value;

pub const UNSUPPORTED_PAYLOAD: &str = "This node only handles csv strings or js objects.";

/// Converts one message. Text payloads become rows, rows become text;
/// anything else is declined with a diagnostic.
///
/// A message without a `payload` field is ignored.
pub fn convert(settings: &CsvSettings, mut message: Message) -> Result<Outcome> {
    let Some(payload) = message.payload.take() else {
        tracing::debug!("Message has no payload, ignoring");
        return Ok(Outcome::ignore());
    };

    let codec = CsvCodec::new(settings);
    match Payload::classify(payload) {
        Payload::Text(text) => {
            let rows = codec.parse(&text)?;
            tracing::debug!("Parsed {} rows from {} bytes of CSV", rows.len(), text.len());
            message.payload = Some(Value::Array(rows.into_iter().map(Value::Object).collect()));
            Ok(Outcome::forward(message))
        }
        Payload::Records(records) => {
            let text = codec.write_records(&records)?;
            tracing::debug!("Wrote {} records as CSV", records.len());
            message.payload = Some(Value::String(text));
            Ok(Outcome::forward(message))
        }
        Payload::Unsupported => Ok(Outcome::decline(Diagnostic::info(UNSUPPORTED_PAYLOAD))),
    }
}
