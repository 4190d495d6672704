use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One CSV record keyed by column name, in column order.
pub type Row = Map<String, Value>;

/// The envelope passed between flow nodes. Everything except `payload`
/// travels untouched in `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub payload: Option<Value>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

// `"payload": null` must stay distinguishable from a missing payload.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Message {
    pub fn with_payload(payload: impl Into<Value>) -> Self {
        Self {
            payload: Some(payload.into()),
            fields: Map::new(),
        }
    }

    pub fn topic(&self) -> Option<&str> {
        self.fields.get("topic").and_then(Value::as_str)
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.fields
            .insert("topic".to_string(), Value::String(topic.into()));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Keyed(Row),
    Positional(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Records(Vec<Record>),
    Unsupported,
}

impl Payload {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::String(text) => Payload::Text(text),
            Value::Object(row) => Payload::Records(vec![Record::Keyed(row)]),
            Value::Array(items) => {
                let mut records = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(row) => records.push(Record::Keyed(row)),
                        Value::Array(cells) => records.push(Record::Positional(cells)),
                        _ => return Payload::Unsupported,
                    }
                }
                Payload::Records(records)
            }
            Value::Number(_) | Value::Bool(_) | Value::Null => Payload::Unsupported,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message: message.into(),
        }
    }
}

/// Result of converting one message: what to forward and what to report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub forwarded: Option<Message>,
    pub diagnostic: Option<Diagnostic>,
}

impl Outcome {
    pub fn forward(message: Message) -> Self {
        Self {
            forwarded: Some(message),
            diagnostic: None,
        }
    }

    pub fn decline(diagnostic: Diagnostic) -> Self {
        Self {
            forwarded: None,
            diagnostic: Some(diagnostic),
        }
    }

    pub fn ignore() -> Self {
        Self::default()
    }
}
