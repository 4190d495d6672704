use crate::config::node::{CsvSettings, NodeConfig};
use crate::core::convert::convert;
use crate::domain::model::{Diagnostic, Message};
use crate::domain::ports::{Node, NodeHost};
use crate::utils::error::{NodeError, Result};
use async_trait::async_trait;

pub const CSV_NODE_TYPE: &str = "csv";

/// Flow node converting CSV text to rows and back.
#[derive(Debug, Clone)]
pub struct CsvNode {
    name: Option<String>,
    settings: CsvSettings,
}

impl CsvNode {
    pub fn new(settings: CsvSettings) -> Self {
        Self {
            name: None,
            settings,
        }
    }

    pub fn from_config(config: &NodeConfig) -> Result<Self> {
        let settings = config.settings()?;
        tracing::debug!(
            "csv node configured: delimiter={:?}, template={:?}",
            settings.delimiter as char,
            settings.template
        );
        Ok(Self {
            name: config.name.clone(),
            settings,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn settings(&self) -> &CsvSettings {
        &self.settings
    }
}

#[async_trait]
impl Node for CsvNode {
    fn node_type(&self) -> &'static str {
        CSV_NODE_TYPE
    }

    async fn on_input(&self, message: Message, host: &dyn NodeHost) -> Result<()> {
        let outcome = match convert(&self.settings, message) {
            Ok(outcome) => outcome,
            // 轉換失敗只影響這一則 message
            Err(e @ (NodeError::CsvError(_) | NodeError::ProcessingError { .. })) => {
                tracing::error!("❌ CSV conversion failed: {}", e);
                host.log(&Diagnostic::error(e.to_string()));
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if let Some(diagnostic) = &outcome.diagnostic {
            host.log(diagnostic);
        }

        if let Some(forwarded) = outcome.forwarded {
            host.send(forwarded).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::convert::UNSUPPORTED_PAYLOAD;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockHost {
        sent: Mutex<Vec<Message>>,
        logs: Mutex<Vec<Diagnostic>>,
    }

    #[async_trait]
    impl NodeHost for MockHost {
        async fn send(&self, message: Message) -> Result<()> {
            self.sent.lock().unwrap().push(message);
            Ok(())
        }

        fn log(&self, diagnostic: &Diagnostic) {
            self.logs.lock().unwrap().push(diagnostic.clone());
        }
    }

    #[tokio::test]
    async fn test_forwards_converted_message_once() {
        let node = CsvNode::new(CsvSettings::default());
        let host = MockHost::default();

        node.on_input(Message::with_payload("a,b\n1,2\n3,4\n"), &host)
            .await
            .unwrap();

        let sent = host.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].payload,
            Some(json!([{"a": "1", "b": "2"}, {"a": "3", "b": "4"}]))
        );
        assert!(host.logs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_logs_and_drops_unsupported_payload() {
        let node = CsvNode::new(CsvSettings::default());
        let host = MockHost::default();

        node.on_input(Message::with_payload(1), &host).await.unwrap();

        assert!(host.sent.lock().unwrap().is_empty());
        let logs = host.logs.lock().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, UNSUPPORTED_PAYLOAD);
    }

    #[test]
    fn test_from_config() {
        let config = NodeConfig::from_value(json!({"name": "people", "temp": "a,b", "sep": ";"}))
            .unwrap();
        let node = CsvNode::from_config(&config).unwrap();
        assert_eq!(node.name(), Some("people"));
        assert_eq!(node.node_type(), CSV_NODE_TYPE);
        assert_eq!(node.settings().delimiter, b';');
    }
}
