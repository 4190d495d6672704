use crate::domain::model::{Diagnostic, DiagnosticLevel, Message};
use crate::domain::ports::NodeHost;
use crate::utils::error::{NodeError, Result};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Host that forwards messages over a tokio channel and reports
/// diagnostics through `tracing`.
#[derive(Debug, Clone)]
pub struct ChannelHost {
    node_id: String,
    sender: mpsc::UnboundedSender<Message>,
}

impl ChannelHost {
    pub fn new(node_id: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<Message>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                node_id: node_id.into(),
                sender,
            },
            receiver,
        )
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }
}

#[async_trait]
impl NodeHost for ChannelHost {
    async fn send(&self, message: Message) -> Result<()> {
        self.sender
            .send(message)
            .map_err(|_| NodeError::DeliveryError {
                message: format!("downstream of node '{}' is closed", self.node_id),
            })
    }

    fn log(&self, diagnostic: &Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Info => tracing::info!(node = %self.node_id, "{}", diagnostic.message),
            DiagnosticLevel::Warn => tracing::warn!(node = %self.node_id, "{}", diagnostic.message),
            DiagnosticLevel::Error => {
                tracing::error!(node = %self.node_id, "{}", diagnostic.message)
            }
        }
    }
}
