use crate::domain::model::{Diagnostic, Message};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Capabilities the flow runtime lends to a node.
#[async_trait]
pub trait NodeHost: Send + Sync {
    async fn send(&self, message: Message) -> Result<()>;
    fn log(&self, diagnostic: &Diagnostic);
}

#[async_trait]
pub trait Node: Send + Sync {
    fn node_type(&self) -> &'static str;
    async fn on_input(&self, message: Message, host: &dyn NodeHost) -> Result<()>;
}
