use crate::config::node::NodeConfig;
use crate::core::node::{CsvNode, CSV_NODE_TYPE};
use crate::domain::ports::Node;
use crate::utils::error::{NodeError, Result};
use serde_json::Value;
use std::collections::HashMap;

pub type NodeFactory = fn(Value) -> Result<Box<dyn Node>>;

/// Node types known to the runtime, keyed by type name.
#[derive(Default)]
pub struct NodeRegistry {
    factories: HashMap<String, NodeFactory>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(CSV_NODE_TYPE, create_csv_node);
        registry
    }

    pub fn register(&mut self, node_type: &str, factory: NodeFactory) {
        if self
            .factories
            .insert(node_type.to_string(), factory)
            .is_some()
        {
            tracing::warn!("Node type '{}' registered twice, keeping the latest", node_type);
        }
    }

    pub fn contains(&self, node_type: &str) -> bool {
        self.factories.contains_key(node_type)
    }

    pub fn create(&self, node_type: &str, config: Value) -> Result<Box<dyn Node>> {
        let factory = self
            .factories
            .get(node_type)
            .ok_or_else(|| NodeError::UnknownNodeType {
                node_type: node_type.to_string(),
            })?;
        factory(config)
    }
}

fn create_csv_node(config: Value) -> Result<Box<dyn Node>> {
    let config = NodeConfig::from_value(config)?;
    Ok(Box::new(CsvNode::from_config(&config)?))
}
