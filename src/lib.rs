pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::host::ChannelHost;
pub use crate::config::flow::FlowConfig;
pub use crate::config::node::{CsvSettings, NodeConfig};
pub use crate::core::{convert::convert, node::CsvNode, registry::NodeRegistry};
pub use crate::domain::model::{Diagnostic, Message, Outcome, Payload, Record, Row};
pub use crate::domain::ports::{Node, NodeHost};
pub use crate::utils::error::{NodeError, Result};
