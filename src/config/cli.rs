use crate::config::node::{NodeConfig, TemplateSpec};
use crate::domain::model::Message;
use crate::utils::error::{NodeError, Result};
use crate::utils::validation::{validate_path, validate_required_field, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "csv-node")]
#[command(about = "Convert between CSV text and row objects, one message at a time")]
pub struct CliConfig {
    #[arg(long, help = "Input file: .json for row objects or a full message, anything else is CSV text")]
    pub input: String,

    #[arg(long, help = "Comma-separated column template")]
    pub temp: Option<String>,

    #[arg(long, help = "Delimiter (\\t, \\r and \\n escapes allowed)")]
    pub sep: Option<String>,

    #[arg(long, help = "TOML flow file holding node definitions")]
    pub flow: Option<String>,

    #[arg(long, help = "Id of the node to run from the flow file")]
    pub node: Option<String>,

    #[arg(long, help = "Topic to set on the message")]
    pub topic: Option<String>,

    #[arg(long, help = "Write the forwarded message here instead of stdout")]
    pub output: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// flow 檔案未指定時，用命令列參數組出 node 配置
    pub fn node_config(&self) -> NodeConfig {
        NodeConfig {
            name: None,
            temp: self.temp.clone().map(TemplateSpec::Joined),
            sep: self.sep.clone(),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;

        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }

        if self.node.is_some() {
            let flow = validate_required_field("flow", &self.flow)?;
            validate_path("flow", flow)?;
        }

        if self.flow.is_some() && self.node.is_none() {
            return Err(NodeError::MissingConfigError {
                field: "node".to_string(),
            });
        }

        Ok(())
    }
}

/// 讀取輸入檔案並包成 message
pub async fn load_message<P: AsRef<Path>>(path: P) -> Result<Message> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if !is_json {
        return Ok(Message::with_payload(content));
    }

    let value: Value = serde_json::from_str(&content)?;
    let is_message = matches!(&value, Value::Object(obj) if obj.contains_key("payload"));
    if is_message {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(Message::with_payload(value))
    }
}

pub async fn write_message<P: AsRef<Path>>(path: P, message: &Message) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(message)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
