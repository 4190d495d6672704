use crate::utils::error::{NodeError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_unique, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    pub flow: FlowInfo,
    #[serde(default)]
    pub nodes: Vec<NodeDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub id: String,
    pub r#type: String,
    /// 其餘欄位原樣交給 node factory（例如 temp、sep）
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl NodeDefinition {
    pub fn properties(&self) -> Value {
        Value::Object(self.properties.clone())
    }
}

impl FlowConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NodeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| NodeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CSV_TEMPLATE})，未設定者保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn node(&self, id: &str) -> Result<&NodeDefinition> {
        self.nodes
            .iter()
            .find(|node| node.id == id)
            .ok_or_else(|| NodeError::ConfigError {
                message: format!("Node '{}' not found in flow '{}'", id, self.flow.name),
            })
    }
}

impl Validate for FlowConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("flow.name", &self.flow.name)?;

        for node in &self.nodes {
            validate_non_empty_string("nodes.id", &node.id)?;
            validate_non_empty_string("nodes.type", &node.r#type)?;
        }

        validate_unique("nodes.id", self.nodes.iter().map(|node| node.id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOW: &str = r#"
[flow]
name = "people"

[[nodes]]
id = "n1"
type = "csv"
temp = "Surname,First Name, ,DOB"
sep = ","

[[nodes]]
id = "n2"
type = "csv"
temp = ["a", "b"]
"#;

    #[test]
    fn test_parse_flow() {
        let flow = FlowConfig::from_toml_str(FLOW).unwrap();
        assert!(flow.validate().is_ok());
        assert_eq!(flow.nodes.len(), 2);

        let n1 = flow.node("n1").unwrap();
        assert_eq!(n1.r#type, "csv");
        assert_eq!(
            n1.properties()["temp"],
            Value::String("Surname,First Name, ,DOB".to_string())
        );
        assert!(n1.properties().get("id").is_none());
        assert!(flow.node("missing").is_err());
    }

    #[test]
    fn test_duplicate_ids_fail_validation() {
        let content = r#"
[flow]
name = "dup"

[[nodes]]
id = "n1"
type = "csv"

[[nodes]]
id = "n1"
type = "csv"
"#;
        let flow = FlowConfig::from_toml_str(content).unwrap();
        assert!(flow.validate().is_err());
    }

    #[test]
    fn test_unset_env_var_is_left_alone() {
        let content = "[flow]\nname = \"${CSV_NODE_SURELY_UNSET_VAR}\"\n";
        let flow = FlowConfig::from_toml_str(content).unwrap();
        assert_eq!(flow.flow.name, "${CSV_NODE_SURELY_UNSET_VAR}");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(FlowConfig::from_toml_str("[flow").is_err());
    }
}
