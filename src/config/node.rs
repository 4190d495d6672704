use crate::utils::error::{NodeError, Result};
use crate::utils::validation::validate_delimiter;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DELIMITER: &str = ",";
pub const QUOTE_CHAR: u8 = b'"';

/// Column template as the host supplies it: either `"a,b,c"` or `["a","b","c"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateSpec {
    Joined(String),
    Columns(Vec<String>),
}

impl TemplateSpec {
    /// 不做 trim：空白欄名（"" 與 " "）是合法欄位
    pub fn columns(&self) -> Option<Vec<String>> {
        match self {
            TemplateSpec::Joined(text) if text.is_empty() => None,
            TemplateSpec::Joined(text) => Some(text.split(',').map(str::to_string).collect()),
            TemplateSpec::Columns(columns) if columns.is_empty() => None,
            TemplateSpec::Columns(columns) => Some(columns.clone()),
        }
    }
}

/// Per-node configuration object handed over by the flow runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<TemplateSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sep: Option<String>,
}

impl NodeConfig {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| NodeError::ConfigValidationError {
            field: "node".to_string(),
            message: format!("Invalid csv node configuration: {}", e),
        })
    }

    pub fn settings(&self) -> Result<CsvSettings> {
        let sep = match self.sep.as_deref() {
            None | Some("") => DEFAULT_DELIMITER,
            Some(sep) => sep,
        };
        let expanded = expand_escapes(sep);
        let delimiter = validate_delimiter("sep", &expanded, QUOTE_CHAR)?;

        Ok(CsvSettings {
            delimiter,
            quote: QUOTE_CHAR,
            template: self.temp.as_ref().and_then(TemplateSpec::columns),
        })
    }
}

/// Immutable settings a CSV node is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSettings {
    pub delimiter: u8,
    pub quote: u8,
    pub template: Option<Vec<String>>,
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: QUOTE_CHAR,
            template: None,
        }
    }
}

impl CsvSettings {
    pub fn with_template<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.template = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl TryFrom<&NodeConfig> for CsvSettings {
    type Error = NodeError;

    fn try_from(config: &NodeConfig) -> Result<Self> {
        config.settings()
    }
}

/// Expands the `\n`, `\r` and `\t` escapes users type into the `sep` field.
pub fn expand_escapes(sep: &str) -> String {
    sep.replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_joined_template_keeps_blank_columns() {
        let config = NodeConfig::from_value(json!({
            "temp": "Surname,firstName,,DOB, ,favColour",
            "sep": ","
        }))
        .unwrap();
        let settings = config.settings().unwrap();
        assert_eq!(
            settings.template.unwrap(),
            vec!["Surname", "firstName", "", "DOB", " ", "favColour"]
        );
    }

    #[test]
    fn test_array_template() {
        let config = NodeConfig::from_value(json!({"temp": ["Surname", "First Name", " ", "DOB"]}))
            .unwrap();
        let settings = config.settings().unwrap();
        assert_eq!(settings.template.unwrap()[2], " ");
        assert_eq!(settings.delimiter, b',');
    }

    #[test]
    fn test_empty_template_means_header_inference() {
        let config = NodeConfig::from_value(json!({"temp": "", "sep": ""})).unwrap();
        let settings = config.settings().unwrap();
        assert_eq!(settings.template, None);
        assert_eq!(settings.delimiter, b',');
    }

    #[test]
    fn test_escaped_tab_delimiter() {
        let config = NodeConfig::from_value(json!({"sep": "\\t"})).unwrap();
        assert_eq!(config.settings().unwrap().delimiter, b'\t');
    }

    #[test]
    fn test_rejects_unusable_delimiters() {
        for sep in ["\\n", "\\r", "\"", ";;"] {
            let config = NodeConfig {
                sep: Some(sep.to_string()),
                ..Default::default()
            };
            assert!(config.settings().is_err(), "sep {:?} should be rejected", sep);
        }
    }

    #[test]
    fn test_rejects_wrong_shape() {
        assert!(NodeConfig::from_value(json!({"temp": 5})).is_err());
    }
}
