use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Unknown node type: {node_type}")]
    UnknownNodeType { node_type: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Message delivery failed: {message}")]
    DeliveryError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Data,
    Io,
    Delivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl NodeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NodeError::ConfigError { .. }
            | NodeError::InvalidConfigValueError { .. }
            | NodeError::MissingConfigError { .. }
            | NodeError::ConfigValidationError { .. }
            | NodeError::UnknownNodeType { .. } => ErrorCategory::Configuration,
            NodeError::CsvError(_)
            | NodeError::SerializationError(_)
            | NodeError::ProcessingError { .. } => ErrorCategory::Data,
            NodeError::IoError(_) => ErrorCategory::Io,
            NodeError::DeliveryError { .. } => ErrorCategory::Delivery,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Delivery => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NodeError::InvalidConfigValueError { .. } | NodeError::ConfigValidationError { .. } => {
                "Check the node configuration values (temp, sep) and try again"
            }
            NodeError::MissingConfigError { .. } | NodeError::ConfigError { .. } => {
                "Provide the missing configuration via CLI flags or the flow file"
            }
            NodeError::UnknownNodeType { .. } => "Use a registered node type such as 'csv'",
            NodeError::CsvError(_) | NodeError::ProcessingError { .. } => {
                "Inspect the input payload for malformed CSV or unsupported values"
            }
            NodeError::SerializationError(_) => "Make sure the input is valid JSON",
            NodeError::IoError(_) => "Check that the input/output paths exist and are accessible",
            NodeError::DeliveryError { .. } => "Ensure the downstream receiver is still running",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid node configuration: {}", self),
            ErrorCategory::Data => format!("Could not convert the payload: {}", self),
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Delivery => format!("Could not forward the message: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, NodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = NodeError::InvalidConfigValueError {
            field: "sep".to_string(),
            value: "ab".to_string(),
            reason: "must be one character".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("sep"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = NodeError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing.csv",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
