use crate::utils::error::{NodeError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(NodeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(NodeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| NodeError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NodeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 分隔符必須是單一 ASCII 字元，且不可與引號或換行衝突
pub fn validate_delimiter(field_name: &str, value: &str, quote: u8) -> Result<u8> {
    let invalid = |reason: &str| NodeError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.escape_default().to_string(),
        reason: reason.to_string(),
    };

    let bytes = value.as_bytes();
    if bytes.len() != 1 || !bytes[0].is_ascii() {
        return Err(invalid("Delimiter must be exactly one ASCII character"));
    }

    match bytes[0] {
        b'\n' | b'\r' => Err(invalid("Delimiter cannot be a line terminator")),
        b if b == quote => Err(invalid("Delimiter cannot be the quote character")),
        b => Ok(b),
    }
}

pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(NodeError::ConfigValidationError {
                field: field_name.to_string(),
                message: format!("Duplicate value '{}'", value),
            });
        }
    }
    Ok(())
}
