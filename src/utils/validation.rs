use crate::utils::error::{Result, SchoolError};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(SchoolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// A file name must be a bare name, not a path into another directory.
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;

    let path = Path::new(name);
    if path.file_name().map(|f| f.len()) != Some(name.len()) {
        return Err(SchoolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Expected a file name without directory components".to_string(),
        });
    }
    Ok(())
}

pub fn validate_distinct(field_a: &str, a: &str, field_b: &str, b: &str) -> Result<()> {
    if a == b {
        return Err(SchoolError::ConfigValidationError {
            field: format!("{}/{}", field_a, field_b),
            message: format!("'{}' is used for both files", a),
        });
    }
    Ok(())
}
