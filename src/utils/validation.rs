use crate::utils::error::{AppError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> AppError {
    AppError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// A log output path must name a file: non-blank, no NUL, no trailing separator.
pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    let reason = if path.trim().is_empty() {
        "Path cannot be empty"
    } else if path.contains('\0') {
        "Path contains null bytes"
    } else if path.ends_with(std::path::MAIN_SEPARATOR) {
        "Path names a directory, not a file"
    } else {
        return Ok(());
    };
    Err(invalid(field_name, path, reason))
}

pub fn validate_range<T>(field_name: &str, value: T, min: T, max: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ))
    }
}
