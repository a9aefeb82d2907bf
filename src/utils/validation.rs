use crate::utils::error::{BookingError, Result};
use regex::Regex;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// At least one letter; spaces allowed anywhere. Letters are the Unicode `L*`
/// categories, so letter numbers (`Ⅷ`) and combining marks are rejected.
const LETTERS_AND_SPACES: &str = r"^ *\p{L}[\p{L} ]*$";

/// Dot-atom local part and a hostname with a TLD of two or more characters.
const EMAIL: &str = r#"(?i)^[-!#$%&'*+/=?^_`{}|~0-9A-Z]+(?:\.[-!#$%&'*+/=?^_`{}|~0-9A-Z]+)*@(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z0-9-]{1,62}[A-Z0-9]$"#;

pub(crate) type CompiledPattern = OnceLock<std::result::Result<Regex, regex::Error>>;

static LETTERS_AND_SPACES_RE: CompiledPattern = OnceLock::new();
static EMAIL_RE: CompiledPattern = OnceLock::new();

pub(crate) fn compiled(cell: &'static CompiledPattern, source: &str) -> Result<&'static Regex> {
    cell.get_or_init(|| Regex::new(source))
        .as_ref()
        .map_err(|e| BookingError::ConfigError {
            message: format!("invalid pattern {}: {}", source, e),
        })
}

/// Accepts only letters and spaces. Spaces are ignored, so a blank value is rejected.
pub fn validate_text(field_name: &str, value: &str) -> Result<()> {
    if !compiled(&LETTERS_AND_SPACES_RE, LETTERS_AND_SPACES)?.is_match(value) {
        return Err(BookingError::validation(
            field_name,
            format!("{} must contain only letters", field_name),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BookingError::validation(
            field_name,
            format!("{} cannot be empty or whitespace-only", field_name),
        ));
    }
    Ok(())
}

pub fn validate_max_length(field_name: &str, value: &str, max_length: usize) -> Result<()> {
    let length = value.chars().count();
    if length > max_length {
        return Err(BookingError::validation(
            field_name,
            format!(
                "{} must have at most {} characters (it has {})",
                field_name, max_length, length
            ),
        ));
    }
    Ok(())
}

pub fn validate_short_text(field_name: &str, value: &str, max_length: usize) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    validate_max_length(field_name, value, max_length)
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    if !compiled(&EMAIL_RE, EMAIL)?.is_match(value) {
        return Err(BookingError::validation(
            field_name,
            format!("{} must be a valid email address", field_name),
        ));
    }
    Ok(())
}
