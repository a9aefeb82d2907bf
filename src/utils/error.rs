use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { field: String, message: String },

    #[error("{entity} with {field} '{value}' already exists")]
    UniqueViolation {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Integrity error: {message}")]
    IntegrityError { message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("Invalid reservation status: '{0}'")]
    InvalidStatus(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Validation,
    Persistence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Io,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } | Self::InvalidStatus(_) => ErrorCategory::Validation,
            Self::UniqueViolation { .. } | Self::IntegrityError { .. } | Self::NotFound { .. } => {
                ErrorCategory::Persistence
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound { .. } => ErrorSeverity::Medium,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the file exists and is readable/writable",
            Self::SerializationError(_) => "The snapshot file is corrupted; restore it or start from a seed",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Review the seed file against the documented format",
            Self::ValidationError { .. } => "Correct the offending field and try again",
            Self::UniqueViolation { .. } => "Use a different value or update the existing record",
            Self::IntegrityError { .. } => "Make sure referenced clients and services exist",
            Self::NotFound { .. } => "List the records to find a valid identifier",
            Self::InvalidStatus(_) => "Use one of: pending, confirmed, cancelled",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message, .. } => message.clone(),
            Self::UniqueViolation {
                entity,
                field,
                value,
            } => format!("A {} with {} '{}' is already registered", entity.to_lowercase(), field, value),
            Self::NotFound { entity, id } => format!("No {} with id {}", entity.to_lowercase(), id),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message_names_field() {
        let err = BookingError::validation("first_name", "first_name must contain only letters");
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.user_friendly_message(), "first_name must contain only letters");
    }

    #[test]
    fn test_severity_by_kind() {
        let missing = BookingError::NotFound { entity: "Client", id: 7 };
        assert_eq!(missing.severity(), ErrorSeverity::Medium);
        assert_eq!(missing.user_friendly_message(), "No client with id 7");

        let io = BookingError::IoError(std::io::Error::other("disk"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
        assert_eq!(io.category(), ErrorCategory::Io);
    }
}
