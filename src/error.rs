//! Error types for component construction and validation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    /// The identifier was missing or empty
    #[error("component id is required")]
    MissingId,

    /// Component data did not match the declared fields
    #[error("invalid component data: {0}")]
    Data(#[from] toml::de::Error),
}

impl ValidationError {
    /// Whether this error was caused by a missing or empty identifier
    pub fn is_missing_id(&self) -> bool {
        matches!(self, ValidationError::MissingId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_id_display() {
        assert_eq!(ValidationError::MissingId.to_string(), "component id is required");
    }

    #[test]
    fn test_data_error_from_toml() {
        let err: ValidationError = toml::from_str::<toml::Table>("not = [valid")
            .unwrap_err()
            .into();
        assert!(matches!(err, ValidationError::Data(_)));
        assert!(err.to_string().starts_with("invalid component data"));
        assert!(!err.is_missing_id());
    }
}
