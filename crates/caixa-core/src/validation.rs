//! # Validation Module
//!
//! Field-presence checks shared by the store and fiscal-printer records.
//!
//! Validation here is lazy by design: records are plain immutable data and
//! may be constructed incomplete; the checks run when the record is consumed
//! (descriptor rendering, sale finalization).

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejects an empty or whitespace-only required field.
pub fn require_field(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }

    Ok(())
}

/// Rejects a zero or negative required numeric field.
pub fn require_positive(field: &'static str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive { field });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_field() {
        assert!(require_field("store name", "Loja 1").is_ok());
        assert!(require_field("store name", "").is_err());
        assert!(require_field("store name", "   ").is_err());
    }

    #[test]
    fn test_require_field_names_the_field() {
        let err = require_field("printer serial", "").unwrap_err();
        assert_eq!(err.to_string(), "printer serial is required");
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("address number", 10).is_ok());
        assert!(require_positive("address number", 0).is_err());
        assert!(require_positive("address number", -1).is_err());
    }
}
