//! # Error Types
//!
//! Domain-specific error types for caixa-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product code, amounts)
//! 3. Errors are enum variants, never String
//! 4. Every failure is a caller-input error raised synchronously; there are
//!    no transient faults in this crate and nothing to retry

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Sale Error
// =============================================================================

/// Sale state-machine and line-item admission failures.
///
/// `add_item` and `finalize` are all-or-nothing: when one of these errors is
/// returned the sale is exactly as it was before the call.
#[derive(Debug, Error)]
pub enum SaleError {
    /// Mutation attempted on a sale that has already been finalized.
    #[error("sale is already finalized")]
    SaleClosed,

    /// Line item carried a zero or negative quantity at admission.
    #[error("invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// Product unit price was zero or negative at admission.
    #[error("invalid unit price for product {code}")]
    InvalidPrice { code: i64 },

    /// Product description was empty at admission.
    #[error("product {code} has an empty description")]
    MissingDescription { code: i64 },

    /// A line item for the same product code is already part of the sale.
    #[error("product {code} is already part of this sale")]
    DuplicateProduct { code: i64 },

    /// Amount tendered at finalization does not cover the sale total.
    #[error("tendered R$ {tendered} does not cover the total R$ {total}")]
    InsufficientPayment { tendered: Money, total: Money },

    /// Operator id handed to finalization was zero or negative.
    #[error("invalid operator id: {operator}")]
    InvalidOperator { operator: i64 },

    /// Payment, change, operator, printer or receipt was read while the sale
    /// is still open. These facts only exist after finalization.
    #[error("sale has not been finalized")]
    NotFinalized,

    /// CCF or COO counter is zero or negative.
    #[error("the {counter} counter is required")]
    MissingCounter { counter: &'static str },

    /// Header or receipt rendering was requested with no line items.
    #[error("a sale needs at least one line item")]
    EmptySale,

    /// Required-field failure on the store or printer record.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-presence failures on the plain data records (store, address,
/// fiscal printer). Checked lazily, at the point the record is consumed.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A numeric field must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with SaleError.
pub type SaleResult<T> = Result<T, SaleError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = SaleError::InsufficientPayment {
            tendered: Money::from_cents(800),
            total: Money::from_cents(870),
        };
        assert_eq!(
            err.to_string(),
            "tendered R$ 8.00 does not cover the total R$ 8.70"
        );

        let err = SaleError::DuplicateProduct { code: 123456 };
        assert_eq!(err.to_string(), "product 123456 is already part of this sale");

        let err = SaleError::MissingCounter { counter: "CCF" };
        assert_eq!(err.to_string(), "the CCF counter is required");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: "printer model" };
        assert_eq!(err.to_string(), "printer model is required");

        let err = ValidationError::MustBePositive { field: "address number" };
        assert_eq!(err.to_string(), "address number must be positive");
    }

    #[test]
    fn test_validation_converts_to_sale_error() {
        let validation_err = ValidationError::Required { field: "store name" };
        let sale_err: SaleError = validation_err.into();
        assert!(matches!(sale_err, SaleError::Validation(_)));
        // transparent wrapping keeps the message verbatim
        assert_eq!(sale_err.to_string(), "store name is required");
    }
}
