//! Validation errors for user-entered records.
//!
//! A validation failure rejects the whole action; nothing is partially
//! written. Missing prices or materials are never errors, they degrade to
//! fallback values instead.

use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons an input record is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Customer name is empty or whitespace.
    #[error("customer name cannot be empty")]
    EmptyCustomerName,

    /// Expense item description is empty or whitespace.
    #[error("expense item cannot be empty")]
    EmptyItem,

    /// Material name is empty or whitespace.
    #[error("material name cannot be empty")]
    EmptyMaterialName,

    /// Every packet quantity in the selection is zero.
    #[error("order must contain at least one packet")]
    EmptyOrder,

    /// An amount that must be strictly positive is zero or negative.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    /// A price that must be non-negative is negative.
    #[error("price cannot be negative, got {0}")]
    NegativePrice(Decimal),

    /// A stock addition that must be strictly positive is zero or negative.
    #[error("stock to add must be greater than zero, got {0}")]
    NonPositiveStock(Decimal),

    /// Opening stock of a new material is negative.
    #[error("opening stock cannot be negative, got {0}")]
    NegativeStock(Decimal),

    /// A production batch with no flour in it.
    #[error("batch size must be greater than zero, got {0} kg")]
    NonPositiveBatch(Decimal),
}

/// Trim a required free-text field, failing with `err` when nothing is left.
pub(crate) fn require_text(value: &str, err: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(err)
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Require a strictly positive amount.
pub(crate) fn require_positive(amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount > Decimal::ZERO {
        Ok(amount)
    } else {
        Err(ValidationError::NonPositiveAmount(amount))
    }
}

/// Drop empty optional text so `Some("  ")` is stored as `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_trims() {
        assert_eq!(
            require_text("  Asha ", ValidationError::EmptyCustomerName),
            Ok("Asha".to_owned())
        );
        assert_eq!(
            require_text("   ", ValidationError::EmptyCustomerName),
            Err(ValidationError::EmptyCustomerName)
        );
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive(Decimal::ONE).is_ok());
        assert_eq!(
            require_positive(Decimal::ZERO),
            Err(ValidationError::NonPositiveAmount(Decimal::ZERO))
        );
        assert!(require_positive(Decimal::NEGATIVE_ONE).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(Some(" note ")), Some("note".to_owned()));
        assert_eq!(optional_text(None), None);
    }
}
