//! Custom error types for the expense tracker
//!
//! This module defines the error hierarchy for the library using thiserror.
//! Storage and budget failures are the two kinds callers are expected to
//! handle; the rest cover input validation and configuration.

use thiserror::Error;

use crate::models::{ExpenseCategory, Money};

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors outside the expense store
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The candidate expense would push its category over the limit
    #[error("Adding {amount} would exceed {category} budget (limit: {limit}, already spent: {spent})")]
    BudgetExceeded {
        category: ExpenseCategory,
        amount: Money,
        limit: Money,
        spent: Money,
    },

    /// Backing file unreadable/unwritable, directory uncreatable, lock poisoned
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ExpenseError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a budget rejection
    pub fn is_budget_exceeded(&self) -> bool {
        matches!(self, Self::BudgetExceeded { .. })
    }

    /// Check if this is a storage failure
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpenseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = ExpenseError::expense_not_found("abc123");
        assert_eq!(err.to_string(), "Expense not found: abc123");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_budget_exceeded_error() {
        let err = ExpenseError::BudgetExceeded {
            category: ExpenseCategory::Food,
            amount: Money::from_cents(6000),
            limit: Money::from_cents(20000),
            spent: Money::from_cents(15000),
        };
        assert_eq!(
            err.to_string(),
            "Adding $60.00 would exceed FOOD budget (limit: $200.00, already spent: $150.00)"
        );
        assert!(err.is_budget_exceeded());
        assert!(!err.is_storage());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExpenseError = io_err.into();
        assert!(matches!(err, ExpenseError::Io(_)));
    }
}
