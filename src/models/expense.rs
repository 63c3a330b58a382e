//! Expense model
//!
//! An expense is an immutable record created once at add-time and removed
//! only by an explicit delete. Replacing an expense means saving a new value
//! under the same id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::ExpenseId;
use super::money::Money;

/// A single expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Free-text description, may be empty
    #[serde(default)]
    pub name: String,

    /// Amount spent (always positive)
    pub amount: Money,

    /// Day of the expense
    pub date: NaiveDate,

    pub category: ExpenseCategory,
}

impl Expense {
    /// Create a new expense with a fresh id and no name
    pub fn new(amount: Money, date: NaiveDate, category: ExpenseCategory) -> Self {
        Self {
            id: ExpenseId::new(),
            name: String::new(),
            amount,
            date,
            category,
        }
    }

    /// Create an expense with every field supplied by the caller
    pub fn with_details(
        id: ExpenseId,
        name: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category: ExpenseCategory,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
            date,
            category,
        }
    }

    /// Set the name, builder style
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.id.as_str().is_empty() {
            return Err(ExpenseValidationError::EmptyId);
        }
        if has_line_break(self.id.as_str()) {
            return Err(ExpenseValidationError::LineBreakInId);
        }
        if has_line_break(&self.name) {
            return Err(ExpenseValidationError::LineBreakInName);
        }
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "(unnamed)"
        } else {
            &self.name
        };
        write!(
            f,
            "{} {} {} [{}]",
            self.date.format("%Y-%m-%d"),
            name,
            self.amount,
            self.category
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyId,
    LineBreakInId,
    LineBreakInName,
    NonPositiveAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Expense id cannot be empty"),
            Self::LineBreakInId => write!(f, "Expense id cannot contain line breaks"),
            Self::LineBreakInName => write!(f, "Expense name cannot contain line breaks"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
