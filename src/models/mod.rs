//! Core data models for the expense tracker
//!
//! Expenses, their categories, budgets, and the Money type used for every
//! amount.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use budget::{Budget, BudgetValidationError};
pub use category::{CategoryParseError, ExpenseCategory};
pub use expense::{Expense, ExpenseValidationError};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
