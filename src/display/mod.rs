//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, summaries and warnings for
//! terminal display.

pub mod expense;

pub use expense::{format_expense_register, format_expense_row, format_summary, format_warnings};
