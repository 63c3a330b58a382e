//! Business logic layer
//!
//! Aggregation, budget admission control and the expense service that ties
//! them to the store.

pub mod aggregator;
pub mod expense;
pub mod guard;

pub use aggregator::ExpenseAggregator;
pub use expense::{ExpenseService, ExpenseSummary};
pub use guard::{BudgetGuard, BudgetWarning, WARNING_THRESHOLD_PERCENT};
