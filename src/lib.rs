//! Expense Tracker - record daily expenses against a category budget
//!
//! This library provides the core of the `expense` command-line tool: a
//! cached, thread-safe expense store backed by a line-oriented file, totals
//! derived from it, and a budget guard that refuses expenses which would push
//! a category past its limit.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management and the saved user session
//! - `error`: Custom error types
//! - `models`: Core data models (money, categories, expenses, budgets)
//! - `storage`: Expense file format and the cached expense store
//! - `services`: Aggregation, budget checks and the expense service
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `expense` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{ExpensePaths, Session};
//! use expense_tracker::services::ExpenseService;
//! use expense_tracker::storage::open_default_store;
//!
//! let paths = ExpensePaths::new()?;
//! let session = Session::require(&paths)?;
//! let store = open_default_store(&paths)?;
//! let service = ExpenseService::new(&store, &session.budget);
//! println!("{}", service.summary()?.total_spent);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
