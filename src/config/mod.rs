//! Configuration module for the expense tracker
//!
//! This module provides:
//! - XDG-compliant path resolution
//! - The persisted user session (username and budget)

pub mod paths;
pub mod session;

pub use paths::ExpensePaths;
pub use session::Session;
