//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod session;

pub use expense::{
    handle_add, handle_delete, handle_list, handle_summary, handle_warnings, AddArgs,
};
pub use session::{handle_config, handle_init, handle_reset, InitArgs};
