//! Storage layer for the expense tracker
//!
//! Provides the line-oriented expense file, atomic writes and the cached
//! expense store built on them.

pub mod expenses;
pub mod file_io;
pub mod line_format;
pub mod memory;

pub use expenses::{ExpenseStore, FileExpenseStore};
pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use memory::MemoryExpenseStore;

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Open the expense store at its standard location under `paths`
pub fn open_default_store(paths: &ExpensePaths) -> Result<FileExpenseStore, ExpenseError> {
    paths.ensure_directories()?;
    FileExpenseStore::open(paths.expenses_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_default_store() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = open_default_store(&paths).unwrap();

        assert!(temp_dir.path().join("data").join("expenses.txt").exists());
        assert_eq!(store.path(), paths.expenses_file());
    }
}
