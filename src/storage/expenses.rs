//! Expense repository backed by a line-oriented text file
//!
//! The file is read once, on first access, into an in-memory map which is
//! then the working set until the store is dropped. Every mutation rewrites
//! the whole file atomically, and the in-memory map only keeps the change
//! once that write has succeeded.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId};

use super::file_io::{ensure_file, read_bytes_or_empty, write_atomic};
use super::line_format::{decode_expense, encode_expense, LineParseError};

/// Durable collection of expenses, keyed by id
pub trait ExpenseStore: Send + Sync {
    /// Insert or replace an expense
    fn save(&self, expense: Expense) -> ExpenseResult<()>;

    /// Remove an expense. Returns whether anything was removed.
    fn delete(&self, id: &ExpenseId) -> ExpenseResult<bool>;

    /// Snapshot of all expenses, in no particular order
    fn load_all(&self) -> ExpenseResult<Vec<Expense>>;

    /// Number of expenses
    fn count(&self) -> ExpenseResult<usize> {
        Ok(self.load_all()?.len())
    }
}

#[derive(Debug, Default)]
struct Cache {
    loaded: bool,
    expenses: HashMap<ExpenseId, Expense>,
}

/// File-backed, cached, thread-safe expense store
pub struct FileExpenseStore {
    path: PathBuf,
    cache: RwLock<Cache>,
}

impl FileExpenseStore {
    /// Open a store at `path`, creating the file and its directory if absent.
    ///
    /// Nothing is read until the first operation.
    pub fn open(path: impl Into<PathBuf>) -> ExpenseResult<Self> {
        let path = path.into();
        ensure_file(&path)?;

        Ok(Self {
            path,
            cache: RwLock::new(Cache::default()),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_cache(&self) -> ExpenseResult<RwLockReadGuard<'_, Cache>> {
        self.cache
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_cache(&self) -> ExpenseResult<RwLockWriteGuard<'_, Cache>> {
        self.cache
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Populate the cache from disk unless that already happened.
    /// Must be called with the write lock held.
    fn ensure_loaded(&self, cache: &mut Cache) -> ExpenseResult<()> {
        if cache.loaded {
            return Ok(());
        }

        cache.expenses = self.read_file()?;
        cache.loaded = true;
        Ok(())
    }

    fn read_file(&self) -> ExpenseResult<HashMap<ExpenseId, Expense>> {
        let bytes = read_bytes_or_empty(&self.path)?;
        let mut expenses = HashMap::new();
        let mut skipped = 0usize;

        for (index, raw) in bytes.split(|b| *b == b'\n').enumerate() {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let parsed = std::str::from_utf8(raw)
                .map_err(|_| LineParseError::InvalidUtf8)
                .and_then(|line| {
                    if line.trim().is_empty() {
                        Ok(None)
                    } else {
                        decode_expense(line).map(Some)
                    }
                });

            match parsed {
                Ok(Some(expense)) => {
                    expenses.insert(expense.id.clone(), expense);
                }
                Ok(None) => {}
                Err(e) => {
                    skipped += 1;
                    warn!(
                        path = %self.path.display(),
                        line = index + 1,
                        error = %e,
                        "Skipping malformed expense line"
                    );
                }
            }
        }

        debug!(
            path = %self.path.display(),
            loaded = expenses.len(),
            skipped,
            "Loaded expense file"
        );
        Ok(expenses)
    }

    /// Rewrite the whole file from `expenses`
    fn persist(&self, expenses: &HashMap<ExpenseId, Expense>) -> ExpenseResult<()> {
        let mut sorted: Vec<_> = expenses.values().collect();
        sorted.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        let mut contents = String::new();
        for expense in sorted {
            contents.push_str(&encode_expense(expense));
            contents.push('\n');
        }

        write_atomic(&self.path, contents.as_bytes())?;
        debug!(path = %self.path.display(), count = expenses.len(), "Persisted expenses");
        Ok(())
    }
}

impl ExpenseStore for FileExpenseStore {
    fn save(&self, expense: Expense) -> ExpenseResult<()> {
        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let mut cache = self.write_cache()?;
        self.ensure_loaded(&mut cache)?;

        let id = expense.id.clone();
        let previous = cache.expenses.insert(id.clone(), expense);

        // Undo under the same write guard, so no reader sees the failed change
        if let Err(e) = self.persist(&cache.expenses) {
            match previous {
                Some(old) => cache.expenses.insert(id, old),
                None => cache.expenses.remove(&id),
            };
            return Err(e);
        }

        Ok(())
    }

    fn delete(&self, id: &ExpenseId) -> ExpenseResult<bool> {
        let mut cache = self.write_cache()?;
        self.ensure_loaded(&mut cache)?;

        let Some(removed) = cache.expenses.remove(id) else {
            return Ok(false);
        };

        if let Err(e) = self.persist(&cache.expenses) {
            cache.expenses.insert(id.clone(), removed);
            return Err(e);
        }

        Ok(true)
    }

    fn load_all(&self) -> ExpenseResult<Vec<Expense>> {
        {
            let cache = self.read_cache()?;
            if cache.loaded {
                return Ok(cache.expenses.values().cloned().collect());
            }
        }

        // First access: re-check under the exclusive lock, then read from it
        let mut cache = self.write_cache()?;
        self.ensure_loaded(&mut cache)?;
        Ok(cache.expenses.values().cloned().collect())
    }

    fn count(&self) -> ExpenseResult<usize> {
        {
            let cache = self.read_cache()?;
            if cache.loaded {
                return Ok(cache.expenses.len());
            }
        }

        let mut cache = self.write_cache()?;
        self.ensure_loaded(&mut cache)?;
        Ok(cache.expenses.len())
    }
}
