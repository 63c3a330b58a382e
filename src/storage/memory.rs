//! In-memory expense store
//!
//! Same contract as the file store without any persistence. Used where a
//! throwaway store is enough, mostly tests of the budget logic.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId};

use super::expenses::ExpenseStore;

#[derive(Debug, Default)]
pub struct MemoryExpenseStore {
    data: RwLock<HashMap<ExpenseId, Expense>>,
}

impl MemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-filled with `expenses`
    pub fn with_expenses(expenses: impl IntoIterator<Item = Expense>) -> Self {
        let data = expenses.into_iter().map(|e| (e.id.clone(), e)).collect();
        Self {
            data: RwLock::new(data),
        }
    }
}

impl ExpenseStore for MemoryExpenseStore {
    fn save(&self, expense: Expense) -> ExpenseResult<()> {
        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(expense.id.clone(), expense);
        Ok(())
    }

    fn delete(&self, id: &ExpenseId) -> ExpenseResult<bool> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        Ok(data.remove(id).is_some())
    }

    fn load_all(&self) -> ExpenseResult<Vec<Expense>> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.values().cloned().collect())
    }
}
