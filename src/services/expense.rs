//! Expense service
//!
//! Entry point for callers that add, remove and review expenses. Every
//! addition passes the budget guard before it reaches the store.

use std::collections::BTreeMap;

use tracing::info;

use crate::error::ExpenseResult;
use crate::models::{Budget, Expense, ExpenseCategory, ExpenseId, Money};
use crate::storage::ExpenseStore;

use super::guard::{BudgetGuard, BudgetWarning};

/// Totals across all stored expenses
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    pub total_spent: Money,
    pub by_category: BTreeMap<ExpenseCategory, Money>,
    pub expense_count: usize,
    pub monthly_limit: Money,
    pub overall_remaining: Money,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    store: &'a dyn ExpenseStore,
    guard: BudgetGuard<'a>,
}

impl<'a> ExpenseService<'a> {
    pub fn new(store: &'a dyn ExpenseStore, budget: &'a Budget) -> Self {
        Self {
            store,
            guard: BudgetGuard::new(budget, store),
        }
    }

    pub fn guard(&self) -> &BudgetGuard<'a> {
        &self.guard
    }

    /// Admit and store an expense. Nothing is written if the budget check
    /// fails.
    pub fn add_expense(&self, expense: Expense) -> ExpenseResult<Expense> {
        if let Err(e) = self.guard.check_limit(&expense) {
            info!(id = %expense.id, category = %expense.category, amount = %expense.amount, "Expense rejected: {}", e);
            return Err(e);
        }

        self.store.save(expense.clone())?;
        info!(id = %expense.id, category = %expense.category, amount = %expense.amount, "Expense added");
        Ok(expense)
    }

    /// Remove an expense by id. Returns whether it existed.
    pub fn remove_expense(&self, id: &ExpenseId) -> ExpenseResult<bool> {
        let removed = self.store.delete(id)?;
        if removed {
            info!(id = %id, "Expense removed");
        }
        Ok(removed)
    }

    /// All expenses, newest first
    pub fn list_expenses(&self) -> ExpenseResult<Vec<Expense>> {
        let mut expenses = self.store.load_all()?;
        expenses.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(expenses)
    }

    /// Find a stored expense by full id or unique id prefix
    pub fn find_expense(&self, id_or_prefix: &str) -> ExpenseResult<Option<Expense>> {
        let expenses = self.store.load_all()?;

        if let Some(exact) = expenses.iter().find(|e| e.id.as_str() == id_or_prefix) {
            return Ok(Some(exact.clone()));
        }

        let mut matches = expenses
            .into_iter()
            .filter(|e| !id_or_prefix.is_empty() && e.id.as_str().starts_with(id_or_prefix));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Ok(Some(only)),
            _ => Ok(None),
        }
    }

    pub fn summary(&self) -> ExpenseResult<ExpenseSummary> {
        let aggregator = self.guard.aggregator();
        let by_category = aggregator.spent_by_category()?;
        let total_spent: Money = by_category.values().copied().sum();
        let monthly_limit = self.guard.monthly_limit();

        Ok(ExpenseSummary {
            total_spent,
            by_category,
            expense_count: aggregator.count_all()?,
            monthly_limit,
            overall_remaining: (monthly_limit - total_spent).max_zero(),
        })
    }

    pub fn budget_warnings(&self) -> ExpenseResult<Vec<BudgetWarning>> {
        self.guard.budget_warnings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileExpenseStore, MemoryExpenseStore};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    fn budget() -> Budget {
        Budget::new(Money::from_cents(100_000))
            .with_category_limit(ExpenseCategory::Food, Money::from_cents(20_000))
    }

    #[test]
    fn test_budget_example() {
        let budget = budget();
        let store = MemoryExpenseStore::new();
        let service = ExpenseService::new(&store, &budget);

        service
            .add_expense(Expense::new(
                Money::from_cents(15_000),
                date(1),
                ExpenseCategory::Food,
            ))
            .unwrap();

        let guard = service.guard();
        assert_eq!(
            guard
                .aggregator()
                .spent_in_category(ExpenseCategory::Food, None)
                .unwrap(),
            Money::from_cents(15_000)
        );
        assert_eq!(guard.remaining_percent(ExpenseCategory::Food).unwrap(), 25.0);

        let err = service
            .add_expense(Expense::new(
                Money::from_cents(6_000),
                date(2),
                ExpenseCategory::Food,
            ))
            .unwrap_err();
        assert!(err.is_budget_exceeded());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_rejected_expense_never_reaches_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.txt");
        let store = FileExpenseStore::open(&path).unwrap();
        let budget = budget();
        let service = ExpenseService::new(&store, &budget);

        let result = service.add_expense(Expense::new(
            Money::from_cents(20_001),
            date(1),
            ExpenseCategory::Food,
        ));
        assert!(result.unwrap_err().is_budget_exceeded());
        assert!(std::fs::read_to_string(&path).unwrap().is_empty());
    }

    #[test]
    fn test_remove_expense() {
        let budget = budget();
        let store = MemoryExpenseStore::new();
        let service = ExpenseService::new(&store, &budget);

        let added = service
            .add_expense(Expense::new(
                Money::from_cents(500),
                date(3),
                ExpenseCategory::Hygiene,
            ))
            .unwrap();

        assert!(service.remove_expense(&added.id).unwrap());
        assert!(!service.remove_expense(&added.id).unwrap());
        assert!(service.list_expenses().unwrap().is_empty());
    }

    #[test]
    fn test_list_expenses_newest_first() {
        let budget = budget();
        let store = MemoryExpenseStore::new();
        let service = ExpenseService::new(&store, &budget);

        for day in [3, 1, 2] {
            service
                .add_expense(
                    Expense::new(Money::from_cents(100), date(day), ExpenseCategory::Academic)
                        .named(format!("day {}", day)),
                )
                .unwrap();
        }

        let names: Vec<_> = service
            .list_expenses()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["day 3", "day 2", "day 1"]);
    }

    #[test]
    fn test_find_expense_by_prefix() {
        let budget = budget();
        let store = MemoryExpenseStore::with_expenses([
            Expense::with_details(
                ExpenseId::from("abc123"),
                "",
                Money::from_cents(100),
                date(1),
                ExpenseCategory::Food,
            ),
            Expense::with_details(
                ExpenseId::from("abd456"),
                "",
                Money::from_cents(100),
                date(1),
                ExpenseCategory::Food,
            ),
        ]);
        let service = ExpenseService::new(&store, &budget);

        assert_eq!(
            service.find_expense("abc").unwrap().unwrap().id,
            ExpenseId::from("abc123")
        );
        assert!(service.find_expense("ab").unwrap().is_none());
        assert!(service.find_expense("").unwrap().is_none());
        assert!(service.find_expense("zzz").unwrap().is_none());
    }

    #[test]
    fn test_summary() {
        let budget = budget();
        let store = MemoryExpenseStore::new();
        let service = ExpenseService::new(&store, &budget);

        service
            .add_expense(Expense::new(
                Money::from_cents(15_000),
                date(1),
                ExpenseCategory::Food,
            ))
            .unwrap();
        service
            .add_expense(Expense::new(
                Money::from_cents(2_500),
                date(1),
                ExpenseCategory::Transport,
            ))
            .unwrap();

        let summary = service.summary().unwrap();
        assert_eq!(summary.total_spent, Money::from_cents(17_500));
        assert_eq!(summary.expense_count, 2);
        assert_eq!(summary.monthly_limit, Money::from_cents(100_000));
        assert_eq!(summary.overall_remaining, Money::from_cents(82_500));
        assert_eq!(
            summary.by_category[&ExpenseCategory::Transport],
            Money::from_cents(2_500)
        );
        assert_eq!(summary.by_category[&ExpenseCategory::Hygiene], Money::zero());
    }
}
