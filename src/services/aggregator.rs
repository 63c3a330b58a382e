//! Expense aggregation
//!
//! Totals are always derived from a fresh snapshot of the store. Nothing is
//! cached between calls, so every figure reflects the store at call time.

use std::collections::BTreeMap;

use crate::error::ExpenseResult;
use crate::models::{ExpenseCategory, ExpenseId, Money};
use crate::storage::ExpenseStore;

/// Derives totals from the expenses in a store
pub struct ExpenseAggregator<'a> {
    store: &'a dyn ExpenseStore,
}

impl<'a> ExpenseAggregator<'a> {
    pub fn new(store: &'a dyn ExpenseStore) -> Self {
        Self { store }
    }

    /// Total spent in `category`, optionally leaving out one expense
    pub fn spent_in_category(
        &self,
        category: ExpenseCategory,
        exclude_id: Option<&ExpenseId>,
    ) -> ExpenseResult<Money> {
        Ok(self
            .store
            .load_all()?
            .into_iter()
            .filter(|e| e.category == category && Some(&e.id) != exclude_id)
            .map(|e| e.amount)
            .sum())
    }

    /// Total spent across all categories
    pub fn total_spent(&self) -> ExpenseResult<Money> {
        Ok(self.store.load_all()?.into_iter().map(|e| e.amount).sum())
    }

    pub fn count_all(&self) -> ExpenseResult<usize> {
        self.store.count()
    }

    /// Spend per category; every category is present, zero if unused
    pub fn spent_by_category(&self) -> ExpenseResult<BTreeMap<ExpenseCategory, Money>> {
        let mut totals: BTreeMap<_, _> = ExpenseCategory::ALL
            .into_iter()
            .map(|c| (c, Money::zero()))
            .collect();

        for expense in self.store.load_all()? {
            *totals.entry(expense.category).or_default() += expense.amount;
        }

        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expense;
    use crate::storage::MemoryExpenseStore;
    use chrono::NaiveDate;

    fn expense(id: &str, cents: i64, category: ExpenseCategory) -> Expense {
        Expense::with_details(
            ExpenseId::from(id),
            "",
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
            category,
        )
    }

    fn store() -> MemoryExpenseStore {
        MemoryExpenseStore::with_expenses([
            expense("a", 1000, ExpenseCategory::Food),
            expense("b", 2500, ExpenseCategory::Food),
            expense("c", 400, ExpenseCategory::Transport),
        ])
    }

    #[test]
    fn test_spent_in_category() {
        let store = store();
        let aggregator = ExpenseAggregator::new(&store);

        assert_eq!(
            aggregator
                .spent_in_category(ExpenseCategory::Food, None)
                .unwrap(),
            Money::from_cents(3500)
        );
        assert_eq!(
            aggregator
                .spent_in_category(ExpenseCategory::Hygiene, None)
                .unwrap(),
            Money::zero()
        );
    }

    #[test]
    fn test_spent_in_category_excluding_one() {
        let store = store();
        let aggregator = ExpenseAggregator::new(&store);

        let excluded = ExpenseId::from("b");
        assert_eq!(
            aggregator
                .spent_in_category(ExpenseCategory::Food, Some(&excluded))
                .unwrap(),
            Money::from_cents(1000)
        );

        // Excluding an id from another category changes nothing
        let other = ExpenseId::from("c");
        assert_eq!(
            aggregator
                .spent_in_category(ExpenseCategory::Food, Some(&other))
                .unwrap(),
            Money::from_cents(3500)
        );
    }

    #[test]
    fn test_totals() {
        let store = store();
        let aggregator = ExpenseAggregator::new(&store);

        assert_eq!(aggregator.total_spent().unwrap(), Money::from_cents(3900));
        assert_eq!(aggregator.count_all().unwrap(), 3);
    }

    #[test]
    fn test_spent_by_category_has_every_category() {
        let store = store();
        let aggregator = ExpenseAggregator::new(&store);

        let totals = aggregator.spent_by_category().unwrap();
        assert_eq!(totals.len(), ExpenseCategory::ALL.len());
        assert_eq!(totals[&ExpenseCategory::Food], Money::from_cents(3500));
        assert_eq!(totals[&ExpenseCategory::Transport], Money::from_cents(400));
        assert_eq!(totals[&ExpenseCategory::Academic], Money::zero());
    }

    #[test]
    fn test_totals_follow_store_changes() {
        let store = store();
        let aggregator = ExpenseAggregator::new(&store);

        store.delete(&ExpenseId::from("a")).unwrap();
        assert_eq!(aggregator.total_spent().unwrap(), Money::from_cents(2900));
    }
}
