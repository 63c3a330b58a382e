//! Budget guard
//!
//! Admission control for new expenses plus the low-balance report. Both are
//! evaluated against the store's current contents on every call.

use std::fmt;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, Expense, ExpenseCategory, Money};
use crate::storage::ExpenseStore;

use super::aggregator::ExpenseAggregator;

/// A category warns once this share of its limit has been spent
pub const WARNING_THRESHOLD_PERCENT: i64 = 80;

/// A category that has used up most of its limit
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetWarning {
    pub category: ExpenseCategory,
    pub percent_used: f64,
    pub spent: Money,
    pub limit: Money,
}

impl fmt::Display for BudgetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Only {}% left: {} budget ({:.0}% used, {} of {}).",
            100 - WARNING_THRESHOLD_PERCENT,
            self.category,
            self.percent_used,
            self.spent,
            self.limit
        )
    }
}

/// Checks expenses against a budget before they are stored
pub struct BudgetGuard<'a> {
    budget: &'a Budget,
    aggregator: ExpenseAggregator<'a>,
}

impl<'a> BudgetGuard<'a> {
    pub fn new(budget: &'a Budget, store: &'a dyn ExpenseStore) -> Self {
        Self {
            budget,
            aggregator: ExpenseAggregator::new(store),
        }
    }

    pub fn aggregator(&self) -> &ExpenseAggregator<'a> {
        &self.aggregator
    }

    pub fn monthly_limit(&self) -> Money {
        self.budget.monthly_limit()
    }

    pub fn limit(&self, category: ExpenseCategory) -> Money {
        self.budget.limit(category)
    }

    /// Fail with `BudgetExceeded` if `expense` would push its category over
    /// the limit. Reaching the limit exactly is allowed.
    ///
    /// An expense already stored under the same id is left out of the
    /// current spend, so replacing an expense is checked against its new
    /// amount only.
    pub fn check_limit(&self, expense: &Expense) -> ExpenseResult<()> {
        let limit = self.budget.limit(expense.category);
        let spent = self
            .aggregator
            .spent_in_category(expense.category, Some(&expense.id))?;

        if exceeds_limit(spent, expense.amount, limit) {
            return Err(ExpenseError::BudgetExceeded {
                category: expense.category,
                amount: expense.amount,
                limit,
                spent,
            });
        }

        Ok(())
    }

    /// Share of the category limit still available, in `0.0..=100.0`
    pub fn remaining_percent(&self, category: ExpenseCategory) -> ExpenseResult<f64> {
        let limit = self.budget.limit(category);
        if !limit.is_positive() {
            return Ok(100.0);
        }

        let spent = self.aggregator.spent_in_category(category, None)?;
        let remaining = (limit - spent).as_f64() * 100.0 / limit.as_f64();
        Ok(remaining.max(0.0))
    }

    /// Overall limit minus everything spent, floored at zero
    pub fn overall_remaining(&self) -> ExpenseResult<Money> {
        let spent = self.aggregator.total_spent()?;
        Ok((self.budget.monthly_limit() - spent).max_zero())
    }

    /// One warning per category at or above the threshold
    pub fn budget_warnings(&self) -> ExpenseResult<Vec<BudgetWarning>> {
        let spent_by_category = self.aggregator.spent_by_category()?;

        let warnings = spent_by_category
            .into_iter()
            .filter_map(|(category, spent)| {
                let limit = self.budget.limit(category);
                if !limit.is_positive() || !reaches_threshold(spent, limit) {
                    return None;
                }
                Some(BudgetWarning {
                    category,
                    percent_used: spent.as_f64() * 100.0 / limit.as_f64(),
                    spent,
                    limit,
                })
            })
            .collect();

        Ok(warnings)
    }
}

/// `spent + amount > limit`, compared in `i128` so huge amounts cannot wrap
fn exceeds_limit(spent: Money, amount: Money, limit: Money) -> bool {
    i128::from(spent.cents()) + i128::from(amount.cents()) > i128::from(limit.cents())
}

/// `spent >= limit * threshold`, compared exactly in cents
fn reaches_threshold(spent: Money, limit: Money) -> bool {
    i128::from(spent.cents()) * 100
        >= i128::from(limit.cents()) * i128::from(WARNING_THRESHOLD_PERCENT)
}
