//! Budget model
//!
//! A budget is an overall monthly ceiling plus optional per-category
//! overrides. Categories without an override fall back to the monthly limit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::category::ExpenseCategory;
use super::money::Money;

/// Spending limits for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Overall ceiling, also the fallback for categories without a limit
    monthly_limit: Money,

    /// Per-category overrides
    #[serde(default)]
    category_limits: BTreeMap<ExpenseCategory, Money>,
}

impl Budget {
    /// Create a budget with only an overall limit
    pub fn new(monthly_limit: Money) -> Self {
        Self {
            monthly_limit,
            category_limits: BTreeMap::new(),
        }
    }

    /// Return a copy of this budget with a limit set for `category`
    pub fn with_category_limit(mut self, category: ExpenseCategory, limit: Money) -> Self {
        self.category_limits.insert(category, limit);
        self
    }

    pub fn monthly_limit(&self) -> Money {
        self.monthly_limit
    }

    /// Limit that applies to `category`
    pub fn limit(&self, category: ExpenseCategory) -> Money {
        self.category_limits
            .get(&category)
            .copied()
            .unwrap_or(self.monthly_limit)
    }

    /// Explicit per-category overrides
    pub fn category_limits(&self) -> &BTreeMap<ExpenseCategory, Money> {
        &self.category_limits
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.monthly_limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveMonthlyLimit(
                self.monthly_limit,
            ));
        }

        if let Some((category, limit)) = self
            .category_limits
            .iter()
            .find(|(_, limit)| limit.is_negative())
        {
            return Err(BudgetValidationError::NegativeCategoryLimit {
                category: *category,
                limit: *limit,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "monthly limit {}", self.monthly_limit)?;
        for (category, limit) in &self.category_limits {
            write!(f, ", {} {}", category, limit)?;
        }
        Ok(())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveMonthlyLimit(Money),
    NegativeCategoryLimit {
        category: ExpenseCategory,
        limit: Money,
    },
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMonthlyLimit(limit) => {
                write!(f, "Monthly limit must be positive, got {}", limit)
            }
            Self::NegativeCategoryLimit { category, limit } => {
                write!(f, "Limit for {} cannot be negative, got {}", category, limit)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_falls_back_to_monthly() {
        let budget = Budget::new(Money::from_cents(100_000))
            .with_category_limit(ExpenseCategory::Food, Money::from_cents(20_000));

        assert_eq!(budget.limit(ExpenseCategory::Food), Money::from_cents(20_000));
        assert_eq!(
            budget.limit(ExpenseCategory::Hygiene),
            Money::from_cents(100_000)
        );
        assert_eq!(budget.monthly_limit(), Money::from_cents(100_000));
    }

    #[test]
    fn test_validate() {
        assert!(Budget::new(Money::from_cents(1)).validate().is_ok());
        assert_eq!(
            Budget::new(Money::zero()).validate(),
            Err(BudgetValidationError::NonPositiveMonthlyLimit(Money::zero()))
        );

        let negative = Budget::new(Money::from_cents(100))
            .with_category_limit(ExpenseCategory::Transport, Money::from_cents(-5));
        assert!(matches!(
            negative.validate(),
            Err(BudgetValidationError::NegativeCategoryLimit { .. })
        ));

        // A zero category limit is allowed: that category admits nothing
        let zero = Budget::new(Money::from_cents(100))
            .with_category_limit(ExpenseCategory::Transport, Money::zero());
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let budget = Budget::new(Money::from_cents(100_000))
            .with_category_limit(ExpenseCategory::Food, Money::from_cents(20_000));
        let json = serde_json::to_string(&budget).unwrap();
        assert!(json.contains("\"FOOD\":20000"));

        let back: Budget = serde_json::from_str(&json).unwrap();
        assert_eq!(back, budget);
    }
}
