//! Expense display formatting
//!
//! Formats expenses, summaries and budget warnings for terminal output.

use crate::models::{Budget, Expense, ExpenseCategory};
use crate::services::{BudgetWarning, ExpenseSummary};

/// Format a single expense as a register row
pub fn format_expense_row(expense: &Expense) -> String {
    let name = if expense.name.is_empty() {
        "(unnamed)"
    } else {
        &expense.name
    };

    format!(
        "{:8} {} {:24} {:12} {:>12}",
        expense.id.short(),
        expense.date.format("%Y-%m-%d"),
        truncate(name, 24),
        expense.category,
        expense.amount
    )
}

/// Format a list of expenses as a register
pub fn format_expense_register(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:8} {:10} {:24} {:12} {:>12}\n",
        "ID", "Date", "Name", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense));
        output.push('\n');
    }

    output
}

/// Format the overall and per-category summary
pub fn format_summary(summary: &ExpenseSummary, budget: &Budget) -> String {
    let mut output = String::new();

    output.push_str(&format!("Total spent:        {}\n", summary.total_spent));
    output.push_str(&format!(
        "Overall budget:     limit {}  |  spent {}  |  left {}\n",
        summary.monthly_limit, summary.total_spent, summary.overall_remaining
    ));
    output.push_str(&format!("Number of expenses: {}\n", summary.expense_count));
    output.push('\n');

    output.push_str(&format!(
        "{:14} {:>12} {:>12} {:>12}\n",
        "Category", "Spent", "Limit", "Left"
    ));
    output.push_str(&"-".repeat(53));
    output.push('\n');

    for category in ExpenseCategory::ALL {
        let spent = summary
            .by_category
            .get(&category)
            .copied()
            .unwrap_or_default();
        let limit = budget.limit(category);
        output.push_str(&format!(
            "{:14} {:>12} {:>12} {:>12}\n",
            category.name(),
            spent,
            limit,
            (limit - spent).max_zero()
        ));
    }

    output
}

/// Format budget warnings, one per line
pub fn format_warnings(warnings: &[BudgetWarning]) -> String {
    if warnings.is_empty() {
        return "All categories are within budget.\n".to_string();
    }

    let mut output = String::new();
    for warning in warnings {
        output.push_str(&format!("⚠ {}\n", warning));
    }
    output
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
