//! Expense CLI commands
//!
//! Bridges parsed arguments to the expense service and prints the results.

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::config::Session;
use crate::display::{format_expense_register, format_summary, format_warnings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseCategory, Money};
use crate::services::ExpenseService;
use crate::storage::ExpenseStore;

/// Arguments for `expense add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount (e.g., "12.50")
    #[arg(value_parser = parse_money)]
    pub amount: Money,

    /// Category (FOOD, ACADEMIC, TRANSPORT, RECREATIONAL, OCCASIONAL, HYGIENE)
    #[arg(short, long)]
    pub category: ExpenseCategory,

    /// Description
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Handle `expense add`
pub fn handle_add(store: &dyn ExpenseStore, session: &Session, args: AddArgs) -> ExpenseResult<()> {
    let date = match args.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => Local::now().date_naive(),
    };

    let expense = Expense::new(args.amount, date, args.category).named(args.name);
    expense
        .validate()
        .map_err(|e| ExpenseError::Validation(e.to_string()))?;

    let service = ExpenseService::new(store, &session.budget);
    let expense = service.add_expense(expense)?;

    println!("Added expense {}: {}", expense.id, expense);

    let warnings = service.budget_warnings()?;
    if !warnings.is_empty() {
        println!();
        print!("{}", format_warnings(&warnings));
    }

    Ok(())
}

/// Handle `expense list`
pub fn handle_list(store: &dyn ExpenseStore, session: &Session) -> ExpenseResult<()> {
    let service = ExpenseService::new(store, &session.budget);
    print!("{}", format_expense_register(&service.list_expenses()?));
    Ok(())
}

/// Handle `expense delete`
pub fn handle_delete(store: &dyn ExpenseStore, session: &Session, id: &str) -> ExpenseResult<()> {
    let service = ExpenseService::new(store, &session.budget);
    let expense = service
        .find_expense(id)?
        .ok_or_else(|| ExpenseError::expense_not_found(id))?;

    service.remove_expense(&expense.id)?;
    println!("Deleted expense {}: {}", expense.id, expense);
    Ok(())
}

/// Handle `expense summary`
pub fn handle_summary(store: &dyn ExpenseStore, session: &Session) -> ExpenseResult<()> {
    let service = ExpenseService::new(store, &session.budget);
    let summary = service.summary()?;

    println!("Expense summary for {}", session.username);
    println!();
    print!("{}", format_summary(&summary, &session.budget));
    Ok(())
}

/// Handle `expense warnings`
pub fn handle_warnings(store: &dyn ExpenseStore, session: &Session) -> ExpenseResult<()> {
    let service = ExpenseService::new(store, &session.budget);
    print!("{}", format_warnings(&service.budget_warnings()?));
    Ok(())
}

/// Parse a positive amount argument
pub fn parse_money(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
    })
}
