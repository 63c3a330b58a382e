//! Session CLI commands
//!
//! `init` sets up the user and budget, `reset` forgets them again, and
//! `config` reports where things live.

use clap::Args;

use super::expense::parse_money;
use crate::config::{ExpensePaths, Session};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, ExpenseCategory, Money};

/// Arguments for `expense init`
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Name of the person tracking expenses
    #[arg(short, long)]
    pub username: String,

    /// Monthly limit, used for every category without its own limit
    #[arg(short, long, value_parser = parse_money)]
    pub monthly_limit: Money,

    /// Per-category limit, e.g. "FOOD=200" (repeatable)
    #[arg(short, long = "limit", value_parser = parse_category_limit)]
    pub limits: Vec<(ExpenseCategory, Money)>,

    /// Replace an existing session
    #[arg(short, long)]
    pub force: bool,
}

/// Handle `expense init`
pub fn handle_init(paths: &ExpensePaths, args: InitArgs) -> ExpenseResult<()> {
    if paths.is_initialized() && !args.force {
        return Err(ExpenseError::Config(format!(
            "A session already exists at {}. Use --force to replace it.",
            paths.session_file().display()
        )));
    }

    let budget = args
        .limits
        .into_iter()
        .fold(Budget::new(args.monthly_limit), |budget, (category, limit)| {
            budget.with_category_limit(category, limit)
        });

    let session = Session::create(args.username, budget)?;
    paths.ensure_directories()?;
    session.save(paths)?;

    println!("Initialized expense tracker for {}", session.username);
    println!("  Monthly limit: {}", session.budget.monthly_limit());
    for (category, limit) in session.budget.category_limits() {
        println!("  {:14} {}", category.name(), limit);
    }
    println!();
    println!("Data directory: {}", paths.data_dir().display());

    Ok(())
}

/// Handle `expense config`
pub fn handle_config(paths: &ExpensePaths) -> ExpenseResult<()> {
    println!("Expense Tracker Configuration");
    println!("=============================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Expense file:   {}", paths.expenses_file().display());
    println!("Session file:   {}", paths.session_file().display());
    println!();

    match Session::load(paths)? {
        Some(session) => {
            println!("User:          {} ({})", session.username, session.user_id);
            println!("Monthly limit: {}", session.budget.monthly_limit());
            for category in ExpenseCategory::ALL {
                println!("  {:14} {}", category.name(), session.budget.limit(category));
            }
        }
        None => println!("No session. Run 'expense init' to get started."),
    }

    Ok(())
}

/// Handle `expense reset`. Recorded expenses are kept.
pub fn handle_reset(paths: &ExpensePaths) -> ExpenseResult<()> {
    if !paths.is_initialized() {
        println!("No session to reset.");
        return Ok(());
    }

    Session::clear(paths)?;
    println!("Session removed. Run 'expense init' to set up a new budget.");
    Ok(())
}

/// Parse a `CATEGORY=AMOUNT` pair
pub fn parse_category_limit(s: &str) -> Result<(ExpenseCategory, Money), String> {
    let (category, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected CATEGORY=AMOUNT, got '{}'", s))?;

    let category: ExpenseCategory = category.parse().map_err(|e| format!("{}", e))?;
    let amount = parse_money(amount)?;

    Ok((category, amount))
}
