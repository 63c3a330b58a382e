//! User session
//!
//! The session holds who is tracking expenses and the budget they set up.
//! It is persisted as JSON next to the data directory and handed explicitly
//! to whatever needs the budget.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Budget;
use crate::storage::{read_json, write_json_atomic};

/// The current user and their budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    pub user_id: String,

    pub username: String,

    pub budget: Budget,
}

fn default_schema_version() -> u32 {
    1
}

impl Session {
    /// Start a new session for `username` with a fresh user id
    pub fn create(username: impl Into<String>, budget: Budget) -> ExpenseResult<Self> {
        let username = username.into().trim().to_string();
        if username.is_empty() {
            return Err(ExpenseError::Validation("Username cannot be empty".into()));
        }
        budget
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        Ok(Self {
            schema_version: default_schema_version(),
            user_id: Uuid::new_v4().to_string(),
            username,
            budget,
        })
    }

    /// Load the saved session, if there is one
    pub fn load(paths: &ExpensePaths) -> ExpenseResult<Option<Self>> {
        let session: Option<Session> = read_json(paths.session_file()).map_err(|e| {
            ExpenseError::Config(format!("Failed to load session: {}", e))
        })?;

        if let Some(session) = &session {
            session.budget.validate().map_err(|e| {
                ExpenseError::Config(format!("Saved session has an invalid budget: {}", e))
            })?;
        }

        Ok(session)
    }

    /// Load the saved session or fail with a hint to run `init`
    pub fn require(paths: &ExpensePaths) -> ExpenseResult<Self> {
        Self::load(paths)?.ok_or_else(|| {
            ExpenseError::Config("No session found. Run 'expense init' first.".into())
        })
    }

    /// Save the session to disk
    pub fn save(&self, paths: &ExpensePaths) -> ExpenseResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.session_file(), self)
    }

    /// Remove the saved session. A missing file is not an error.
    pub fn clear(paths: &ExpensePaths) -> ExpenseResult<()> {
        match std::fs::remove_file(paths.session_file()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
