//! Expense categories
//!
//! The set of categories is closed: every expense belongs to exactly one of
//! these six, and budgets may override the monthly limit per category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    Food,
    Academic,
    Transport,
    Recreational,
    Occasional,
    Hygiene,
}

impl ExpenseCategory {
    /// All categories, in display order
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Food,
        ExpenseCategory::Academic,
        ExpenseCategory::Transport,
        ExpenseCategory::Recreational,
        ExpenseCategory::Occasional,
        ExpenseCategory::Hygiene,
    ];

    /// The persisted name of this category
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Food => "FOOD",
            Self::Academic => "ACADEMIC",
            Self::Transport => "TRANSPORT",
            Self::Recreational => "RECREATIONAL",
            Self::Occasional => "OCCASIONAL",
            Self::Hygiene => "HYGIENE",
        }
    }

    /// Look up a category by its exact persisted name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Case-insensitive parse, for user input
impl FromStr for ExpenseCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Error returned when a string names no category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = ExpenseCategory::ALL.iter().map(|c| c.name()).collect();
        write!(
            f,
            "Unknown category '{}' (expected one of: {})",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for CategoryParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_exact() {
        assert_eq!(ExpenseCategory::from_name("FOOD"), Some(ExpenseCategory::Food));
        assert_eq!(ExpenseCategory::from_name("food"), None);
        assert_eq!(ExpenseCategory::from_name("GROCERIES"), None);
    }

    #[test]
    fn test_from_str_ignores_case() {
        assert_eq!(
            "hygiene".parse::<ExpenseCategory>().unwrap(),
            ExpenseCategory::Hygiene
        );
        assert_eq!(
            " Transport ".parse::<ExpenseCategory>().unwrap(),
            ExpenseCategory::Transport
        );
        assert!("rent".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for category in ExpenseCategory::ALL {
            assert_eq!(ExpenseCategory::from_name(category.name()), Some(category));
        }
    }

    #[test]
    fn test_serde_uses_persisted_name() {
        let json = serde_json::to_string(&ExpenseCategory::Recreational).unwrap();
        assert_eq!(json, "\"RECREATIONAL\"");
    }
}
