//! Line-oriented expense file format
//!
//! One record per line: `id|name|amount|date|category`. Backslash and `|`
//! inside text fields are backslash-escaped. Decoding is a single pass that
//! splits on unescaped separators and unescapes at the same time.

use std::fmt;

use chrono::NaiveDate;

use crate::models::{Expense, ExpenseCategory, ExpenseId, Money};

pub const FIELD_SEPARATOR: char = '|';
const ESCAPE: char = '\\';
const FIELD_COUNT: usize = 5;
const DATE_FORMAT: &str = "%Y-%m-%d";
// Anything larger cannot fit in i64 cents anyway
const MAX_EXPONENT: i32 = 20;

/// Escape a text field for writing
pub fn escape_field(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == ESCAPE || c == FIELD_SEPARATOR {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Split a line on unescaped separators, unescaping each field.
///
/// `\|` and `\\` collapse to the escaped character. A backslash before any
/// other character, or at the end of the line, is kept literally.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut current = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.peek() {
                Some(&next) if next == ESCAPE || next == FIELD_SEPARATOR => {
                    current.push(next);
                    chars.next();
                }
                _ => current.push(ESCAPE),
            },
            FIELD_SEPARATOR => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

/// Serialize an expense to a single line (no trailing newline)
pub fn encode_expense(expense: &Expense) -> String {
    format!(
        "{id}{sep}{name}{sep}{amount}{sep}{date}{sep}{category}",
        id = escape_field(expense.id.as_str()),
        name = escape_field(&expense.name),
        amount = expense.amount.to_plain_string(),
        date = expense.date.format(DATE_FORMAT),
        category = expense.category.name(),
        sep = FIELD_SEPARATOR,
    )
}

/// Parse a single line into an expense
pub fn decode_expense(line: &str) -> Result<Expense, LineParseError> {
    let fields = split_fields(line);
    let [id, name, amount, date, category]: [String; FIELD_COUNT] = fields
        .try_into()
        .map_err(|fields: Vec<String>| LineParseError::FieldCount(fields.len()))?;

    if id.is_empty() {
        return Err(LineParseError::EmptyId);
    }

    let amount = parse_amount(&amount).ok_or_else(|| LineParseError::Amount(amount.clone()))?;
    if !amount.is_positive() {
        return Err(LineParseError::NonPositiveAmount(amount));
    }

    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| LineParseError::Date(date.clone()))?;

    let category = ExpenseCategory::from_name(category.trim())
        .ok_or_else(|| LineParseError::Category(category.clone()))?;

    Ok(Expense::with_details(
        ExpenseId::from(id),
        name,
        amount,
        date,
        category,
    ))
}

/// Parse a stored amount. Besides plain decimals this accepts the
/// `1.0E7` exponent form that older files carry for large amounts.
fn parse_amount(s: &str) -> Option<Money> {
    let s = s.trim();
    match s.split_once(['E', 'e']) {
        None => Money::parse(s).ok(),
        Some((mantissa, exponent)) => Money::parse(&expand_exponent(mantissa, exponent)?).ok(),
    }
}

/// `1.25`, `7` -> `12500000`; `1.5`, `-2` -> `0.015`
fn expand_exponent(mantissa: &str, exponent: &str) -> Option<String> {
    let exponent: i32 = exponent.parse().ok()?;
    if exponent.abs() > MAX_EXPONENT {
        return None;
    }

    let (sign, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() || !is_digits(int_part) || !is_digits(frac_part) {
        return None;
    }

    let digits = format!("{}{}", int_part, frac_part);
    // Position of the decimal point within `digits`
    let point = int_part.len() as i32 + exponent;

    let plain = if point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else if point as usize >= digits.len() {
        format!("{}{}", digits, "0".repeat(point as usize - digits.len()))
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{}.{}", whole, fraction)
    };

    Some(format!("{}{}", sign, plain))
}

/// Why a persisted line was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineParseError {
    FieldCount(usize),
    EmptyId,
    Amount(String),
    NonPositiveAmount(Money),
    Date(String),
    Category(String),
    InvalidUtf8,
}

impl fmt::Display for LineParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount(n) => write!(f, "expected {} fields, found {}", FIELD_COUNT, n),
            Self::EmptyId => write!(f, "empty id"),
            Self::Amount(s) => write!(f, "invalid amount '{}'", s),
            Self::NonPositiveAmount(m) => write!(f, "amount must be positive, got {}", m),
            Self::Date(s) => write!(f, "invalid date '{}'", s),
            Self::Category(s) => write!(f, "unknown category '{}'", s),
            Self::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
        }
    }
}

impl std::error::Error for LineParseError {}
