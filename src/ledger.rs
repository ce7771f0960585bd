use chrono::NaiveDate;
use rust_decimal::prelude::*;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod query;
pub mod report;
pub mod store;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("unknown category '{0}', must be one of: Food, Transport, Entertainment, Bills, Other")]
    UnknownCategory(String),
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
    #[error("could not access expense file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not read or write expense record: {0}")]
    Csv(#[from] csv::Error),
}

/// Closed set of expense buckets. Stored records carry one of these,
/// never free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Bills,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Bills,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad so width specifiers work in table output
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "food" => Ok(Category::Food),
            "transport" => Ok(Category::Transport),
            "entertainment" => Ok(Category::Entertainment),
            "bills" => Ok(Category::Bills),
            "other" => Ok(Category::Other),
            _ => Err(LedgerError::UnknownCategory(s.trim().to_string())),
        }
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// One logged transaction. Field order matches the column order of the
/// backing file: date, amount, category, description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
}

impl Expense {
    /// Amount sign is checked here, at entry time only; loading the store
    /// back does not re-validate it.
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        category: Category,
        description: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(LedgerError::NegativeAmount(amount));
        }
        Ok(Expense {
            date,
            amount,
            category,
            description: description.into(),
        })
    }
}

#[cfg(test)]
use rust_decimal_macros::dec;

#[test]
fn category_parse_is_case_insensitive() {
    assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
    assert_eq!("FOOD".parse::<Category>().unwrap(), Category::Food);
    assert_eq!(" Bills ".parse::<Category>().unwrap(), Category::Bills);
}

#[test]
fn category_parse_rejects_unknown() {
    let err = "Gas".parse::<Category>().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Gas"));
    assert!(message.contains("Food"));
    assert!(message.contains("Other"));
}

#[test]
fn negative_amount_is_rejected() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let result = Expense::new(date, dec!(-5), Category::Food, "lunch");
    assert!(matches!(result, Err(LedgerError::NegativeAmount(_))));
}

#[test]
fn zero_amount_is_accepted() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let expense = Expense::new(date, dec!(0), Category::Other, "").unwrap();
    assert_eq!(expense.amount, dec!(0));
}
