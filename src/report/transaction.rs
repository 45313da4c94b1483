use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::{ReportError, Result};
use crate::money::parse_amount;

/// Direction of a transaction; decides its sign in every total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum TransactionKind {
    #[serde(rename = "Gelir", alias = "Income")]
    Income,
    #[serde(rename = "Gider", alias = "Expense")]
    Expense,
}

impl TransactionKind {
    /// Parse a CLI value (`gelir`, `gider`, `income`, `expense`).
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "gelir" | "income" => Ok(TransactionKind::Income),
            "gider" | "expense" => Ok(TransactionKind::Expense),
            _ => Err(ReportError::InvalidKind(value.to_string())),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "Gelir"),
            TransactionKind::Expense => write!(f, "Gider"),
        }
    }
}

/// A financial transaction as supplied by the data store.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub linked_document_id: Option<String>,
}

impl Transaction {
    /// The parsed amount, or zero when the stored string is not a number.
    pub fn amount_value(&self) -> Decimal {
        match parse_amount(&self.amount) {
            Some(value) => value,
            None => {
                warn!(id = %self.id, amount = %self.amount, "unparsable amount treated as zero");
                Decimal::ZERO
            }
        }
    }

    /// `+amount` for income, `-amount` for expense.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount_value(),
            TransactionKind::Expense => -self.amount_value(),
        }
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Description length in characters; a missing description counts as empty.
    pub fn description_len(&self) -> usize {
        self.description_text().chars().count()
    }

    pub fn has_linked_document(&self) -> bool {
        self.linked_document_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let day = self.date.get(..10).unwrap_or(self.date.as_str());
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    /// Date as printed on the report (`DD.MM.YYYY`), or the raw value if it is not ISO.
    pub fn display_date(&self) -> String {
        match self.parsed_date() {
            Some(date) => date.format("%d.%m.%Y").to_string(),
            None => self.date.clone(),
        }
    }
}

/// Load an ordered JSON array of transactions.
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    if !path.exists() {
        return Err(ReportError::TransactionFileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ReportError::TransactionParse {
        path: path.to_path_buf(),
        source: e,
    })
}
