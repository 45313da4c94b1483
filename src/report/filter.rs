use chrono::NaiveDate;
use tracing::warn;

use super::transaction::{Transaction, TransactionKind};
use crate::error::{ReportError, Result};

/// Selection applied to the transaction list before it is paginated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub project: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
}

impl TransactionFilter {
    /// Build a filter from raw CLI values.
    pub fn from_args(
        project: Option<String>,
        from: Option<&str>,
        to: Option<&str>,
        kind: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            project,
            from: from.map(parse_date).transpose()?,
            to: to.map(parse_date).transpose()?,
            kind: kind.map(TransactionKind::parse).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.project.is_none() && self.from.is_none() && self.to.is_none() && self.kind.is_none()
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(project) = &self.project {
            if fold_case(&tx.project_name) != fold_case(project) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if tx.kind != kind {
                return false;
            }
        }
        if self.from.is_none() && self.to.is_none() {
            return true;
        }

        let Some(date) = tx.parsed_date() else {
            warn!(id = %tx.id, date = %tx.date, "transaction with invalid date excluded");
            return false;
        };
        self.from.map_or(true, |d| date >= d) && self.to.map_or(true, |d| date <= d)
    }

    /// Matching transactions in their original order.
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|tx| self.matches(tx))
            .cloned()
            .collect()
    }

    /// Banner text describing the active filters, `None` when nothing is filtered.
    pub fn describe(&self) -> Option<String> {
        let mut parts = Vec::new();

        if let Some(project) = &self.project {
            parts.push(format!("Proje: {project}"));
        }
        match (self.from, self.to) {
            (Some(from), Some(to)) => parts.push(format!(
                "{} - {}",
                from.format("%d.%m.%Y"),
                to.format("%d.%m.%Y")
            )),
            (Some(from), None) => parts.push(format!("{} sonrası", from.format("%d.%m.%Y"))),
            (None, Some(to)) => parts.push(format!("{} öncesi", to.format("%d.%m.%Y"))),
            (None, None) => {}
        }
        if let Some(kind) = self.kind {
            parts.push(kind.to_string());
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

/// Case-insensitive key for project names. Turkish dotted and dotless `i`
/// fold together so `İ`, `I`, `ı` and `i` all match.
fn fold_case(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|&c| c != '\u{307}')
        .map(|c| if c == 'ı' { 'i' } else { c })
        .collect()
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ReportError::InvalidDate(value.to_string()))
}
