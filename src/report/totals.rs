use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use super::packer::PageBounds;
use super::transaction::{Transaction, TransactionKind};

/// Income and expense sums over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    /// Sum income and expense separately.
    ///
    /// An amount that would push a sum past the decimal range counts as zero,
    /// like an unparsable one.
    pub fn of(transactions: &[Transaction]) -> Self {
        let mut totals = Totals::default();
        for tx in transactions {
            let sum = match tx.kind {
                TransactionKind::Income => &mut totals.income,
                TransactionKind::Expense => &mut totals.expense,
            };
            match sum.checked_add(tx.amount_value()) {
                Some(value) => *sum = value,
                None => {
                    warn!(id = %tx.id, amount = %tx.amount, "amount overflows total, treated as zero");
                }
            }
        }
        totals
    }

    pub fn net(&self) -> Decimal {
        net_or_zero(self.income, self.expense)
    }
}

/// One packed page with its slice of transactions and its totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub index: usize,
    pub transactions: &'a [Transaction],
    /// Net balance of every earlier page; zero on the first page.
    pub carryover_total: Decimal,
    pub page_income_total: Decimal,
    pub page_expense_total: Decimal,
    pub used_height: f64,
    pub available_height: f64,
}

impl Page<'_> {
    pub fn page_net(&self) -> Decimal {
        net_or_zero(self.page_income_total, self.page_expense_total)
    }

    /// Running balance after this page's rows. The page net counts as zero
    /// when adding it would leave the decimal range.
    pub fn closing_balance(&self) -> Decimal {
        self.carryover_total
            .checked_add(self.page_net())
            .unwrap_or_else(|| {
                warn!(page = self.index, "page net overflows carryover, treated as zero");
                self.carryover_total
            })
    }
}

fn net_or_zero(income: Decimal, expense: Decimal) -> Decimal {
    income.checked_sub(expense).unwrap_or_else(|| {
        warn!(%income, %expense, "net balance overflows, treated as zero");
        Decimal::ZERO
    })
}

/// Attach per-page totals and carryover balances to packed page boundaries.
///
/// Each page's rows are summed once; carryover is the running sum of the
/// previous pages' nets.
pub fn aggregate<'a>(transactions: &'a [Transaction], bounds: &[PageBounds]) -> Vec<Page<'a>> {
    let mut carryover = Decimal::ZERO;

    bounds
        .iter()
        .map(|b| {
            let slice = &transactions[b.rows.clone()];
            let totals = Totals::of(slice);
            let page = Page {
                index: b.index,
                transactions: slice,
                carryover_total: carryover,
                page_income_total: totals.income,
                page_expense_total: totals.expense,
                used_height: b.used_height,
                available_height: b.available_height,
            };
            carryover = page.closing_balance();
            page
        })
        .collect()
}

/// Document-wide totals computed directly from the full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrandTotals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
}

pub fn grand_totals(transactions: &[Transaction]) -> GrandTotals {
    let totals = Totals::of(transactions);
    GrandTotals {
        total_income: totals.income,
        total_expense: totals.expense,
        net_balance: totals.net(),
    }
}
