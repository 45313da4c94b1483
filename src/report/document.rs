use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use super::columns::{allocate, ColumnWidthPlan};
use super::layout::LayoutSettings;
use super::packer::pack;
use super::totals::{aggregate, grand_totals, GrandTotals, Page};
use super::transaction::Transaction;
use crate::money::format_amount;

/// Header drawn at the top of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderVariant {
    /// Full company letterhead.
    Letterhead,
    /// Short running header with the title and page number.
    Running,
}

/// A paginated report ready for rendering.
#[derive(Debug, Clone)]
pub struct ReportDocument<'a> {
    pub title: String,
    pub filter_info: Option<String>,
    /// Symbol appended to every printed amount; the column plan is sized for it.
    pub currency_symbol: String,
    pub columns: ColumnWidthPlan,
    pub pages: Vec<Page<'a>>,
    pub totals: GrandTotals,
}

/// Paginate `transactions` and compute every total the report shows.
pub fn build_report<'a>(
    transactions: &'a [Transaction],
    layout: &LayoutSettings,
    currency_symbol: &str,
    title: &str,
    filter_info: Option<String>,
) -> ReportDocument<'a> {
    let columns = allocate(transactions, layout, currency_symbol);
    let bounds = pack(transactions, &columns, layout);
    let pages = aggregate(transactions, &bounds);
    let totals = grand_totals(transactions);

    info!(
        transactions = transactions.len(),
        pages = pages.len(),
        description_px = columns.description,
        "report paginated"
    );

    ReportDocument {
        title: title.to_string(),
        filter_info,
        currency_symbol: currency_symbol.to_string(),
        columns,
        pages,
        totals,
    }
}

impl ReportDocument<'_> {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn header_for(page: &Page<'_>) -> HeaderVariant {
        if page.index == 0 {
            HeaderVariant::Letterhead
        } else {
            HeaderVariant::Running
        }
    }

    /// Owned, display-formatted copy of the report for renderers.
    pub fn to_data(&self, generated_date: &str) -> ReportData {
        let money = |value: Decimal| format_amount(value, &self.currency_symbol);
        let page_count = self.pages.len();

        let pages = self
            .pages
            .iter()
            .map(|page| {
                let is_last = page.index + 1 == page_count;
                ReportPageData {
                    number: page.index + 1,
                    header: Self::header_for(page),
                    carryover: (page.index > 0).then(|| money(page.carryover_total)),
                    rows: page
                        .transactions
                        .iter()
                        .map(|tx| ReportRowData {
                            id: tx.id.clone(),
                            date: tx.display_date(),
                            project: tx.project_name.clone(),
                            kind: tx.kind.to_string(),
                            category: tx.category.clone(),
                            sub_category: tx.sub_category.clone(),
                            description: tx.description_text().to_string(),
                            amount: money(tx.amount_value()),
                            linked: tx.has_linked_document(),
                        })
                        .collect(),
                    page_income: money(page.page_income_total),
                    page_expense: money(page.page_expense_total),
                    page_net: money(page.page_net()),
                    closing_balance: money(page.closing_balance()),
                    grand_totals: is_last.then(|| GrandTotalsData {
                        total_income: money(self.totals.total_income),
                        total_expense: money(self.totals.total_expense),
                        net_balance: money(self.totals.net_balance),
                    }),
                }
            })
            .collect();

        ReportData {
            title: self.title.clone(),
            filter_info: self.filter_info.clone(),
            generated_date: generated_date.to_string(),
            page_count,
            columns: self
                .columns
                .columns()
                .iter()
                .map(|(label, width)| ColumnData {
                    label: label.to_string(),
                    width_px: *width,
                })
                .collect(),
            pages,
        }
    }
}

/// Serializable report passed to the text, JSON and PDF renderers.
#[derive(Debug, Serialize)]
pub struct ReportData {
    pub title: String,
    pub filter_info: Option<String>,
    pub generated_date: String,
    pub page_count: usize,
    pub columns: Vec<ColumnData>,
    pub pages: Vec<ReportPageData>,
}

#[derive(Debug, Serialize)]
pub struct ColumnData {
    pub label: String,
    pub width_px: u32,
}

#[derive(Debug, Serialize)]
pub struct ReportPageData {
    /// 1-based page number.
    pub number: usize,
    pub header: HeaderVariant,
    pub carryover: Option<String>,
    pub rows: Vec<ReportRowData>,
    pub page_income: String,
    pub page_expense: String,
    pub page_net: String,
    pub closing_balance: String,
    /// Present on the last page only.
    pub grand_totals: Option<GrandTotalsData>,
}

#[derive(Debug, Serialize)]
pub struct ReportRowData {
    pub id: String,
    pub date: String,
    pub project: String,
    pub kind: String,
    pub category: String,
    pub sub_category: String,
    pub description: String,
    pub amount: String,
    pub linked: bool,
}

#[derive(Debug, Serialize)]
pub struct GrandTotalsData {
    pub total_income: String,
    pub total_expense: String,
    pub net_balance: String,
}
