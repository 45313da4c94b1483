//! Plain-text rendering of paginated reports for the terminal.

use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Modify, Style, Width},
    Table, Tabled,
};

use crate::money::format_amount;
use crate::report::{ColumnWidthPlan, GrandTotals, Page, ReportData};

const DESCRIPTION_WRAP: usize = 40;

#[derive(Tabled)]
struct PageSummaryRow {
    #[tabled(rename = "PAGE")]
    page: usize,
    #[tabled(rename = "ROWS")]
    rows: usize,
    #[tabled(rename = "HEIGHT")]
    height: String,
    #[tabled(rename = "CARRYOVER")]
    carryover: String,
    #[tabled(rename = "INCOME")]
    income: String,
    #[tabled(rename = "EXPENSE")]
    expense: String,
    #[tabled(rename = "BALANCE")]
    balance: String,
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "TARİH")]
    date: String,
    #[tabled(rename = "PROJE")]
    project: String,
    #[tabled(rename = "TÜR")]
    kind: String,
    #[tabled(rename = "KATEGORİ")]
    category: String,
    #[tabled(rename = "ALT KATEGORİ")]
    sub_category: String,
    #[tabled(rename = "AÇIKLAMA")]
    description: String,
    #[tabled(rename = "TUTAR")]
    amount: String,
    #[tabled(rename = "HAKEDİŞ")]
    linked: String,
}

#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "COLUMN")]
    label: String,
    #[tabled(rename = "WIDTH (px)")]
    width: u32,
}

/// One line per page with its row count, used height and balances.
pub fn render_page_summary(
    pages: &[Page<'_>],
    totals: &GrandTotals,
    currency_symbol: &str,
) -> String {
    let money = |value: Decimal| format_amount(value, currency_symbol);

    let rows: Vec<PageSummaryRow> = pages
        .iter()
        .map(|page| PageSummaryRow {
            page: page.index + 1,
            rows: page.transactions.len(),
            height: format!("{:.0}/{:.0}", page.used_height, page.available_height),
            carryover: money(page.carryover_total),
            income: money(page.page_income_total),
            expense: money(page.page_expense_total),
            balance: money(page.closing_balance()),
        })
        .collect();

    let mut out = Table::new(rows).with(Style::rounded()).to_string();
    out.push('\n');
    out.push_str(&render_grand_totals(
        &money(totals.total_income),
        &money(totals.total_expense),
        &money(totals.net_balance),
    ));
    out
}

/// The column plan with a total line.
pub fn render_columns(plan: &ColumnWidthPlan) -> String {
    let rows: Vec<ColumnRow> = plan
        .columns()
        .iter()
        .map(|(label, width)| ColumnRow {
            label: label.to_string(),
            width: *width,
        })
        .collect();

    let mut out = Table::new(rows).with(Style::rounded()).to_string();
    out.push_str(&format!("\nTotal width: {}px", plan.total()));
    out
}

/// Full report: header, carryover row, transactions and page total for each page.
pub fn render_report(data: &ReportData) -> String {
    let mut out = String::new();

    for page in &data.pages {
        if page.number > 1 {
            out.push('\n');
        }
        out.push_str(&format!(
            "{}  (Sayfa {}/{})\n",
            data.title, page.number, data.page_count
        ));
        if page.number == 1 {
            if let Some(info) = &data.filter_info {
                out.push_str(info);
                out.push('\n');
            }
        }
        if let Some(carryover) = &page.carryover {
            out.push_str(&format!("Devreden Bakiye: {carryover}\n"));
        }

        let rows: Vec<TransactionRow> = page
            .rows
            .iter()
            .map(|row| TransactionRow {
                date: row.date.clone(),
                project: row.project.clone(),
                kind: row.kind.clone(),
                category: row.category.clone(),
                sub_category: row.sub_category.clone(),
                description: row.description.clone(),
                amount: row.amount.clone(),
                linked: if row.linked { "✓".to_string() } else { String::new() },
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::single(5)).with(Width::wrap(DESCRIPTION_WRAP)))
            .to_string();
        out.push_str(&table);
        out.push('\n');
        out.push_str(&format!(
            "Sayfa Toplamı: Gelir {} | Gider {} | Bakiye {}\n",
            page.page_income, page.page_expense, page.closing_balance
        ));

        if let Some(totals) = &page.grand_totals {
            out.push('\n');
            out.push_str(&render_grand_totals(
                &totals.total_income,
                &totals.total_expense,
                &totals.net_balance,
            ));
        }
    }

    out
}

fn render_grand_totals(income: &str, expense: &str, net: &str) -> String {
    format!("Toplam Gelir: {income}\nToplam Gider: {expense}\nNet Bakiye:   {net}\n")
}
