use serde::Serialize;

use super::layout::{ColumnBounds, LayoutSettings};
use super::transaction::Transaction;
use crate::money::{format_amount, parse_amount};

/// Column widths in pixels, computed once per report and shared by every page.
///
/// The widths always add up to [`LayoutSettings::content_width_px`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnWidthPlan {
    pub date: u32,
    pub project: u32,
    pub kind: u32,
    pub category: u32,
    pub sub_category: u32,
    pub description: u32,
    pub amount: u32,
    pub linked: u32,
}

impl ColumnWidthPlan {
    pub fn total(&self) -> u32 {
        self.date
            + self.project
            + self.kind
            + self.category
            + self.sub_category
            + self.description
            + self.amount
            + self.linked
    }

    /// `(label, width)` pairs in table order.
    pub fn columns(&self) -> [(&'static str, u32); 8] {
        [
            ("Tarih", self.date),
            ("Proje", self.project),
            ("Tür", self.kind),
            ("Kategori", self.category),
            ("Alt Kategori", self.sub_category),
            ("Açıklama", self.description),
            ("Tutar", self.amount),
            ("Hakediş", self.linked),
        ]
    }
}

/// Size the table columns for the whole transaction list.
///
/// Content-driven columns take the width of their longest value clamped to
/// their bounds; the description column gets whatever remains. When the
/// remainder is below the description minimum, the content-driven columns
/// give back space (largest slack first) down to their own minimums.
///
/// Amounts are measured as printed, with `currency_symbol` appended.
pub fn allocate(
    transactions: &[Transaction],
    layout: &LayoutSettings,
    currency_symbol: &str,
) -> ColumnWidthPlan {
    let cols = &layout.columns;

    let longest = |f: &dyn Fn(&Transaction) -> usize| {
        transactions.iter().map(f).max().unwrap_or(0)
    };
    let size = |chars: usize, bounds: ColumnBounds| {
        let content = (chars as f64 * cols.char_width_px).ceil() as u32 + cols.cell_padding_px;
        content.max(bounds.min_px).min(bounds.max_px)
    };

    let mut flexible = [
        (
            size(longest(&|t| t.project_name.chars().count()), cols.project),
            cols.project.min_px,
        ),
        (
            size(longest(&|t| t.category.chars().count()), cols.category),
            cols.category.min_px,
        ),
        (
            size(longest(&|t| t.sub_category.chars().count()), cols.sub_category),
            cols.sub_category.min_px,
        ),
        (
            size(longest(&|t| amount_chars(t, currency_symbol)), cols.amount),
            cols.amount.min_px,
        ),
    ];

    let total = layout.content_width_px();
    let fixed = cols.date_px + cols.kind_px + cols.linked_px;
    let used = |flexible: &[(u32, u32)]| fixed + flexible.iter().map(|(w, _)| w).sum::<u32>();

    let mut remaining = total.saturating_sub(used(&flexible[..]));
    if remaining < cols.description_min_px {
        let mut deficit = cols.description_min_px - remaining;
        let mut order: Vec<usize> = (0..flexible.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(flexible[i].0.saturating_sub(flexible[i].1)));

        for i in order {
            if deficit == 0 {
                break;
            }
            let (width, min) = &mut flexible[i];
            let give = width.saturating_sub(*min).min(deficit);
            *width -= give;
            deficit -= give;
        }
        remaining = total.saturating_sub(used(&flexible[..]));
    }

    let [(project, _), (category, _), (sub_category, _), (amount, _)] = flexible;

    ColumnWidthPlan {
        date: cols.date_px,
        project,
        kind: cols.kind_px,
        category,
        sub_category,
        description: remaining.max(cols.description_min_px),
        amount,
        linked: cols.linked_px,
    }
}

fn amount_chars(tx: &Transaction, currency_symbol: &str) -> usize {
    let value = parse_amount(&tx.amount).unwrap_or_default();
    format_amount(value, currency_symbol).chars().count()
}
