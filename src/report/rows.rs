//! Row height estimation.
//!
//! Pagination has to happen before anything is rendered, so row heights come
//! from a characters-per-line approximation instead of text measurement.

use super::columns::ColumnWidthPlan;
use super::layout::LayoutSettings;
use super::transaction::Transaction;

/// Estimated height of a row whose description has `description_len` chars
/// in a description column `column_width_px` wide.
pub fn estimate_height(
    description_len: usize,
    column_width_px: u32,
    layout: &LayoutSettings,
) -> f64 {
    let chars_per_line = (f64::from(column_width_px) / layout.avg_char_width_px).floor() as usize;
    let chars_per_line = chars_per_line.max(1);
    let lines = description_len.div_ceil(chars_per_line).max(1);

    layout.base_row_px + (lines - 1) as f64 * layout.line_height_px
}

/// Estimated height of one transaction row under the given column plan.
pub fn row_height(tx: &Transaction, plan: &ColumnWidthPlan, layout: &LayoutSettings) -> f64 {
    estimate_height(tx.description_len(), plan.description, layout)
}
