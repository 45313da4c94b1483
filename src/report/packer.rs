//! Greedy page packing of variable-height transaction rows.

use std::ops::Range;
use tracing::{debug, warn};

use super::columns::ColumnWidthPlan;
use super::layout::LayoutSettings;
use super::rows::row_height;
use super::transaction::Transaction;

/// Where one page starts and ends in the transaction list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBounds {
    pub index: usize,
    /// Contiguous slice of the input list placed on this page.
    pub rows: Range<usize>,
    /// Sum of the estimated heights of the rows on this page.
    pub used_height: f64,
    pub available_height: f64,
}

impl PageBounds {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when a single row taller than the page was forced onto it.
    pub fn overflows(&self) -> bool {
        self.used_height > self.available_height
    }
}

/// Partition `transactions` into pages in input order.
///
/// Rows are added while they fit in the page's available height. An empty
/// page always takes the next row even if it does not fit, so every page holds
/// at least one row and packing terminates. An empty list yields no pages.
pub fn pack(
    transactions: &[Transaction],
    plan: &ColumnWidthPlan,
    layout: &LayoutSettings,
) -> Vec<PageBounds> {
    let heights: Vec<f64> = transactions
        .iter()
        .map(|tx| row_height(tx, plan, layout))
        .collect();

    pack_heights(&heights, layout)
}

/// Packing over precomputed row heights.
pub fn pack_heights(heights: &[f64], layout: &LayoutSettings) -> Vec<PageBounds> {
    let mut pages = Vec::new();
    let mut cursor = 0;

    while cursor < heights.len() {
        let index = pages.len();
        let available_height = layout.available_height(index == 0);
        let start = cursor;
        let mut used_height = 0.0;

        while cursor < heights.len() {
            let next = heights[cursor];
            if cursor == start {
                used_height = next;
                cursor += 1;
                if next > available_height {
                    warn!(
                        page = index,
                        row = start,
                        height = next,
                        available = available_height,
                        "row taller than page placed on its own page"
                    );
                    break;
                }
                continue;
            }
            if used_height + next > available_height {
                break;
            }
            used_height += next;
            cursor += 1;
        }

        debug!(page = index, first = start, last = cursor - 1, used_height, "page packed");
        pages.push(PageBounds {
            index,
            rows: start..cursor,
            used_height,
            available_height,
        });
    }

    pages
}
