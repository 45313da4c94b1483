mod columns;
mod document;
mod filter;
mod layout;
mod packer;
mod rows;
mod totals;
mod transaction;

pub use columns::{allocate, ColumnWidthPlan};
pub use document::{
    build_report, ColumnData, GrandTotalsData, HeaderVariant, ReportData, ReportDocument,
    ReportPageData, ReportRowData,
};
pub use filter::TransactionFilter;
pub use layout::{ColumnBounds, ColumnSettings, LayoutSettings};
pub use packer::{pack, pack_heights, PageBounds};
pub use rows::{estimate_height, row_height};
pub use totals::{aggregate, grand_totals, GrandTotals, Page, Totals};
pub use transaction::{load_transactions, Transaction, TransactionKind};
