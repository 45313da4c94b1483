pub mod config;
pub mod error;
pub mod money;
pub mod pdf;
pub mod report;
pub mod text;

pub use config::{Company, Config, ReportSettings};
pub use error::{ReportError, Result};
pub use report::{build_report, LayoutSettings, Page, ReportDocument, Transaction, TransactionKind};
