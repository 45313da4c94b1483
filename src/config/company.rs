use serde::{Deserialize, Serialize};

use crate::report::LayoutSettings;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub company: Company,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
}

/// Letterhead printed on the first page of every report.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Company {
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tax_office: Option<String>,
    #[serde(default)]
    pub tax_number: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportSettings {
    pub title: String,
    pub currency_symbol: String,
    pub output_dir: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "Gelir Gider Raporu".to_string(),
            currency_symbol: "₺".to_string(),
            output_dir: "output".to_string(),
        }
    }
}
