mod company;

pub use company::{Company, Config, ReportSettings};

use crate::error::{ReportError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG config dir, or ~/.txreport/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "txreport") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        ReportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".txreport"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the output directory; relative paths are taken from the config directory.
pub fn resolve_output_dir(output_dir: &str, cfg_dir: &Path) -> PathBuf {
    let path = expand_path(output_dir);
    if path.is_absolute() {
        path
    } else {
        cfg_dir.join(path)
    }
}

/// Load and validate config.toml
pub fn load_config(cfg_dir: &Path) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    let path = cfg_dir.join("config.toml");
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    let config: Config =
        toml::from_str(&content).map_err(|e| ReportError::ConfigParse { path, source: e })?;
    config.layout.validate()?;
    Ok(config)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[company]
name = "Örnek İnşaat Ltd. Şti."
address = "Atatürk Cad. No: 1"
city = "Ankara"
# phone = "+90 312 000 00 00"     # optional
# email = "muhasebe@ornek.com.tr" # optional
# tax_office = "Çankaya"          # optional
# tax_number = "1234567890"       # optional

[report]
title = "Gelir Gider Raporu"
currency_symbol = "₺"
output_dir = "output"   # relative to this directory

# Page geometry. Sizes are in mm, heights and widths in px.
# Every key is optional; these are the defaults (A4 portrait, 96 dpi).
[layout]
page_width_mm = 210.0
page_height_mm = 297.0
page_padding_mm = 10.0
px_per_mm = 3.7795
first_header_px = 140.0    # letterhead on the first page
running_header_px = 48.0   # short header on later pages
footer_px = 32.0
table_header_px = 30.0
summary_row_px = 28.0      # page total row
carryover_row_px = 28.0    # carried balance row on later pages
base_row_px = 24.0
line_height_px = 14.0
avg_char_width_px = 6.0

[layout.columns]
date_px = 72
kind_px = 48
linked_px = 56
description_min_px = 120
char_width_px = 6.0
cell_padding_px = 12
project = { min_px = 70, max_px = 130 }
category = { min_px = 60, max_px = 110 }
sub_category = { min_px = 60, max_px = 110 }
amount = { min_px = 80, max_px = 120 }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::LayoutSettings;

    #[test]
    fn template_matches_defaults() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.layout, LayoutSettings::default());
        assert_eq!(config.report.currency_symbol, "₺");
    }

    #[test]
    fn partial_layout_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"[company]
name = "X"
address = "Y"
city = "Z"

[layout]
page_height_mm = 420.0
"#,
        )
        .unwrap();
        assert_eq!(config.layout.page_height_mm, 420.0);
        assert_eq!(config.layout.base_row_px, LayoutSettings::default().base_row_px);
    }
}
