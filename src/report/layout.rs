use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Physical page geometry and the pixel heights of the fixed page furniture.
///
/// Page dimensions and padding are in millimeters; everything else is in
/// layout pixels, converted with `px_per_mm`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub page_padding_mm: f64,
    pub px_per_mm: f64,
    /// Letterhead block on the first page.
    pub first_header_px: f64,
    /// Short running header on continuation pages.
    pub running_header_px: f64,
    pub footer_px: f64,
    pub table_header_px: f64,
    pub summary_row_px: f64,
    pub carryover_row_px: f64,
    pub base_row_px: f64,
    pub line_height_px: f64,
    pub avg_char_width_px: f64,
    pub columns: ColumnSettings,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        // A4 portrait at 96 dpi
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            page_padding_mm: 10.0,
            px_per_mm: 3.7795,
            first_header_px: 140.0,
            running_header_px: 48.0,
            footer_px: 32.0,
            table_header_px: 30.0,
            summary_row_px: 28.0,
            carryover_row_px: 28.0,
            base_row_px: 24.0,
            line_height_px: 14.0,
            avg_char_width_px: 6.0,
            columns: ColumnSettings::default(),
        }
    }
}

/// Pixel bounds for a column whose width follows its content.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ColumnBounds {
    pub min_px: u32,
    pub max_px: u32,
}

impl ColumnBounds {
    pub const fn new(min_px: u32, max_px: u32) -> Self {
        Self { min_px, max_px }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColumnSettings {
    pub date_px: u32,
    pub kind_px: u32,
    pub linked_px: u32,
    pub project: ColumnBounds,
    pub category: ColumnBounds,
    pub sub_category: ColumnBounds,
    pub amount: ColumnBounds,
    pub description_min_px: u32,
    /// Character width used to size content-driven columns.
    pub char_width_px: f64,
    /// Horizontal cell padding added to every content-driven width.
    pub cell_padding_px: u32,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            date_px: 72,
            kind_px: 48,
            linked_px: 56,
            project: ColumnBounds::new(70, 130),
            category: ColumnBounds::new(60, 110),
            sub_category: ColumnBounds::new(60, 110),
            amount: ColumnBounds::new(80, 120),
            description_min_px: 120,
            char_width_px: 6.0,
            cell_padding_px: 12,
        }
    }
}

impl ColumnSettings {
    fn fixed_total(&self) -> u32 {
        self.date_px + self.kind_px + self.linked_px
    }

    fn minimum_total(&self) -> u32 {
        self.fixed_total()
            + self.project.min_px
            + self.category.min_px
            + self.sub_category.min_px
            + self.amount.min_px
            + self.description_min_px
    }
}

impl LayoutSettings {
    /// Vertical space inside the page padding.
    pub fn printable_height_px(&self) -> f64 {
        (self.page_height_mm - 2.0 * self.page_padding_mm) * self.px_per_mm
    }

    /// Table width shared by every page, in whole pixels.
    pub fn content_width_px(&self) -> u32 {
        let width = (self.page_width_mm - 2.0 * self.page_padding_mm) * self.px_per_mm;
        width.max(0.0).floor() as u32
    }

    /// Height left for transaction rows once the page furniture is placed.
    ///
    /// May be zero or negative for a misconfigured layout; the packer still
    /// places one row per page in that case.
    pub fn available_height(&self, first_page: bool) -> f64 {
        let header = if first_page {
            self.first_header_px
        } else {
            self.running_header_px
        };
        let carryover = if first_page { 0.0 } else { self.carryover_row_px };

        self.printable_height_px()
            - header
            - self.footer_px
            - self.table_header_px
            - self.summary_row_px
            - carryover
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("page_width_mm", self.page_width_mm),
            ("page_height_mm", self.page_height_mm),
            ("px_per_mm", self.px_per_mm),
            ("base_row_px", self.base_row_px),
            ("line_height_px", self.line_height_px),
            ("avg_char_width_px", self.avg_char_width_px),
            ("columns.char_width_px", self.columns.char_width_px),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, "must be greater than zero"));
            }
        }

        let non_negative = [
            ("page_padding_mm", self.page_padding_mm),
            ("first_header_px", self.first_header_px),
            ("running_header_px", self.running_header_px),
            ("footer_px", self.footer_px),
            ("table_header_px", self.table_header_px),
            ("summary_row_px", self.summary_row_px),
            ("carryover_row_px", self.carryover_row_px),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, "must not be negative"));
            }
        }

        if 2.0 * self.page_padding_mm >= self.page_width_mm
            || 2.0 * self.page_padding_mm >= self.page_height_mm
        {
            return Err(invalid("page_padding_mm", "leaves no printable area"));
        }

        let cols = &self.columns;
        for (field, bounds) in [
            ("columns.project", cols.project),
            ("columns.category", cols.category),
            ("columns.sub_category", cols.sub_category),
            ("columns.amount", cols.amount),
        ] {
            if bounds.min_px > bounds.max_px {
                return Err(invalid(field, "min_px is larger than max_px"));
            }
        }

        let content = self.content_width_px();
        if cols.minimum_total() > content {
            return Err(invalid(
                "columns",
                &format!(
                    "minimum column widths ({}px) exceed the content width ({}px)",
                    cols.minimum_total(),
                    content
                ),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ReportError {
    ReportError::InvalidLayout {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuation_pages_reserve_carryover_row() {
        let layout = LayoutSettings::default();
        let first = layout.available_height(true);
        let later = layout.available_height(false);
        let expected =
            layout.first_header_px - layout.running_header_px - layout.carryover_row_px;
        assert!((later - first - expected).abs() < 1e-9);
    }

    #[test]
    fn default_layout_is_valid() {
        assert!(LayoutSettings::default().validate().is_ok());
    }

    #[test]
    fn rejects_columns_wider_than_page() {
        let mut layout = LayoutSettings::default();
        layout.columns.description_min_px = 2000;
        assert!(matches!(
            layout.validate(),
            Err(ReportError::InvalidLayout { .. })
        ));
    }
}
