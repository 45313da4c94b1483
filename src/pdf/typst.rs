use serde::Serialize;
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::config::Company;
use crate::error::{ReportError, Result};
use crate::report::{LayoutSettings, ReportData};

/// Embedded Typst template for the paginated transaction report.
///
/// Page breaks are not left to Typst: every entry in `report.pages` becomes
/// exactly one physical page, so carryover rows line up with the computed pages.
///
/// Row heights are estimated before layout. When Typst's real text metrics
/// make a page taller than estimated, the page body is clipped at the bottom
/// margin instead of spilling onto an extra page, so `Sayfa n / page_count`
/// stays correct. The clipped rows still count in every printed total.
const REPORT_TEMPLATE: &str = r##"// Transaction Report Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")
#let report = data.report
#let layout = data.layout
#let company = data.company

#let px(value) = value / layout.px_per_mm * 1mm

#set page(
  width: layout.page_width_mm * 1mm,
  height: layout.page_height_mm * 1mm,
  margin: layout.page_padding_mm * 1mm,
  footer: context [
    #set text(size: 7pt, fill: gray)
    #grid(
      columns: (1fr, 1fr),
      align: (left, right),
      [#report.generated_date],
      [Sayfa #counter(page).display() / #report.page_count],
    )
  ],
)

#set text(font: "Helvetica", size: 7.5pt, lang: "tr")

#let widths = report.columns.map(c => px(c.width_px))

#let letterhead() = block(height: px(layout.first_header_px), width: 100%)[
  #grid(
    columns: (1fr, 1fr),
    align: (left, right),
    [
      #text(size: 14pt, weight: "bold")[#company.name]
      #v(0.2em)
      #company.address \
      #company.city
      #if company.phone != none [
        \ #company.phone
      ]
      #if company.email != none [
        \ #company.email
      ]
    ],
    [
      #text(size: 16pt, weight: "bold")[#report.title]
      #v(0.3em)
      #if report.filter_info != none [
        #text(fill: gray)[#report.filter_info] \
      ]
      #if company.tax_office != none and company.tax_number != none [
        #text(size: 7pt)[V.D.: #company.tax_office / V.No: #company.tax_number]
      ]
    ]
  )
  #v(1fr)
  #line(length: 100%, stroke: 0.5pt + gray)
]

#let running(page) = block(height: px(layout.running_header_px), width: 100%)[
  #grid(
    columns: (1fr, auto),
    align: (left, right),
    [#text(weight: "bold")[#report.title] #h(0.5em) #text(fill: gray)[#company.name]],
    [Sayfa #page.number / #report.page_count],
  )
  #v(1fr)
  #line(length: 100%, stroke: 0.5pt + gray)
]

#for (i, page) in report.pages.enumerate() {
  if i > 0 { pagebreak() }

  block(width: 100%, height: 100%, breakable: false, clip: true, {
    if page.header == "letterhead" { letterhead() } else { running(page) }

    table(
      columns: widths,
      align: (left, left, left, left, left, left, right, center),
      stroke: (x, y) => if y == 0 { (bottom: 1pt + black) } else { (bottom: 0.5pt + gray) },
      inset: 4pt,
      fill: (x, y) => if y == 0 { luma(240) } else { none },

      table.header(..report.columns.map(c => [*#c.label*])),

      ..if page.carryover != none {
        (
          table.cell(colspan: 6, align: right, fill: luma(248))[*Devreden Bakiye*],
          table.cell(colspan: 2, align: right, fill: luma(248))[*#page.carryover*],
        )
      } else {
        ()
      },

      ..page.rows.map(row => (
        row.date,
        row.project,
        row.kind,
        row.category,
        row.sub_category,
        row.description,
        row.amount,
        if row.linked [✓] else [],
      )).flatten(),

      table.cell(colspan: 6, align: right, fill: luma(240))[
        *Sayfa Toplamı* #h(1em) Gelir: #page.page_income #h(0.5em) Gider: #page.page_expense
      ],
      table.cell(colspan: 2, align: right, fill: luma(240))[*#page.closing_balance*],
    )

    if page.grand_totals != none {
      v(1em)
      align(right)[
        #table(
          columns: (auto, auto),
          stroke: none,
          align: (right, right),
          inset: 4pt,

          [Toplam Gelir:], [#page.grand_totals.total_income],
          [Toplam Gider:], [#page.grand_totals.total_expense],

          table.hline(stroke: 1pt),
          [*Net Bakiye:*], [*#page.grand_totals.net_balance*],
        )
      ]
    }
  })
}
"##;

#[derive(Serialize)]
struct TemplateData<'a> {
    company: &'a Company,
    layout: &'a LayoutSettings,
    report: &'a ReportData,
}

/// Generate a report PDF using Typst CLI
pub fn generate_report_pdf(
    report: &ReportData,
    company: &Company,
    layout: &LayoutSettings,
    output_path: &Path,
) -> Result<()> {
    // Check if typst is available
    if Command::new("typst").arg("--version").output().is_err() {
        return Err(ReportError::TypstNotFound);
    }

    let temp_dir = std::env::temp_dir().join(format!("txreport-{}", std::process::id()));
    std::fs::create_dir_all(&temp_dir)?;

    let json_data = serde_json::to_string(&TemplateData {
        company,
        layout,
        report,
    })
    .map_err(|e| ReportError::PdfGeneration(e.to_string()))?;

    let json_path = temp_dir.join("report_data.json");
    std::fs::write(&json_path, &json_data)?;

    let template_content = REPORT_TEMPLATE.replace("DATA_JSON_PATH", "report_data.json");
    let template_path = temp_dir.join("report.typ");
    std::fs::write(&template_path, &template_content)?;

    debug!(template = %template_path.display(), output = %output_path.display(), "running typst");

    let output = Command::new("typst")
        .arg("compile")
        .arg("--root")
        .arg(&temp_dir)
        .arg(&template_path)
        .arg(output_path)
        .output()?;

    // Clean up temp files
    let _ = std::fs::remove_dir_all(&temp_dir);

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReportError::PdfGeneration(stderr.to_string()));
    }

    Ok(())
}
