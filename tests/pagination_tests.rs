use rust_decimal::Decimal;
use std::str::FromStr;

use txreport::report::{
    aggregate, allocate, build_report, grand_totals, pack, pack_heights, row_height, HeaderVariant,
    LayoutSettings, ReportDocument, Transaction, TransactionKind,
};

fn tx(id: usize, kind: TransactionKind, amount: &str, description: Option<&str>) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: format!("2026-03-{:02}", id % 28 + 1),
        project_name: "A Blok".to_string(),
        kind,
        amount: amount.to_string(),
        category: "Malzeme".to_string(),
        sub_category: "Beton".to_string(),
        description: description.map(str::to_string),
        linked_document_id: (id % 3 == 0).then(|| format!("HK-{id}")),
    }
}

/// Rows are 20px tall and both first and later pages leave exactly 350px,
/// so 17 rows fit on every page.
fn seventeen_per_page() -> LayoutSettings {
    LayoutSettings {
        page_width_mm: 800.0,
        page_height_mm: 410.0,
        page_padding_mm: 0.0,
        px_per_mm: 1.0,
        first_header_px: 60.0,
        running_header_px: 30.0,
        carryover_row_px: 30.0,
        footer_px: 0.0,
        table_header_px: 0.0,
        summary_row_px: 0.0,
        base_row_px: 20.0,
        line_height_px: 10.0,
        avg_char_width_px: 5.0,
        ..LayoutSettings::default()
    }
}

fn mixed_transactions(count: usize) -> Vec<Transaction> {
    (0..count)
        .map(|i| {
            let kind = if i % 4 == 0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            let amount = format!("{}.{:02}", 100 + i * 37, i % 100);
            let description = "Şantiye gideri ".repeat(i % 9);
            tx(i, kind, &amount, Some(&description))
        })
        .collect()
}

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

#[test]
fn empty_list_has_no_pages() {
    let layout = LayoutSettings::default();
    let report = build_report(&[], &layout, "₺", "Rapor", None);

    assert!(report.is_empty());
    assert_eq!(report.totals.net_balance, Decimal::ZERO);
}

#[test]
fn small_list_fits_on_one_page() {
    let layout = LayoutSettings::default();
    let list = vec![
        tx(1, TransactionKind::Income, "1000", Some("Hakediş ödemesi")),
        tx(2, TransactionKind::Expense, "250.50", None),
        tx(3, TransactionKind::Expense, "99.50", Some("Nakliye")),
    ];
    let report = build_report(&list, &layout, "₺", "Rapor", None);

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.pages[0].transactions.len(), 3);
    assert_eq!(report.pages[0].carryover_total, Decimal::ZERO);
}

#[test]
fn forty_rows_split_seventeen_per_page() {
    let layout = seventeen_per_page();
    let list: Vec<_> = (0..40)
        .map(|i| tx(i, TransactionKind::Income, "10", None))
        .collect();
    let report = build_report(&list, &layout, "₺", "Rapor", None);

    let sizes: Vec<_> = report.pages.iter().map(|p| p.transactions.len()).collect();
    assert_eq!(sizes, [17, 17, 6]);
    assert_eq!(report.pages[1].carryover_total, dec("170"));
    assert_eq!(report.pages[2].carryover_total, dec("340"));
}

#[test]
fn overlong_row_gets_its_own_page() {
    let layout = LayoutSettings::default();
    let long = "uzun açıklama ".repeat(2000);
    let mut list = vec![tx(0, TransactionKind::Expense, "5", Some(&long))];
    list.extend((1..5).map(|i| tx(i, TransactionKind::Expense, "5", None)));

    let report = build_report(&list, &layout, "₺", "Rapor", None);

    assert!(report.pages[0].used_height > report.pages[0].available_height);
    assert_eq!(report.pages[0].transactions.len(), 1);
    assert_eq!(report.pages[0].transactions[0].id, "0");
    assert_eq!(report.pages[1].transactions[0].id, "1");
}

#[test]
fn income_and_expense_on_one_page() {
    let layout = LayoutSettings::default();
    let list = vec![
        tx(1, TransactionKind::Income, "1000", None),
        tx(2, TransactionKind::Expense, "400", None),
    ];
    let report = build_report(&list, &layout, "₺", "Rapor", None);
    let page = &report.pages[0];

    assert_eq!(page.page_income_total, dec("1000"));
    assert_eq!(page.page_expense_total, dec("400"));
    assert_eq!(report.totals.net_balance, dec("600"));
    assert_eq!(page.closing_balance(), dec("600"));
}

#[test]
fn pages_reconstruct_input_in_order() {
    let layout = LayoutSettings::default();
    let list = mixed_transactions(150);
    let report = build_report(&list, &layout, "₺", "Rapor", None);

    assert!(report.pages.len() > 2);
    let rebuilt: Vec<Transaction> = report
        .pages
        .iter()
        .flat_map(|p| p.transactions.iter().cloned())
        .collect();
    assert_eq!(rebuilt, list);
}

#[test]
fn carryover_chains_and_reconciles_with_grand_total() {
    let layout = seventeen_per_page();
    let mut list = mixed_transactions(90);
    list[7].amount = "bozuk".to_string();

    let report = build_report(&list, &layout, "₺", "Rapor", None);
    let pages = &report.pages;

    assert_eq!(pages[0].carryover_total, Decimal::ZERO);
    for pair in pages.windows(2) {
        assert_eq!(pair[1].carryover_total, pair[0].closing_balance());
    }

    let last = pages.last().unwrap();
    let direct: Decimal = list.iter().map(Transaction::signed_amount).sum();
    assert_eq!(last.closing_balance(), direct);
    assert_eq!(last.closing_balance(), report.totals.net_balance);
    assert_eq!(
        report.totals.net_balance,
        report.totals.total_income - report.totals.total_expense
    );
}

#[test]
fn overflowing_amount_does_not_abort_report() {
    let layout = LayoutSettings::default();
    let list = vec![
        tx(1, TransactionKind::Income, "79228162514264337593543950335", None),
        tx(2, TransactionKind::Income, "1", None),
        tx(4, TransactionKind::Expense, "79228162514264337593543950335", None),
        tx(5, TransactionKind::Expense, "2", None),
    ];

    let report = build_report(&list, &layout, "₺", "Rapor", None);

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.totals.total_income, Decimal::MAX);
    assert_eq!(report.totals.total_expense, Decimal::MAX);
    assert_eq!(report.totals.net_balance, Decimal::ZERO);
    assert_eq!(report.pages[0].closing_balance(), report.totals.net_balance);

    let data = report.to_data("18.10.2026");
    assert_eq!(data.pages[0].rows.len(), 4);
}

#[test]
fn carryover_overflow_keeps_chain_consistent() {
    let layout = seventeen_per_page();
    let mut list: Vec<_> = (0..34)
        .map(|i| tx(i, TransactionKind::Expense, "0", None))
        .collect();
    list[0] = tx(0, TransactionKind::Income, "79228162514264337593543950335", None);
    list[17] = tx(17, TransactionKind::Income, "79228162514264337593543950335", None);

    let report = build_report(&list, &layout, "₺", "Rapor", None);
    let pages = &report.pages;

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].carryover_total, Decimal::MAX);
    assert_eq!(pages[1].closing_balance(), Decimal::MAX);
}

#[test]
fn packing_is_deterministic() {
    let layout = LayoutSettings::default();
    let list = mixed_transactions(120);
    let plan = allocate(&list, &layout, "₺");

    assert_eq!(pack(&list, &plan, &layout), pack(&list, &plan, &layout));
}

#[test]
fn pages_never_exceed_available_height_unless_single_row() {
    let layout = LayoutSettings::default();
    let mut list = mixed_transactions(200);
    list[50].description = Some("x".repeat(20_000));
    let plan = allocate(&list, &layout, "₺");
    let bounds = pack(&list, &plan, &layout);

    for page in &bounds {
        let used: f64 = list[page.rows.clone()]
            .iter()
            .map(|t| row_height(t, &plan, &layout))
            .sum();
        assert_eq!(used, page.used_height);
        if page.overflows() {
            assert_eq!(page.len(), 1);
        } else {
            assert!(page.used_height <= page.available_height);
        }
    }
    assert!(bounds.iter().any(|p| p.overflows()));
}

#[test]
fn later_pages_use_continuation_height() {
    let layout = LayoutSettings::default();
    let list = mixed_transactions(200);
    let plan = allocate(&list, &layout, "₺");
    let bounds = pack(&list, &plan, &layout);

    assert_eq!(bounds[0].available_height, layout.available_height(true));
    for page in &bounds[1..] {
        assert_eq!(page.available_height, layout.available_height(false));
    }
}

#[test]
fn no_space_still_places_one_row_per_page() {
    let layout = LayoutSettings {
        first_header_px: 10_000.0,
        running_header_px: 10_000.0,
        ..LayoutSettings::default()
    };
    assert!(layout.available_height(true) < 0.0);

    let bounds = pack_heights(&[24.0, 24.0, 24.0], &layout);
    assert_eq!(bounds.len(), 3);
    assert!(bounds.iter().all(|p| p.len() == 1));
}

#[test]
fn aggregate_matches_grand_totals() {
    let layout = LayoutSettings::default();
    let list = mixed_transactions(80);
    let plan = allocate(&list, &layout, "₺");
    let pages = aggregate(&list, &pack(&list, &plan, &layout));
    let totals = grand_totals(&list);

    let income: Decimal = pages.iter().map(|p| p.page_income_total).sum();
    let expense: Decimal = pages.iter().map(|p| p.page_expense_total).sum();
    assert_eq!(income, totals.total_income);
    assert_eq!(expense, totals.total_expense);
}

#[test]
fn report_data_marks_headers_and_final_totals() {
    let layout = seventeen_per_page();
    let list: Vec<_> = (0..40)
        .map(|i| {
            let kind = if i % 2 == 0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            tx(i, kind, "125.25", None)
        })
        .collect();
    let report = build_report(&list, &layout, "₺", "Gelir Gider", Some("Proje: A Blok".into()));
    let data = report.to_data("18.10.2026 10:00");

    assert_eq!(data.page_count, 3);
    assert_eq!(data.pages[0].header, HeaderVariant::Letterhead);
    assert_eq!(data.pages[1].header, HeaderVariant::Running);
    assert!(data.pages[0].carryover.is_none());
    assert!(data.pages[1].carryover.is_some());
    assert!(data.pages[..2].iter().all(|p| p.grand_totals.is_none()));
    assert!(data.pages[2].grand_totals.is_some());
    assert_eq!(ReportDocument::header_for(&report.pages[2]), HeaderVariant::Running);

    let widths: u32 = data.columns.iter().map(|c| c.width_px).sum();
    assert_eq!(widths, layout.content_width_px());
}

#[test]
fn transactions_deserialize_from_input_contract() {
    let json = r#"[
        {"id": "a1", "date": "2026-02-01", "projectName": "B Blok", "type": "Gelir",
         "amount": "1500.00", "category": "Hakediş", "subCategory": "1. Hakediş",
         "description": null, "linkedDocumentId": "HK-1"},
        {"id": "a2", "date": "2026-02-03", "projectName": "B Blok", "type": "Expense",
         "amount": "200", "category": "İşçilik", "subCategory": "",
         "linkedDocumentId": null}
    ]"#;
    let list: Vec<Transaction> = serde_json::from_str(json).unwrap();

    assert_eq!(list[0].kind, TransactionKind::Income);
    assert_eq!(list[1].kind, TransactionKind::Expense);
    assert!(list[0].has_linked_document());
    assert!(!list[1].has_linked_document());
    assert_eq!(list[0].description_len(), 0);
    assert_eq!(list[1].signed_amount(), dec("-200"));
}
