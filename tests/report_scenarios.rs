use std::fs;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use bomrequisition_lib::processors::{build_report, SourceRows};
use bomrequisition_lib::storage::config::RequisitionConfig;
use bomrequisition_lib::{export_requisition_report, generate_requisition_report};

const EPS: f64 = 1e-9;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// 受注番号, -, -, hValue, 種別, 幅, 高さ, 本数, セット数, 単位, 色, 備考, 摘要
fn detail(order_id: &str, key: &str, dims: [&str; 9]) -> Vec<String> {
    let mut row = cells(&[order_id, "", "", key]);
    row.extend(dims.iter().map(|value| value.to_string()));
    row
}

fn template(key: &str, primary: &str, secondary: &str, description: &str) -> Vec<String> {
    let mut row = cells(&[key, primary, secondary, description, ""]);
    row.extend((5..=13).map(|idx| format!("t{idx}")));
    row
}

fn scenario_sources() -> SourceRows {
    SourceRows {
        detail: vec![
            cells(&["受注番号", "", "", "hValue"]),
            detail("DH001", "H1", ["FIX", "1150", "2170", "11", "2", "", "白", "現場搬入", ""]),
            detail("DH002", "H1", ["FIX", "900", "900", "1", "1", "", "", "", ""]),
            detail("DH001", "H2", ["FIX", "800", "800", "1", "1", "", "", "", ""]),
        ],
        orders: vec![
            cells(&["受注番号", "別番号", "客先", "現場", "担当", "承認", "受注日", "納期", "品名", "指示"]),
            cells(&["DH001", "K-10", "山田工務店", "港北", "鈴木", "田中", "2026-10-01", "45962", "網戸", "至急"]),
            cells(&["DH001", "K-10", "山田工務店", "港北", "鈴木", "田中", "2026-10-01", "45962", "雨戸", ""]),
        ],
        bom_template: vec![
            template("hValue", "材料コード", "部材コード", "品名"),
            template("H1", "M-100", "P-1", "アルミ枠"),
            template("H1", "M-200", "P-1", "ガラス"),
            template("H1", "M-100", "P-2", "アルミ枠(予備)"),
        ],
        control: vec![cells(&["受注番号"]), cells(&["DH000"]), cells(&["DH001"]), cells(&[""])],
    }
}

#[test]
fn unmatched_line_item_contributes_no_rows_and_is_reported() {
    let report = build_report(&scenario_sources(), &RequisitionConfig::default(), today()).unwrap();

    assert_eq!(report.order_id, "DH001");
    assert_eq!(report.rows.len(), 3);
    assert!(report.rows.iter().all(|row| row.sequence == 1));
    assert!(report.rows.iter().all(|row| row.join_key == "H1"));

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].join_key.as_deref(), Some("H2"));
    assert_eq!(report.diagnostics[0].sequence, Some(2));
}

#[test]
fn formulas_follow_line_item_dimensions() {
    let report = build_report(&scenario_sources(), &RequisitionConfig::default(), today()).unwrap();

    for row in &report.rows {
        assert!((row.quantity - 4.34).abs() < EPS);
        assert!((row.strand_total - 2.3).abs() < EPS);
        assert!((row.area_total - 54.901).abs() < EPS);
        assert_eq!(row.unit, "式");
        assert_eq!(row.note, "現場搬入");
    }

    let cells = report.rows[0].to_cells();
    assert_eq!(cells[0], "M-100");
    assert_eq!(cells[4], "FIX");
    assert_eq!(cells[5], "1150");
    assert_eq!(cells[8], "4.34");
    assert_eq!(cells[11], "式");
    assert_eq!(cells[12], "現場搬入");
    assert_eq!(cells[13], "2.3");
}

#[test]
fn summaries_exclude_placeholders_and_number_continuously() {
    let report = build_report(&scenario_sources(), &RequisitionConfig::default(), today()).unwrap();

    let primary: Vec<&str> = report.primary_summary.iter().map(|e| e.code.as_str()).collect();
    let secondary: Vec<&str> = report.secondary_summary.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(primary, vec!["M-100", "M-200"]);
    assert_eq!(secondary, vec!["P-1", "P-2"]);

    let sequences: Vec<usize> = report
        .primary_summary
        .iter()
        .chain(&report.secondary_summary)
        .map(|entry| entry.sequence)
        .collect();
    assert_eq!(sequences, vec![1, 2, 3, 4]);

    assert!((report.primary_summary[0].total - 8.68).abs() < EPS);
    assert_eq!(report.primary_summary[0].description, "アルミ枠");
    assert!((report.secondary_summary[0].total - 2.0 * 54.901).abs() < EPS);
}

#[test]
fn metadata_is_display_formatted() {
    let report = build_report(&scenario_sources(), &RequisitionConfig::default(), today()).unwrap();

    assert_eq!(report.alternate_id, "K-10");
    assert_eq!(report.customer_name, "山田工務店");
    assert_eq!(report.issued_on, "2026/10/19");
    assert_eq!(report.order_date, "2026/10/01");
    assert_eq!(report.delivery_date, "2025/11/01");
    assert_eq!(report.product_names, "網戸, 雨戸");
    assert_eq!(report.instructions, "至急");
    assert!(report.display_flags.has_color);
    assert!(!report.display_flags.has_specification);
    assert!(!report.display_flags.has_remarks);
}

#[test]
fn empty_control_column_is_not_found() {
    let mut sources = scenario_sources();
    sources.control = vec![cells(&[""]), cells(&[" "])];

    let err = build_report(&sources, &RequisitionConfig::default(), today()).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn order_without_line_items_yields_empty_report() {
    let mut sources = scenario_sources();
    sources.orders.push(cells(&["DH003", "K-30", "空"]));
    sources.control.push(cells(&["DH003"]));

    let report = build_report(&sources, &RequisitionConfig::default(), today()).unwrap();
    assert!(report.rows.is_empty());
    assert!(report.primary_summary.is_empty());
    assert!(report.secondary_summary.is_empty());
    assert!(report.diagnostics.is_empty());
}

#[test]
fn rebuilding_identical_input_is_byte_identical() {
    let sources = scenario_sources();
    let config = RequisitionConfig::default();

    let first = build_report(&sources, &config, today()).unwrap();
    let second = build_report(&sources, &config, today()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

fn write_csv(path: &std::path::Path, rows: &[Vec<String>]) {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .unwrap();
    for row in rows {
        writer.write_record(row).unwrap();
    }
    writer.flush().unwrap();
}

#[test]
fn csv_directory_source_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let sources = scenario_sources();
    write_csv(&dir.path().join("受注明細.csv"), &sources.detail);
    write_csv(&dir.path().join("受注一覧.csv"), &sources.orders);
    write_csv(&dir.path().join("BOMテンプレート.csv"), &sources.bom_template);
    write_csv(&dir.path().join("明細入力完了.csv"), &sources.control);

    let report =
        generate_requisition_report(dir.path(), &RequisitionConfig::default(), today()).unwrap();
    let expected = build_report(&sources, &RequisitionConfig::default(), today()).unwrap();
    assert_eq!(report, expected);

    let exported = export_requisition_report(&report, "csv").unwrap();
    fs::write(dir.path().join("out.csv"), &exported).unwrap();
    assert!(exported.contains("M-100"));
}
