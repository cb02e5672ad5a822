use crate::models::{format_number, AppError, ReportData, SummaryEntry};
use csv::WriterBuilder;

const ROW_HEADERS: [&str; 15] = [
    "No.",
    "材料コード",
    "部材コード",
    "品名",
    "仕様",
    "種別",
    "幅",
    "高さ",
    "本数",
    "数量",
    "単位(元)",
    "面積計",
    "単位",
    "備考",
    "本数計",
];

/// 材料請求データのCSVエクスポート
///
/// 材料請求行の後に空行を挟み、材料コード別・部材コード別の集計を続ける。
pub fn export_csv(report: &ReportData) -> Result<String, AppError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(Vec::new());

    let mut write = |record: Vec<String>| {
        writer
            .write_record(&record)
            .map_err(|e| AppError::new(format!("CSV書き込みエラー: {}", e)))
    };

    // 材料請求行
    write(ROW_HEADERS.iter().map(|h| h.to_string()).collect())?;
    for row in &report.rows {
        let mut output_row = vec![row.sequence.to_string()];
        output_row.extend(row.to_cells());
        write(output_row)?;
    }

    // 集計
    write(vec![String::new()])?;
    write(vec![
        "No.".to_string(),
        "コード".to_string(),
        "合計".to_string(),
        "品名".to_string(),
    ])?;
    for entry in report.primary_summary.iter().chain(&report.secondary_summary) {
        write(summary_record(entry))?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| AppError::new(format!("CSVバッファ取得エラー: {}", e)))?;

    let csv_string =
        String::from_utf8(data).map_err(|e| AppError::new(format!("UTF-8変換エラー: {}", e)))?;

    // UTF-8 BOMを先頭に追加
    Ok(format!("\u{FEFF}{}", csv_string))
}

fn summary_record(entry: &SummaryEntry) -> Vec<String> {
    vec![
        entry.sequence.to_string(),
        entry.code.clone(),
        format_number(entry.total),
        entry.description.clone(),
    ]
}
