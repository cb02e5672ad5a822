pub mod csv;

use crate::models::{AppError, ReportData};

/// 材料請求データをエクスポート
///
/// ReportDataから指定されたフォーマット（"CSV" / "JSON"）で出力します
pub fn export_report(report: &ReportData, format: &str) -> Result<String, AppError> {
    match format.to_uppercase().as_str() {
        "CSV" => csv::export_csv(report),
        "JSON" => serde_json::to_string_pretty(report)
            .map_err(|e| AppError::new(format!("JSONエンコードエラー: {}", e))),
        other => Err(AppError::new(format!(
            "未対応のエクスポート形式です: {}",
            other
        ))),
    }
}
