pub mod error;
pub mod logging;
pub mod models;
pub mod processors;
pub mod sources;
pub mod storage;
pub mod utils;

mod exporters;

use std::path::Path;

use chrono::NaiveDate;

use models::{AppError, ReportData};
use storage::config::RequisitionConfig;

pub use processors::{build_report, fetch_sources, generate_report, SourceRows};

/// データソースから材料請求データを作成する
///
/// # 引数
/// * `source` - ワークブック（xlsx等）またはシート別CSVのディレクトリ
/// * `config` - 範囲名・列位置などの設定
/// * `today` - 発行日
///
/// # 戻り値
/// 帳票描画用の材料請求データ
pub fn generate_requisition_report(
    source: &Path,
    config: &RequisitionConfig,
    today: NaiveDate,
) -> Result<ReportData, AppError> {
    let reader = sources::open_source(source).map_err(error::EngineError::from)?;
    Ok(generate_report(&*reader, config, today)?)
}

/// 材料請求データをエクスポート
///
/// # 引数
/// * `report` - 材料請求データ
/// * `format` - 出力フォーマット（"csv", "json"）
///
/// # 戻り値
/// エクスポートされたファイル内容（文字列）
pub fn export_requisition_report(report: &ReportData, format: &str) -> Result<String, AppError> {
    exporters::export_report(report, format)
}

pub fn load_config(path: &Path) -> Result<RequisitionConfig, AppError> {
    storage::config::load_config(path)
}

pub fn save_config(path: &Path, config: &RequisitionConfig) -> Result<(), AppError> {
    storage::config::save_config(path, config)
}
