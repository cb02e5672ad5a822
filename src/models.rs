use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EngineError;

/// 明細行から差し込む9項目の寸法属性
///
/// 並び順は差し込み先の列順と一致する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionBlock {
    pub product_type: String,
    pub width: String,
    pub height: String,
    pub strand_count: String,
    pub set_count: String,
    pub unit: String,
    pub color: String,
    pub note: String,
    pub remarks: String,
}

impl DimensionBlock {
    pub const LEN: usize = 9;

    /// 列順の値から組み立てる（不足分は空文字列）
    pub fn from_values(values: &[String]) -> Self {
        let get = |idx: usize| values.get(idx).cloned().unwrap_or_default();
        Self {
            product_type: get(0),
            width: get(1),
            height: get(2),
            strand_count: get(3),
            set_count: get(4),
            unit: get(5),
            color: get(6),
            note: get(7),
            remarks: get(8),
        }
    }

    pub fn to_values(&self) -> [String; Self::LEN] {
        [
            self.product_type.clone(),
            self.width.clone(),
            self.height.clone(),
            self.strand_count.clone(),
            self.set_count.clone(),
            self.unit.clone(),
            self.color.clone(),
            self.note.clone(),
            self.remarks.clone(),
        ]
    }
}

/// 受注番号で絞り込んだ受注明細の1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// 出現順の連番（1始まり）
    pub sequence: usize,
    pub join_key: String,
    pub dimensions: DimensionBlock,
    pub source_row: Vec<String>,
}

/// BOMテンプレートの1行（キー列 + 13列のベース）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomTemplateRow {
    pub key: String,
    pub base: Vec<String>,
}

impl BomTemplateRow {
    pub const BASE_LEN: usize = 13;

    pub fn primary_code(&self) -> &str {
        self.base_value(0)
    }

    pub fn secondary_code(&self) -> &str {
        self.base_value(1)
    }

    pub fn description(&self) -> &str {
        self.base_value(2)
    }

    pub fn specification(&self) -> &str {
        self.base_value(3)
    }

    fn base_value(&self, idx: usize) -> &str {
        self.base.get(idx).map(String::as_str).unwrap_or("")
    }
}

/// BOM展開後の材料請求行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionRow {
    pub sequence: usize,
    pub join_key: String,
    pub primary_code: String,
    pub secondary_code: String,
    pub description: String,
    pub specification: String,
    /// テンプレートのベース13列（差し込み前）
    pub template_base: Vec<String>,
    pub dimensions: DimensionBlock,
    pub quantity: f64,
    pub strand_total: f64,
    pub area_total: f64,
    pub unit: String,
    pub note: String,
}

impl RequisitionRow {
    pub const QUANTITY_COLUMN: usize = 8;
    pub const AREA_TOTAL_COLUMN: usize = 10;
    pub const UNIT_COLUMN: usize = 11;
    pub const NOTE_COLUMN: usize = 12;
    /// 13列のベースに収まらないため末尾に追加する
    pub const STRAND_TOTAL_COLUMN: usize = 13;

    /// 帳票用の位置ベースの列配列に変換する
    ///
    /// ベース13列の 4..=12 を寸法ブロックで上書きし、計算列を所定の位置に書き込む。
    pub fn to_cells(&self) -> Vec<String> {
        let mut cells: Vec<String> = (0..BomTemplateRow::BASE_LEN)
            .map(|idx| self.template_base.get(idx).cloned().unwrap_or_default())
            .collect();

        for (offset, value) in self.dimensions.to_values().into_iter().enumerate() {
            cells[4 + offset] = value;
        }

        cells[Self::QUANTITY_COLUMN] = format_number(self.quantity);
        cells[Self::AREA_TOTAL_COLUMN] = format_number(self.area_total);
        cells[Self::UNIT_COLUMN] = self.unit.clone();
        cells[Self::NOTE_COLUMN] = self.note.clone();
        cells.push(format_number(self.strand_total));
        cells
    }
}

/// コード別の集計行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    pub sequence: usize,
    pub code: String,
    pub total: f64,
    pub description: String,
}

/// 受注一覧から解決した受注データ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_id: String,
    pub alternate_id: String,
    pub customer_name: String,
    pub site_name: String,
    pub person_in_charge: String,
    pub approver: String,
    pub order_date: String,
    pub delivery_date: String,
    /// 同じ受注番号の全行から集めた品名
    pub product_names: Vec<String>,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayFlags {
    pub has_specification: bool,
    pub has_color: bool,
    pub has_remarks: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub message: String,
    pub sequence: Option<usize>,
    pub join_key: Option<String>,
    pub severity: String, // "error", "warning", "info"
}

/// 帳票描画に渡す最終データ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub order_id: String,
    pub alternate_id: String,
    pub customer_name: String,
    pub site_name: String,
    pub person_in_charge: String,
    pub approver: String,
    pub order_date: String,
    pub delivery_date: String,
    pub issued_on: String,
    pub product_names: String,
    pub instructions: String,
    pub rows: Vec<RequisitionRow>,
    pub primary_summary: Vec<SummaryEntry>,
    pub secondary_summary: Vec<SummaryEntry>,
    pub display_flags: DisplayFlags,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppError {
    pub message: String,
}

impl AppError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::new(err.to_string())
    }
}

/// 数値セルの表示（整数は小数点なし）
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}
