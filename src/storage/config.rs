use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{AppError, DimensionBlock};

/// 読み込む4つの範囲名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RangeNames {
    pub detail: String,
    pub orders: String,
    pub bom_template: String,
    pub control: String,
}

impl Default for RangeNames {
    fn default() -> Self {
        Self {
            detail: "受注明細!A1:M".to_string(),
            orders: "受注一覧!A1:J".to_string(),
            bom_template: "BOMテンプレート!A1:N".to_string(),
            control: "明細入力完了!A1:A".to_string(),
        }
    }
}

/// 受注明細の列位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailColumns {
    pub order_id: usize,
    pub join_key: usize,
    /// 差し込む9項目（寸法ブロックの並び順）
    pub attributes: Vec<usize>,
}

impl Default for DetailColumns {
    fn default() -> Self {
        Self {
            order_id: 0,
            join_key: 3,
            attributes: (4..=12).collect(),
        }
    }
}

/// 受注一覧の列位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderColumns {
    pub primary_id: usize,
    pub alternate_id: usize,
    pub customer_name: usize,
    pub site_name: usize,
    pub person_in_charge: usize,
    pub approver: usize,
    pub order_date: usize,
    pub delivery_date: usize,
    pub product_names: usize,
    pub instructions: usize,
}

impl Default for OrderColumns {
    fn default() -> Self {
        Self {
            primary_id: 0,
            alternate_id: 1,
            customer_name: 2,
            site_name: 3,
            person_in_charge: 4,
            approver: 5,
            order_date: 6,
            delivery_date: 7,
            product_names: 8,
            instructions: 9,
        }
    }
}

/// BOMテンプレートの列位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateColumns {
    pub key: usize,
    /// ベース13列の先頭列
    pub base_start: usize,
}

impl Default for TemplateColumns {
    fn default() -> Self {
        Self {
            key: 0,
            base_start: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequisitionConfig {
    pub ranges: RangeNames,
    pub detail_columns: DetailColumns,
    pub order_columns: OrderColumns,
    pub template_columns: TemplateColumns,
    pub primary_placeholders: Vec<String>,
    pub secondary_placeholders: Vec<String>,
    pub default_unit: String,
    pub log_level: String,
}

impl Default for RequisitionConfig {
    fn default() -> Self {
        Self {
            ranges: RangeNames::default(),
            detail_columns: DetailColumns::default(),
            order_columns: OrderColumns::default(),
            template_columns: TemplateColumns::default(),
            primary_placeholders: to_strings(&["材料コード", "-", "ー", "なし"]),
            secondary_placeholders: to_strings(&["部材コード", "-", "ー", "なし"]),
            default_unit: "式".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl RequisitionConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.detail_columns.attributes.len() != DimensionBlock::LEN {
            return Err(EngineError::Config(format!(
                "差し込み列は{}列で指定してください（現在{}列）",
                DimensionBlock::LEN,
                self.detail_columns.attributes.len()
            )));
        }
        Ok(())
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// 設定ファイルを読み込む（ファイルが無い場合は既定値）
pub fn load_config(path: &Path) -> Result<RequisitionConfig, AppError> {
    if !path.exists() {
        log::debug!("設定ファイルが無いため既定値を使用します: {}", path.display());
        return Ok(RequisitionConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|err| AppError::new(format!("設定ファイルの読み込みに失敗しました: {err}")))?;

    let config: RequisitionConfig = serde_json::from_str(&content)
        .map_err(|err| AppError::new(format!("設定ファイルの解析に失敗しました: {err}")))?;

    config.validate()?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &RequisitionConfig) -> Result<(), AppError> {
    config.validate()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            AppError::new(format!("設定ディレクトリの作成に失敗しました: {err}"))
        })?;
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|err| AppError::new(format!("設定のエンコードに失敗しました: {err}")))?;

    fs::write(path, content)
        .map_err(|err| AppError::new(format!("設定ファイルの書き込みに失敗しました: {err}")))?;

    Ok(())
}
