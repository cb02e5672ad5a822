use std::collections::HashMap;

use crate::models::{BomTemplateRow, Diagnostic, DimensionBlock, LineItem, RequisitionRow};
use crate::storage::config::TemplateColumns;
use crate::utils::text::{cell_at, is_blank, or_default_label, parse_number};

/// BOM展開の結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    pub rows: Vec<RequisitionRow>,
    pub diagnostics: Vec<Diagnostic>,
}

/// BOMテンプレート範囲を行データに変換する（キーが空の行は除く）
pub fn parse_templates(rows: &[Vec<String>], columns: &TemplateColumns) -> Vec<BomTemplateRow> {
    rows.iter()
        .filter(|row| !is_blank(cell_at(row, columns.key)))
        .map(|row| BomTemplateRow {
            key: cell_at(row, columns.key).to_string(),
            base: (0..BomTemplateRow::BASE_LEN)
                .map(|offset| cell_at(row, columns.base_start + offset).to_string())
                .collect(),
        })
        .collect()
}

/// 明細ごとに一致するテンプレート行を全て展開する
///
/// # 引数
/// * `items` - 受注明細（連番順）
/// * `templates` - BOMテンプレート行
/// * `default_unit` - 単位が空・ゼロのときに使う単位
///
/// # 戻り値
/// 明細順 → テンプレート出現順の材料請求行と、一致しなかった明細の警告
pub fn expand_line_items(
    items: &[LineItem],
    templates: &[BomTemplateRow],
    default_unit: &str,
) -> Expansion {
    let mut by_key: HashMap<&str, Vec<&BomTemplateRow>> = HashMap::new();
    for template in templates {
        by_key.entry(template.key.as_str()).or_default().push(template);
    }

    let mut expansion = Expansion::default();

    for item in items {
        let matches = by_key
            .get(item.join_key.as_str())
            .filter(|_| !item.join_key.is_empty());

        let Some(matches) = matches else {
            let message = format!(
                "{}行目: hValue '{}' に一致するBOMテンプレートがありません。",
                item.sequence, item.join_key
            );
            log::warn!("{message}");
            expansion.diagnostics.push(Diagnostic {
                message,
                sequence: Some(item.sequence),
                join_key: Some(item.join_key.clone()),
                severity: "warning".to_string(),
            });
            continue;
        };

        for template in matches {
            expansion.rows.push(
                RequisitionRowBuilder::new(template, item)
                    .default_unit(default_unit)
                    .build(),
            );
        }
    }

    log::debug!(
        "BOM展開: 明細{}行 → 材料請求{}行（未一致{}件）",
        items.len(),
        expansion.rows.len(),
        expansion.diagnostics.len()
    );

    expansion
}

/// 寸法ブロックから読み取った数値（mm）
#[derive(Debug, Clone, Copy, PartialEq)]
struct Measurements {
    width_mm: f64,
    height_mm: f64,
    strand_count: f64,
    set_count: f64,
}

impl Measurements {
    fn from_block(block: &DimensionBlock) -> Self {
        Self {
            width_mm: parse_number(&block.width),
            height_mm: parse_number(&block.height),
            strand_count: parse_number(&block.strand_count),
            set_count: parse_number(&block.set_count),
        }
    }

    fn quantity(&self) -> f64 {
        (self.height_mm / 1000.0) * self.set_count
    }

    fn strand_total(&self) -> f64 {
        (self.width_mm / 1000.0) * self.set_count
    }

    fn area_total(&self) -> f64 {
        (self.width_mm * self.height_mm * self.strand_count / 1_000_000.0) * self.set_count
    }
}

/// テンプレート行と明細から材料請求行を組み立てる
pub struct RequisitionRowBuilder<'a> {
    template: &'a BomTemplateRow,
    item: &'a LineItem,
    default_unit: &'a str,
}

impl<'a> RequisitionRowBuilder<'a> {
    pub const DEFAULT_UNIT: &'static str = "式";

    pub fn new(template: &'a BomTemplateRow, item: &'a LineItem) -> Self {
        Self {
            template,
            item,
            default_unit: Self::DEFAULT_UNIT,
        }
    }

    pub fn default_unit(mut self, unit: &'a str) -> Self {
        self.default_unit = unit;
        self
    }

    pub fn build(self) -> RequisitionRow {
        let dimensions = self.item.dimensions.clone();
        let measurements = Measurements::from_block(&dimensions);

        RequisitionRow {
            sequence: self.item.sequence,
            join_key: self.item.join_key.clone(),
            primary_code: self.template.primary_code().to_string(),
            secondary_code: self.template.secondary_code().to_string(),
            description: self.template.description().to_string(),
            specification: self.template.specification().to_string(),
            template_base: self.template.base.clone(),
            quantity: measurements.quantity(),
            strand_total: measurements.strand_total(),
            area_total: measurements.area_total(),
            unit: or_default_label(&dimensions.unit, self.default_unit).to_string(),
            note: dimensions.note.trim().to_string(),
            dimensions,
        }
    }
}
