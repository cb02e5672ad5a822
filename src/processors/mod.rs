pub mod expansion;
pub mod line_items;
pub mod order;
pub mod report;
pub mod summary;

use chrono::NaiveDate;

use crate::error::{EngineError, SourceError};
use crate::models::ReportData;
use crate::sources::RangeReader;
use crate::storage::config::{RangeNames, RequisitionConfig};

/// 読み込んだ4つの範囲
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRows {
    pub detail: Vec<Vec<String>>,
    pub orders: Vec<Vec<String>>,
    pub bom_template: Vec<Vec<String>>,
    pub control: Vec<Vec<String>>,
}

/// 4つの範囲を並行して読み込む（いずれかが失敗したら全体を失敗とする）
pub fn fetch_sources<R>(reader: &R, ranges: &RangeNames) -> Result<SourceRows, SourceError>
where
    R: RangeReader + ?Sized,
{
    let ((detail, orders), (bom_template, control)) = rayon::join(
        || {
            rayon::join(
                || reader.read_range(&ranges.detail),
                || reader.read_range(&ranges.orders),
            )
        },
        || {
            rayon::join(
                || reader.read_range(&ranges.bom_template),
                || reader.read_range(&ranges.control),
            )
        },
    );

    Ok(SourceRows {
        detail: detail?,
        orders: orders?,
        bom_template: bom_template?,
        control: control?,
    })
}

/// 読み込み済みの範囲から帳票データを作る
///
/// 入力と `today` が同じなら常に同じ結果を返す。
///
/// # 引数
/// * `sources` - 受注明細・受注一覧・BOMテンプレート・明細入力完了の各範囲
/// * `config` - 列位置・プレースホルダー等の設定
/// * `today` - 発行日として表示する日付
pub fn build_report(
    sources: &SourceRows,
    config: &RequisitionConfig,
    today: NaiveDate,
) -> Result<ReportData, EngineError> {
    config.validate()?;

    let order_id = order::resolve_order_id(&sources.control)?;
    let order = order::find_order_record(&sources.orders, &order_id, &config.order_columns)?;
    log::debug!("受注番号 {} を処理します", order_id);

    let items = line_items::extract_line_items(&sources.detail, &order_id, &config.detail_columns);
    if items.is_empty() {
        log::warn!("受注番号 {} の明細がありません", order_id);
    }

    let templates = expansion::parse_templates(&sources.bom_template, &config.template_columns);
    let expanded = expansion::expand_line_items(&items, &templates, &config.default_unit);

    let summaries = summary::summarize(
        &expanded.rows,
        &config.primary_placeholders,
        &config.secondary_placeholders,
    );

    let report = report::assemble_report(order, expanded.rows, summaries, expanded.diagnostics, today);
    log::info!(
        "材料請求データを作成しました: 受注番号 {}, {}行, 警告{}件",
        report.order_id,
        report.rows.len(),
        report.diagnostics.len()
    );

    Ok(report)
}

/// 範囲を読み込んで帳票データを作る
pub fn generate_report<R>(
    reader: &R,
    config: &RequisitionConfig,
    today: NaiveDate,
) -> Result<ReportData, EngineError>
where
    R: RangeReader + ?Sized,
{
    let sources = fetch_sources(reader, &config.ranges)?;
    build_report(&sources, config, today)
}
