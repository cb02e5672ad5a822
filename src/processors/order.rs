use crate::error::EngineError;
use crate::models::OrderRecord;
use crate::storage::config::OrderColumns;
use crate::utils::text::{cell_at, is_blank};

/// 明細入力完了列の最後の入力値を処理対象の受注番号とする
pub fn resolve_order_id(control_rows: &[Vec<String>]) -> Result<String, EngineError> {
    control_rows
        .iter()
        .rev()
        .map(|row| cell_at(row, 0))
        .find(|value| !is_blank(value))
        .map(str::to_string)
        .ok_or(EngineError::OrderIdNotFound)
}

/// 受注一覧から受注データを検索する
///
/// 先頭のヘッダー行を除き、受注番号列 → 別番号列の順に一致する行を探す。
/// 品名・指示事項は受注番号列または別番号列が一致する全行から集める。
///
/// # 引数
/// * `order_rows` - 受注一覧（ヘッダー行を含む）
/// * `order_id` - 処理対象の受注番号
/// * `columns` - 受注一覧の列位置
pub fn find_order_record(
    order_rows: &[Vec<String>],
    order_id: &str,
    columns: &OrderColumns,
) -> Result<OrderRecord, EngineError> {
    let data_rows = order_rows.get(1..).unwrap_or(&[]);
    let target = order_id.trim();

    let row = [columns.primary_id, columns.alternate_id]
        .into_iter()
        .find_map(|column| data_rows.iter().find(|row| cell_at(row, column) == target))
        .ok_or_else(|| EngineError::OrderRecordNotFound(target.to_string()))?;

    let sharing: Vec<&Vec<String>> = data_rows
        .iter()
        .filter(|row| {
            cell_at(row, columns.primary_id) == target
                || cell_at(row, columns.alternate_id) == target
        })
        .collect();

    Ok(OrderRecord {
        order_id: cell_at(row, columns.primary_id).to_string(),
        alternate_id: cell_at(row, columns.alternate_id).to_string(),
        customer_name: cell_at(row, columns.customer_name).to_string(),
        site_name: cell_at(row, columns.site_name).to_string(),
        person_in_charge: cell_at(row, columns.person_in_charge).to_string(),
        approver: cell_at(row, columns.approver).to_string(),
        order_date: cell_at(row, columns.order_date).to_string(),
        delivery_date: cell_at(row, columns.delivery_date).to_string(),
        product_names: collect_distinct(&sharing, columns.product_names),
        instructions: collect_distinct(&sharing, columns.instructions),
    })
}

/// 複数行の同じ列から空でない値を出現順に重複なく集める
fn collect_distinct(rows: &[&Vec<String>], column: usize) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for row in rows {
        let value = cell_at(row, column);
        if !value.is_empty() && !values.iter().any(|seen| seen == value) {
            values.push(value.to_string());
        }
    }
    values
}
