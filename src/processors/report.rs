use chrono::NaiveDate;

use crate::models::{Diagnostic, DisplayFlags, OrderRecord, ReportData, RequisitionRow};
use crate::utils::date::{display_date, format_display_date};
use crate::utils::text::is_blank;

use super::summary::Summaries;

/// 受注データ・材料請求行・集計を帳票データにまとめる
pub fn assemble_report(
    order: OrderRecord,
    rows: Vec<RequisitionRow>,
    summaries: Summaries,
    diagnostics: Vec<Diagnostic>,
    today: NaiveDate,
) -> ReportData {
    let display_flags = display_flags(&rows);

    ReportData {
        issued_on: format_display_date(today),
        order_date: display_date(&order.order_date),
        delivery_date: display_date(&order.delivery_date),
        product_names: order.product_names.join(", "),
        instructions: order.instructions.join("\n"),
        order_id: order.order_id,
        alternate_id: order.alternate_id,
        customer_name: order.customer_name,
        site_name: order.site_name,
        person_in_charge: order.person_in_charge,
        approver: order.approver,
        rows,
        primary_summary: summaries.primary,
        secondary_summary: summaries.secondary,
        display_flags,
        diagnostics,
    }
}

/// 任意列（仕様・色・備考）を表示するかどうか
pub fn display_flags(rows: &[RequisitionRow]) -> DisplayFlags {
    DisplayFlags {
        has_specification: rows.iter().any(|row| !is_blank(&row.specification)),
        has_color: rows.iter().any(|row| !is_blank(&row.dimensions.color)),
        has_remarks: rows.iter().any(|row| !is_blank(&row.dimensions.remarks)),
    }
}
