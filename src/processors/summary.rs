use crate::models::{RequisitionRow, SummaryEntry};
use crate::utils::text::parse_number;

type Accessor = fn(&RequisitionRow) -> f64;

/// 材料コード集計で合計する値の候補（先頭から順に、ゼロでない最初の値を使う）
///
/// テンプレートの種類によって値の入る列が異なるため、固定の1列だけを合計すると取りこぼす。
const PRIMARY_TOTAL_CANDIDATES: [Accessor; 4] = [quantity, strand_total, area_total, unit_number];

fn quantity(row: &RequisitionRow) -> f64 {
    row.quantity
}

fn strand_total(row: &RequisitionRow) -> f64 {
    row.strand_total
}

fn area_total(row: &RequisitionRow) -> f64 {
    row.area_total
}

fn unit_number(row: &RequisitionRow) -> f64 {
    parse_number(&row.unit)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summaries {
    pub primary: Vec<SummaryEntry>,
    pub secondary: Vec<SummaryEntry>,
}

/// 材料請求行から材料コード別・部材コード別の集計を作る
///
/// 連番は材料コード集計の1から始まり、部材コード集計へ続けて振る。
pub fn summarize(
    rows: &[RequisitionRow],
    primary_placeholders: &[String],
    secondary_placeholders: &[String],
) -> Summaries {
    let primary_codes = distinct_codes(rows, |row| &row.primary_code, primary_placeholders);
    let secondary_codes = distinct_codes(rows, |row| &row.secondary_code, secondary_placeholders);

    let mut sequence = 0;
    let mut summaries = Summaries::default();

    for code in primary_codes {
        sequence += 1;
        summaries
            .primary
            .push(summary_entry(rows, code, sequence, resolve_primary_value));
    }

    for code in secondary_codes {
        sequence += 1;
        summaries
            .secondary
            .push(summary_entry(rows, code, sequence, area_total));
    }

    log::debug!(
        "集計: 材料コード{}件, 部材コード{}件",
        summaries.primary.len(),
        summaries.secondary.len()
    );

    summaries
}

/// 列の値を出現順に重複なく集める（空欄・見出し等のプレースホルダーは除く）
pub fn distinct_codes<F>(rows: &[RequisitionRow], column: F, placeholders: &[String]) -> Vec<String>
where
    F: Fn(&RequisitionRow) -> &String,
{
    let mut codes: Vec<String> = Vec::new();
    for row in rows {
        let code = column(row).trim();
        if code.is_empty() || placeholders.iter().any(|placeholder| placeholder.trim() == code) {
            continue;
        }
        if !codes.iter().any(|seen| seen == code) {
            codes.push(code.to_string());
        }
    }
    codes
}

/// 候補列を優先順に調べ、ゼロでない最初の値を返す
pub fn resolve_primary_value(row: &RequisitionRow) -> f64 {
    PRIMARY_TOTAL_CANDIDATES
        .iter()
        .map(|candidate| candidate(row))
        .find(|value| *value != 0.0 && value.is_finite())
        .unwrap_or(0.0)
}

fn summary_entry(rows: &[RequisitionRow], code: String, sequence: usize, value: Accessor) -> SummaryEntry {
    let matching: Vec<&RequisitionRow> = rows
        .iter()
        .filter(|row| row.primary_code.trim() == code || row.secondary_code.trim() == code)
        .collect();

    SummaryEntry {
        sequence,
        total: matching.iter().map(|row| value(row)).sum(),
        description: matching
            .first()
            .map(|row| row.description.clone())
            .unwrap_or_default(),
        code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DimensionBlock;

    fn row(primary: &str, secondary: &str, description: &str, values: (f64, f64, f64, &str)) -> RequisitionRow {
        RequisitionRow {
            sequence: 1,
            join_key: "H1".to_string(),
            primary_code: primary.to_string(),
            secondary_code: secondary.to_string(),
            description: description.to_string(),
            specification: String::new(),
            template_base: Vec::new(),
            dimensions: DimensionBlock::default(),
            quantity: values.0,
            strand_total: values.1,
            area_total: values.2,
            unit: values.3.to_string(),
            note: String::new(),
        }
    }

    fn placeholders(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_fallback_chain_priority() {
        assert_eq!(resolve_primary_value(&row("A", "", "", (1.5, 2.0, 3.0, "4"))), 1.5);
        assert_eq!(resolve_primary_value(&row("A", "", "", (0.0, 2.0, 3.0, "4"))), 2.0);
        assert_eq!(resolve_primary_value(&row("A", "", "", (0.0, 0.0, 3.0, "4"))), 3.0);
        assert_eq!(resolve_primary_value(&row("A", "", "", (0.0, 0.0, 0.0, "4"))), 4.0);
        assert_eq!(resolve_primary_value(&row("A", "", "", (0.0, 0.0, 0.0, "式"))), 0.0);
    }

    #[test]
    fn test_distinct_codes_keep_first_appearance_order() {
        let rows = vec![
            row("材料コード", "", "", (0.0, 0.0, 0.0, "")),
            row("Z", "", "", (0.0, 0.0, 0.0, "")),
            row("A", "", "", (0.0, 0.0, 0.0, "")),
            row(" Z ", "", "", (0.0, 0.0, 0.0, "")),
            row("-", "", "", (0.0, 0.0, 0.0, "")),
            row("M", "", "", (0.0, 0.0, 0.0, "")),
        ];

        let codes = distinct_codes(&rows, |row| &row.primary_code, &placeholders(&["材料コード", "-"]));
        assert_eq!(codes, vec!["Z".to_string(), "A".to_string(), "M".to_string()]);
    }

    #[test]
    fn test_summaries_and_continuous_sequence() {
        let rows = vec![
            row("M1", "P1", "アルミ枠", (2.0, 1.0, 10.0, "")),
            row("M2", "P1", "ガラス", (0.0, 0.0, 5.0, "")),
            row("M1", "P2", "アルミ枠2", (3.0, 0.0, 7.0, "")),
            row("", "M1", "パッキン", (0.0, 4.0, 1.0, "")),
        ];

        let summaries = summarize(&rows, &placeholders(&["材料コード"]), &placeholders(&["部材コード"]));

        let primary: Vec<(usize, &str, f64, &str)> = summaries
            .primary
            .iter()
            .map(|entry| (entry.sequence, entry.code.as_str(), entry.total, entry.description.as_str()))
            .collect();
        // M1 は部材コード列で一致する行も含む
        assert_eq!(primary, vec![(1, "M1", 9.0, "アルミ枠"), (2, "M2", 5.0, "ガラス")]);

        let secondary: Vec<(usize, &str, f64, &str)> = summaries
            .secondary
            .iter()
            .map(|entry| (entry.sequence, entry.code.as_str(), entry.total, entry.description.as_str()))
            .collect();
        assert_eq!(
            secondary,
            vec![
                (3, "P1", 15.0, "アルミ枠"),
                (4, "P2", 7.0, "アルミ枠2"),
                (5, "M1", 18.0, "アルミ枠"),
            ]
        );
    }

    #[test]
    fn test_empty_rows() {
        let summaries = summarize(&[], &[], &[]);
        assert!(summaries.primary.is_empty());
        assert!(summaries.secondary.is_empty());
    }
}
