use crate::models::{DimensionBlock, LineItem};
use crate::storage::config::DetailColumns;
use crate::utils::text::cell_at;

/// 受注明細から対象受注の行を抜き出す
///
/// ヘッダー行を除き、受注番号が一致する行を元の順序のまま連番（1始まり）を振って返す。
/// 一致しない場合は空のリスト。
pub fn extract_line_items(
    detail_rows: &[Vec<String>],
    order_id: &str,
    columns: &DetailColumns,
) -> Vec<LineItem> {
    let target = order_id.trim();

    detail_rows
        .iter()
        .skip(1)
        .filter(|row| cell_at(row, columns.order_id) == target)
        .enumerate()
        .map(|(idx, row)| {
            let values: Vec<String> = columns
                .attributes
                .iter()
                .map(|&column| cell_at(row, column).to_string())
                .collect();

            LineItem {
                sequence: idx + 1,
                join_key: cell_at(row, columns.join_key).to_string(),
                dimensions: DimensionBlock::from_values(&values),
                source_row: row.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_row(order_id: &str, key: &str, width: &str) -> Vec<String> {
        let mut row = vec![order_id.to_string(), String::new(), String::new(), key.to_string()];
        row.extend(["FIX", width, "2170", "11", "2", "", "白", "備考", ""].map(String::from));
        row
    }

    #[test]
    fn test_filters_and_numbers_in_source_order() {
        let rows = vec![
            detail_row("受注番号", "hValue", "幅"),
            detail_row("DH001", "H1", "1150"),
            detail_row("DH002", "H9", "900"),
            detail_row("DH001", "H2", "800"),
        ];

        let items = extract_line_items(&rows, "DH001", &DetailColumns::default());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].sequence, 1);
        assert_eq!(items[0].join_key, "H1");
        assert_eq!(items[0].dimensions.width, "1150");
        assert_eq!(items[0].dimensions.note, "備考");
        assert_eq!(items[1].sequence, 2);
        assert_eq!(items[1].join_key, "H2");
        assert_eq!(items[1].dimensions.width, "800");
    }

    #[test]
    fn test_short_rows_default_to_empty() {
        let rows = vec![
            vec!["header".to_string()],
            vec!["DH001".to_string(), "".to_string(), "".to_string(), "H1".to_string(), "FIX".to_string()],
        ];

        let items = extract_line_items(&rows, "DH001", &DetailColumns::default());

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].dimensions.product_type, "FIX");
        assert_eq!(items[0].dimensions.width, "");
        assert_eq!(items[0].dimensions.remarks, "");
    }

    #[test]
    fn test_no_matching_rows() {
        let rows = vec![detail_row("受注番号", "hValue", "幅"), detail_row("DH002", "H1", "1")];
        assert!(extract_line_items(&rows, "DH001", &DetailColumns::default()).is_empty());
    }
}
