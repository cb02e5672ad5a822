/// セルが空白かどうか判定
pub fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

/// 行が全て空白セルかどうか判定
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| is_blank(cell))
}

/// 指定列の値を取得（列が無い場合は空文字列）
pub fn cell_at(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|value| value.trim()).unwrap_or("")
}

/// 数値として解釈する。解釈できない場合は0
///
/// 全角数字・桁区切りのカンマを許容する。
pub fn parse_number(cell: &str) -> f64 {
    let normalized: String = cell
        .chars()
        .map(fullwidth_to_halfwidth)
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// 空・ゼロ・未入力の値かどうか
pub fn is_falsy(cell: &str) -> bool {
    let normalized: String = cell.chars().map(fullwidth_to_halfwidth).collect();
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return true;
    }
    matches!(trimmed.parse::<f64>(), Ok(value) if value == 0.0)
}

/// 左辺が空・ゼロなら既定値を返す
pub fn or_default_label<'a>(value: &'a str, default: &'a str) -> &'a str {
    if is_falsy(value) {
        default
    } else {
        value.trim()
    }
}

/// 全角文字を半角に変換
fn fullwidth_to_halfwidth(c: char) -> char {
    match c {
        '\u{3000}' => ' ',
        '\u{FF01}'..='\u{FF5E}' => char::from_u32((c as u32) - 0xFEE0).unwrap_or(c),
        _ => c,
    }
}
