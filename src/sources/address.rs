use crate::error::SourceError;
use crate::utils::text::is_blank_row;

/// A1形式の範囲指定（例: `受注一覧!A2:J`, `'Sheet 1'!$A$1:$C$10`）
///
/// 行・列はいずれも0始まりの絶対位置。終端が省略された場合はデータの末尾まで。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeAddress {
    pub sheet: Option<String>,
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: Option<u32>,
    pub last_col: Option<u32>,
}

impl RangeAddress {
    pub fn whole_sheet(sheet: Option<String>) -> Self {
        Self {
            sheet,
            first_row: 0,
            first_col: 0,
            last_row: None,
            last_col: None,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, SourceError> {
        let trimmed = raw.trim().trim_start_matches('=');
        if trimmed.is_empty() {
            return Err(SourceError::InvalidAddress(raw.to_string()));
        }

        let (sheet, cells) = match trimmed.rfind('!') {
            Some(idx) => (Some(unquote_sheet(&trimmed[..idx])), &trimmed[idx + 1..]),
            None => (None, trimmed),
        };

        if let Some(sheet_name) = &sheet {
            if sheet_name.is_empty() {
                return Err(SourceError::InvalidAddress(raw.to_string()));
            }
        }

        match parse_cells(cells) {
            Some((first, last)) => Ok(Self {
                sheet,
                first_row: first.row.unwrap_or(0),
                first_col: first.col.unwrap_or(0),
                last_row: last.row,
                last_col: last.col,
            }),
            // シート名のみの指定
            None if sheet.is_none() => Ok(Self::whole_sheet(Some(unquote_sheet(cells)))),
            None => Err(SourceError::InvalidAddress(raw.to_string())),
        }
    }

    /// データ範囲から指定範囲を切り出す
    ///
    /// # 引数
    /// * `extent` - データが存在する最終セル（行, 列）。空のシートは `None`
    /// * `cell` - 絶対位置のセル値を返す関数
    ///
    /// # 戻り値
    /// 行ごとのセル値。列終端が指定されている場合は空文字列で幅を揃え、末尾の空行は除く。
    pub fn extract<F>(&self, extent: Option<(u32, u32)>, cell: F) -> Vec<Vec<String>>
    where
        F: Fn(u32, u32) -> String,
    {
        let Some((max_row, max_col)) = extent else {
            return Vec::new();
        };

        let last_row = self.last_row.map_or(max_row, |row| row.min(max_row));
        let last_col = self.last_col.unwrap_or(max_col);
        if self.first_row > last_row || self.first_col > last_col {
            return Vec::new();
        }

        let mut rows: Vec<Vec<String>> = (self.first_row..=last_row)
            .map(|row| {
                (self.first_col..=last_col)
                    .map(|col| {
                        if col > max_col {
                            String::new()
                        } else {
                            cell(row, col)
                        }
                    })
                    .collect()
            })
            .collect();

        while rows.last().is_some_and(|last| is_blank_row(last)) {
            rows.pop();
        }

        rows
    }
}

/// 名前付き範囲を参照先の範囲指定に解決する（大文字小文字は区別しない）
pub fn resolve_defined_name(name: &str, defined_names: &[(String, String)]) -> Option<String> {
    let wanted = name.trim().to_lowercase();
    defined_names
        .iter()
        .find(|(defined, _)| defined.to_lowercase() == wanted)
        .map(|(_, formula)| formula.trim_start_matches('=').to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRef {
    row: Option<u32>,
    col: Option<u32>,
}

fn parse_cells(cells: &str) -> Option<(CellRef, CellRef)> {
    match cells.split_once(':') {
        Some((start, end)) => {
            let first = parse_cell_ref(start)?;
            let last = parse_cell_ref(end)?;
            Some((first, last))
        }
        None => {
            let single = parse_cell_ref(cells)?;
            // 単一セル指定は行・列ともに必要
            single.row?;
            single.col?;
            Some((single, single))
        }
    }
}

fn parse_cell_ref(raw: &str) -> Option<CellRef> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '$').collect();
    if cleaned.is_empty() {
        return None;
    }

    let letters: String = cleaned
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    let digits = &cleaned[letters.len()..];

    if !digits.chars().all(|c| c.is_ascii_digit()) || letters.len() > 3 {
        return None;
    }

    let col = if letters.is_empty() {
        None
    } else {
        Some(column_index(&letters)?)
    };

    let row = if digits.is_empty() {
        None
    } else {
        let number = digits.parse::<u32>().ok()?;
        if number == 0 {
            return None;
        }
        Some(number - 1)
    };

    if row.is_none() && col.is_none() {
        return None;
    }

    Some(CellRef { row, col })
}

/// 列記号を0始まりの列番号に変換（A → 0, AA → 26）
pub fn column_index(letters: &str) -> Option<u32> {
    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let value = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        index = index.checked_mul(26)?.checked_add(value)?;
    }
    index.checked_sub(1)
}

fn unquote_sheet(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('\'') && trimmed.ends_with('\'') {
        trimmed[1..trimmed.len() - 1].replace("''", "'")
    } else {
        trimmed.to_string()
    }
}
