use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use crate::error::SourceError;

use super::address::RangeAddress;
use super::RangeReader;

/// シートごとのCSV（`<シート名>.csv`）を置いたディレクトリから範囲を読み込む
pub struct CsvDirectoryReader {
    dir: PathBuf,
}

impl CsvDirectoryReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.dir.join(format!("{sheet}.csv"))
    }
}

impl RangeReader for CsvDirectoryReader {
    fn read_range(&self, name: &str) -> Result<Vec<Vec<String>>, SourceError> {
        let address = RangeAddress::parse(name)?;
        let sheet = address
            .sheet
            .as_deref()
            .ok_or_else(|| SourceError::RangeNotFound(name.to_string()))?;

        let path = self.sheet_path(sheet);
        if !path.exists() {
            return Err(SourceError::RangeNotFound(name.to_string()));
        }

        let grid = read_csv_grid(&path)?;
        let extent = grid_extent(&grid);

        Ok(address.extract(extent, |row, col| {
            grid.get(row as usize)
                .and_then(|cells| cells.get(col as usize))
                .map(|cell| cell.trim().to_string())
                .unwrap_or_default()
        }))
    }
}

pub fn read_csv_grid(path: &Path) -> Result<Vec<Vec<String>>, SourceError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().map(|cell| cell.to_string()).collect();
        // 先頭セルのUTF-8 BOMを除く
        if rows.is_empty() {
            if let Some(first) = row.first_mut() {
                *first = first.trim_start_matches('\u{FEFF}').to_string();
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

fn grid_extent(grid: &[Vec<String>]) -> Option<(u32, u32)> {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    if grid.is_empty() || width == 0 {
        return None;
    }
    Some(((grid.len() - 1) as u32, (width - 1) as u32))
}
