pub mod address;
mod csv;
mod excel;

use std::collections::HashMap;
use std::path::Path;

use crate::error::SourceError;

pub use self::csv::CsvDirectoryReader;
pub use self::excel::WorkbookReader;

/// 名前付き範囲を読み込み、行ごとのセル値を返す
///
/// 4つの範囲は並行して読み込まれるため `Sync` が必要。
pub trait RangeReader: Sync {
    fn read_range(&self, name: &str) -> Result<Vec<Vec<String>>, SourceError>;
}

/// メモリ上の範囲（範囲名 → 行）
#[derive(Debug, Clone, Default)]
pub struct StaticRanges {
    ranges: HashMap<String, Vec<Vec<String>>>,
}

impl StaticRanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, rows: Vec<Vec<String>>) {
        self.ranges.insert(name.into(), rows);
    }

    pub fn with(mut self, name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        self.insert(name, rows);
        self
    }
}

impl RangeReader for StaticRanges {
    fn read_range(&self, name: &str) -> Result<Vec<Vec<String>>, SourceError> {
        self.ranges
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::RangeNotFound(name.to_string()))
    }
}

/// パスからデータソースを開く
///
/// ディレクトリはシート別CSV、拡張子がワークブック形式ならcalamineで読み込む。
pub fn open_source(path: &Path) -> Result<Box<dyn RangeReader>, SourceError> {
    if !path.exists() {
        return Err(SourceError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("ファイルが見つかりません: {}", path.display()),
        )));
    }

    if path.is_dir() {
        return Ok(Box::new(CsvDirectoryReader::new(path)));
    }

    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or_else(|| SourceError::UnsupportedSource(path.display().to_string()))?;

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Box::new(WorkbookReader::new(path))),
        other => Err(SourceError::UnsupportedSource(other.to_string())),
    }
}
