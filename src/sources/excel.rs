use std::path::PathBuf;

use calamine::{open_workbook_auto, DataType, Reader};

use crate::error::SourceError;
use crate::utils::date::{format_display_date, serial_to_date};

use super::address::{resolve_defined_name, RangeAddress};
use super::RangeReader;

/// ワークブック（xlsx/xlsm/xls/ods）から範囲を読み込む
///
/// 読み込みごとにファイルを開くため、複数の範囲を並行して読み込める。
pub struct WorkbookReader {
    path: PathBuf,
}

impl WorkbookReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RangeReader for WorkbookReader {
    fn read_range(&self, name: &str) -> Result<Vec<Vec<String>>, SourceError> {
        let mut workbook = open_workbook_auto(&self.path)?;

        let target = resolve_defined_name(name, workbook.defined_names())
            .unwrap_or_else(|| name.to_string());
        let address = RangeAddress::parse(&target)?;

        let sheet_name = match &address.sheet {
            Some(sheet) => sheet.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| SourceError::RangeNotFound(name.to_string()))?,
        };

        if !workbook.sheet_names().contains(&sheet_name) {
            return Err(SourceError::RangeNotFound(name.to_string()));
        }
        let range = workbook.worksheet_range(&sheet_name)?;

        log::debug!(
            "範囲を読み込みました: {} -> {}!{:?}",
            name,
            sheet_name,
            range.end()
        );

        Ok(address.extract(range.end(), |row, col| {
            range
                .get_value((row, col))
                .map(data_type_to_string)
                .unwrap_or_default()
        }))
    }
}

fn data_type_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(s) => s.trim().to_string(),
        DataType::Float(f) => {
            if f.fract().abs() < f64::EPSILON {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        DataType::Int(v) => v.to_string(),
        DataType::Bool(v) => v.to_string(),
        DataType::DateTime(serial) => serial_to_date(*serial)
            .map(format_display_date)
            .unwrap_or_else(|| cell.to_string()),
        DataType::Error(_) => String::new(),
        _ => cell.to_string(),
    }
}
