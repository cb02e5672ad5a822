use chrono::{Duration, NaiveDate, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%Y/%m/%d";

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y年%m月%d日"];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];

/// 表計算のシリアル値として扱う範囲（1900年〜2199年程度）
const SERIAL_RANGE: std::ops::RangeInclusive<f64> = 1.0..=109_574.0;

/// 帳票の日付表示（YYYY/MM/DD）
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// セルの日付文字列を表示用に整形する
///
/// 解釈できない値はそのまま（前後の空白のみ除去）返す。
pub fn display_date(raw: &str) -> String {
    let trimmed = raw.trim();
    match parse_cell_date(trimmed) {
        Some(date) => format_display_date(date),
        None => trimmed.to_string(),
    }
}

pub fn parse_cell_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }

    let serial = raw.parse::<f64>().ok()?;
    serial_to_date(serial)
}

/// 表計算のシリアル値（1899-12-30起点）を日付に変換
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !SERIAL_RANGE.contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}
