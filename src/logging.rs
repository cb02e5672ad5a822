use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{LevelFilter, Log, Metadata, Record};

/// ログ行の通し番号
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

static LOGGER: StderrLogger = StderrLogger;

/// `seq|LEVEL|target|message` 形式で標準エラー出力に書き出す
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let seq = LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1;
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "{}|{}|{}|{}",
            seq,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// ログレベル文字列を解釈する（不正な値は info）
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}

/// ロガーを初期化する（2回目以降はレベルのみ更新）
pub fn init(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
