use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("受注番号が見つかりません（明細入力完了列が空です）")]
    OrderIdNotFound,

    #[error("受注番号 {0} に一致する受注データが見つかりません")]
    OrderRecordNotFound(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("設定が不正です: {0}")]
    Config(String),
}

impl EngineError {
    /// 受注番号・受注データの解決に失敗したエラーかどうか
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::OrderIdNotFound | EngineError::OrderRecordNotFound(_)
        )
    }
}

/// 範囲読み込み側のエラー
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("ファイルの読み込みに失敗しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("ワークブックの読み込みに失敗しました: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSVの解析に失敗しました: {0}")]
    Csv(#[from] csv::Error),

    #[error("範囲が見つかりません: {0}")]
    RangeNotFound(String),

    #[error("範囲指定が不正です: {0}")]
    InvalidAddress(String),

    #[error("サポートされていないデータソースです: {0}")]
    UnsupportedSource(String),
}
