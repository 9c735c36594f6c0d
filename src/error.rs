use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolLibraryError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("シートの取得に失敗 ({sheet}): {message}")]
    Fetch { sheet: String, message: String },

    #[error("シートの取得に失敗 ({sheet}): HTTP {status}")]
    HttpStatus { sheet: String, status: u16 },

    #[error("シートの取得がタイムアウト ({sheet}): {seconds}秒")]
    Timeout { sheet: String, seconds: u64 },

    #[error("シートのCSV解析に失敗: {0}")]
    SheetParse(#[from] tool_library_common::Error),

    #[error("在庫データがありません（取得失敗かつキャッシュなし）")]
    NoInventory,

    #[error("ブラウザを開けません: {0}")]
    Browser(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ToolLibraryError>;
