//! エラーケーステスト
//!
//! エラーの表示と変換を検証

use tool_library::config::Config;
use tool_library::error::ToolLibraryError;
use tool_library::fetcher::SheetLocator;

/// 取得エラーにはシート名が入る
#[test]
fn test_fetch_error_display() {
    let err = ToolLibraryError::HttpStatus {
        sheet: "tools".into(),
        status: 503,
    };
    let message = err.to_string();
    assert!(message.contains("tools"));
    assert!(message.contains("503"));

    let err = ToolLibraryError::Timeout {
        sheet: "materials".into(),
        seconds: 30,
    };
    assert!(err.to_string().contains("materials"));
}

/// IO/JSONエラーからの変換
#[test]
fn test_error_conversions() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    assert!(matches!(ToolLibraryError::from(io), ToolLibraryError::Io(_)));

    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(ToolLibraryError::from(json), ToolLibraryError::JsonParse(_)));
}

/// シート解析エラーは行番号付きで伝わる
#[test]
fn test_sheet_parse_error_from_common() {
    let sheet = tool_library_common::parse_sheet("General Name,Category\nglue,adhesives,extra\n");
    let err: ToolLibraryError = sheet.into_rows().unwrap_err().into();

    assert!(matches!(err, ToolLibraryError::SheetParse(_)));
    assert!(err.to_string().contains("line 2"));
}

/// 壊れた設定ファイルはJSONエラー
#[test]
fn test_corrupt_config_is_json_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ materials: ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ToolLibraryError::JsonParse(_)));
}

/// 不正な所在の指定
#[test]
fn test_invalid_locator() {
    assert!("published:only-key".parse::<SheetLocator>().is_err());
}
