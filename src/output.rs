//! 検索結果の出力
//!
//! ファイルに書くときは一時ファイルに書いてから置き換え、中身を丸ごと差し替える。

use crate::cli::OutputFormat;
use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tool_library_common::{render_results, SearchHit};

/// 検索結果を指定形式の文字列にする
pub fn format_hits(hits: &[SearchHit<'_>], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(render_results(hits)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(hits)?),
    }
}

/// 出力先（None は標準出力）に書き出す
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => replace_file(path, content),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            handle.flush()?;
            Ok(())
        }
    }
}

fn replace_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "results".to_string());
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}
