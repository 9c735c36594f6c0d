//! シートCSVパーサー
//!
//! 1行目を列見出しとして、各行を「列見出し → 値」の `RawRow` に変換する。
//! 列見出しは空白を含めてそのまま保持する（正規化は見出し文字列の完全一致で列を引くため）。

use crate::error::{Error, Result};
use crate::types::RawRow;
use std::fmt;

/// パース時に見つかった問題（1件 = 1行）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// 問題のあった行番号（1始まり、見出し行を含む）
    pub line: Option<u64>,
    pub message: String,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl From<&csv::Error> for ParseIssue {
    fn from(error: &csv::Error) -> Self {
        Self {
            line: error.position().map(|p| p.line()),
            message: error.to_string(),
        }
    }
}

/// パース結果
///
/// 問題のある行は `errors` に積み、残りの行は `rows` に入れて読み進める。
#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    pub errors: Vec<ParseIssue>,
}

impl ParsedSheet {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 問題が1件でもあればエラー、なければ行を返す
    pub fn into_rows(self) -> Result<Vec<RawRow>> {
        if self.errors.is_empty() {
            return Ok(self.rows);
        }

        let messages = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(Error::Parse(messages))
    }
}

/// 見出し付きCSVをパースする
///
/// - 空行は読み飛ばす
/// - 列数が見出しと合わない行は問題として記録する
///
/// # Examples
/// ```
/// use tool_library_common::parse_sheet;
///
/// let sheet = parse_sheet("General Name,Specific Name \nhammer,Estwing\n");
/// assert!(sheet.errors.is_empty());
/// assert_eq!(sheet.rows[0].get("Specific Name "), "Estwing");
/// ```
pub fn parse_sheet(text: &str) -> ParsedSheet {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::None)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(str::to_string).collect(),
        Err(e) => {
            return ParsedSheet {
                errors: vec![ParseIssue::from(&e)],
                ..Default::default()
            };
        }
    };

    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for result in reader.records() {
        match result {
            Ok(record) => {
                let row: RawRow = headers
                    .iter()
                    .cloned()
                    .zip(record.iter().map(str::to_string))
                    .collect();
                rows.push(row);
            }
            Err(e) => errors.push(ParseIssue::from(&e)),
        }
    }

    ParsedSheet {
        headers,
        rows,
        errors,
    }
}
