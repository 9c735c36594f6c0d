//! シートの所在
//!
//! 文字列表現:
//! - `published:<key>:<gid>` … Googleスプレッドシートの「ウェブに公開」CSV
//! - `http://…` / `https://…` … そのままGET
//! - `file:<path>` またはそれ以外 … ローカルファイル

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

const PUBLISHED_PREFIX: &str = "published:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SheetLocator {
    /// 公開シート（キー + シートID）
    Published { key: String, gid: String },
    Url(String),
    File(PathBuf),
}

impl SheetLocator {
    pub fn published(key: impl Into<String>, gid: impl Into<String>) -> Self {
        SheetLocator::Published {
            key: key.into(),
            gid: gid.into(),
        }
    }

    /// HTTPで取得するURL（ローカルファイルは None）
    pub fn url(&self) -> Option<String> {
        match self {
            SheetLocator::Published { key, gid } => Some(format!(
                "https://docs.google.com/spreadsheets/d/e/{}/pub?gid={}&single=true&output=csv",
                key, gid
            )),
            SheetLocator::Url(url) => Some(url.clone()),
            SheetLocator::File(_) => None,
        }
    }
}

impl std::str::FromStr for SheetLocator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty sheet locator".to_string());
        }

        if let Some(rest) = s.strip_prefix(PUBLISHED_PREFIX) {
            return match rest.split_once(':') {
                Some((key, gid)) if !key.is_empty() && !gid.is_empty() => {
                    Ok(SheetLocator::published(key, gid))
                }
                _ => Err(format!("Invalid published sheet: {}. Use published:<key>:<gid>", s)),
            };
        }

        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(SheetLocator::Url(s.to_string()));
        }

        let path = s
            .strip_prefix("file://")
            .or_else(|| s.strip_prefix("file:"))
            .unwrap_or(s);
        Ok(SheetLocator::File(PathBuf::from(path)))
    }
}

impl fmt::Display for SheetLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetLocator::Published { key, gid } => write!(f, "{}{}:{}", PUBLISHED_PREFIX, key, gid),
            SheetLocator::Url(url) => write!(f, "{}", url),
            SheetLocator::File(path) => write!(f, "file:{}", path.display()),
        }
    }
}

impl TryFrom<String> for SheetLocator {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SheetLocator> for String {
    fn from(value: SheetLocator) -> Self {
        value.to_string()
    }
}
