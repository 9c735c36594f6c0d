//! 在庫レコードの型定義
//!
//! 在庫を表す型:
//! - RawRow: シート1行分（列見出し → 値）
//! - InventoryRecord: 工具・材料を統一した在庫レコード
//! - LastChecked: 最終点検日（日付 または "NA"）

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 欠損・解析不能を表す表示用の値
pub const NOT_AVAILABLE: &str = "NA";

/// シート1行分（列見出しは前後の空白も含めてそのまま保持）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    pub fn new(cells: HashMap<String, String>) -> Self {
        Self { cells }
    }

    /// 列の値を取得（列がなければ空文字）
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// レコードの出所（工具シート / 材料シート）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Tool,
    Material,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Tool => write!(f, "tool"),
            Provenance::Material => write!(f, "material"),
        }
    }
}

/// 最終点検日
///
/// 保存形式は `YYYY-MM-DD` または `"NA"`。それ以外の文字列は `NotAvailable` として読む。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LastChecked {
    Date(NaiveDate),
    #[default]
    NotAvailable,
}

impl LastChecked {
    /// 表示用 `M/D/YYYY`（ゼロ埋めなし）または `NA`
    pub fn to_simple_date(&self) -> String {
        match self {
            LastChecked::Date(date) => {
                format!("{}/{}/{}", date.month(), date.day(), date.year())
            }
            LastChecked::NotAvailable => NOT_AVAILABLE.to_string(),
        }
    }
}

impl From<String> for LastChecked {
    fn from(value: String) -> Self {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(LastChecked::Date)
            .unwrap_or(LastChecked::NotAvailable)
    }
}

impl From<LastChecked> for String {
    fn from(value: LastChecked) -> Self {
        match value {
            LastChecked::Date(date) => date.format("%Y-%m-%d").to_string(),
            LastChecked::NotAvailable => NOT_AVAILABLE.to_string(),
        }
    }
}

/// 工具・材料を統一した在庫レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub provenance: Provenance,

    /// 一般名（キャピタライズ済み）
    pub name: String,

    /// 型番・ブランド（元データのまま）
    #[serde(default)]
    pub specific_name: String,

    #[serde(default)]
    pub category: String,

    /// 数量（"High" や "3" など自由記述）
    #[serde(default)]
    pub quantity: String,

    #[serde(default)]
    pub last_checked: LastChecked,

    #[serde(default)]
    pub location: String,

    /// 工具の状態。材料は常に "NA"
    #[serde(default)]
    pub condition: String,

    /// コレクション内の位置（インデックス構築時に振り直す）
    #[serde(default)]
    pub index: usize,
}
