//! 正規化モジュール
//!
//! 工具シートと材料シートは列構成が異なるため、固定の列対応表で
//! 統一レコード（`InventoryRecord`）に変換する。
//!
//! ## 処理内容
//! 1. 列見出しの完全一致で値を取り出す
//! 2. 名前・分類・数量・場所・状態をキャピタライズ（型番はそのまま）
//! 3. 最終点検日を日付に変換（失敗時は "NA"）

use crate::types::{InventoryRecord, LastChecked, Provenance, RawRow, NOT_AVAILABLE};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

/// シートの列対応表
#[derive(Debug, Clone, Copy)]
pub struct SheetSchema {
    pub provenance: Provenance,
    pub name: &'static str,
    pub specific_name: &'static str,
    pub category: &'static str,
    pub quantity: &'static str,
    pub last_checked: &'static str,
    pub location: &'static str,
    /// 状態列。材料シートにはない
    pub condition: Option<&'static str>,
}

/// 工具シート（"Specific Name " の末尾空白はシート側の見出しのまま）
pub const TOOL_SCHEMA: SheetSchema = SheetSchema {
    provenance: Provenance::Tool,
    name: "General Name",
    specific_name: "Specific Name ",
    category: "Category",
    quantity: "How many currently working?",
    last_checked: "Last checked by steward",
    location: "Where to find it:",
    condition: Some("Condition"),
};

/// 材料シート
pub const MATERIAL_SCHEMA: SheetSchema = SheetSchema {
    provenance: Provenance::Material,
    name: "General Name",
    specific_name: "Specific Name / Brand",
    category: "Category",
    quantity: "How many or high, medium, low inventory?",
    last_checked: "Last Checked by a Steward:",
    location: "Where to find it:",
    condition: None,
};

impl SheetSchema {
    /// 1行を統一レコードに変換する（index は索引構築時に振る）
    pub fn to_record(&self, row: &RawRow) -> InventoryRecord {
        let condition = match self.condition {
            Some(column) => capitalize(row.get(column)),
            None => NOT_AVAILABLE.to_string(),
        };

        InventoryRecord {
            provenance: self.provenance,
            name: capitalize(row.get(self.name)),
            specific_name: row.get(self.specific_name).to_string(),
            category: capitalize(row.get(self.category)),
            quantity: capitalize(row.get(self.quantity)),
            last_checked: coerce_date(row.get(self.last_checked)),
            location: capitalize(row.get(self.location)),
            condition,
            index: 0,
        }
    }
}

/// 工具・材料の行を統一レコード列に変換する（工具が先、材料が後）
pub fn normalize_inventory(materials: &[RawRow], tools: &[RawRow]) -> Vec<InventoryRecord> {
    tools
        .iter()
        .map(|row| TOOL_SCHEMA.to_record(row))
        .chain(materials.iter().map(|row| MATERIAL_SCHEMA.to_record(row)))
        .collect()
}

/// 前後の空白を除き、小文字化してから各単語の先頭文字を大文字にする
///
/// 単語の先頭は空白区切りの塊の中で最初の単語文字（`\w`）。
/// 先頭の記号は飛ばすので `"(drill)"` は `"(Drill)"` になる。
///
/// # Examples
/// ```
/// use tool_library_common::capitalize;
///
/// assert_eq!(capitalize("  DRILL bit "), "Drill Bit");
/// ```
pub fn capitalize(s: &str) -> String {
    lazy_static::lazy_static! {
        static ref WORD_RE: Regex = Regex::new(r"\w\S*").unwrap();
    }

    let lowered = s.trim().to_lowercase();
    WORD_RE
        .replace_all(&lowered, |caps: &regex::Captures| {
            let word = &caps[0];
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .into_owned()
}

/// 日付として読める書式（スプレッドシートの出力で見かけるもの）
///
/// 2桁年（3/4/24）は `%Y` だと西暦24年として読めてしまうので `%y` を先に試す
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// 最終点検日を変換する。読めなければ `NotAvailable`
pub fn coerce_date(raw: &str) -> LastChecked {
    let value = raw.trim();
    if value.is_empty() {
        return LastChecked::NotAvailable;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return LastChecked::Date(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return LastChecked::Date(datetime.date());
        }
    }

    LastChecked::NotAvailable
}
