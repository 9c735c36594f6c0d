//! 検索結果のHTML生成
//!
//! 見出し行＋結果1件につき1行の `div` 断片を作る。出力先の中身はこの断片で丸ごと置き換える。

use crate::query::SearchHit;
use crate::types::InventoryRecord;
use serde::Serialize;

/// 見出し行のラベル（表示順）
pub const HEADER_LABELS: [&str; 6] = [
    "Name",
    "Category",
    "Location",
    "Quantity",
    "Condition (if tool)",
    "Last Checked",
];

const CELL_CLASSES: [&str; 6] = [
    "name",
    "category",
    "location",
    "quantity",
    "condition",
    "last-checked",
];

/// 表示用の1行（値はすべて表示できる文字列に確定済み）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub name: String,
    pub category: String,
    pub location: String,
    pub quantity: String,
    pub condition: String,
    pub last_checked: String,
}

impl DisplayRow {
    fn cells(&self) -> [&str; 6] {
        [
            &self.name,
            &self.category,
            &self.location,
            &self.quantity,
            &self.condition,
            &self.last_checked,
        ]
    }
}

impl From<&InventoryRecord> for DisplayRow {
    fn from(record: &InventoryRecord) -> Self {
        Self {
            name: record.name.clone(),
            category: record.category.clone(),
            location: record.location.clone(),
            quantity: record.quantity.clone(),
            condition: record.condition.clone(),
            last_checked: record.last_checked.to_simple_date(),
        }
    }
}

impl From<&SearchHit<'_>> for DisplayRow {
    fn from(hit: &SearchHit<'_>) -> Self {
        Self::from(hit.record)
    }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn push_row(html: &mut String, row_class: &str, cells: [&str; 6]) {
    html.push_str(&format!("<div class=\"{}\">\n", row_class));
    for (class, value) in CELL_CLASSES.iter().zip(cells) {
        html.push_str(&format!(
            "  <div class=\"result {}\">{}</div>\n",
            class,
            escape_html(value)
        ));
    }
    html.push_str("</div>\n");
}

/// 検索結果をHTML断片にする
pub fn render_results(hits: &[SearchHit<'_>]) -> String {
    let rows: Vec<DisplayRow> = hits.iter().map(DisplayRow::from).collect();
    render_rows(&rows)
}

/// 表示行をHTML断片にする
pub fn render_rows(rows: &[DisplayRow]) -> String {
    let mut html = String::new();
    push_row(&mut html, "result row header", HEADER_LABELS);
    for row in rows {
        push_row(&mut html, "result row", row.cells());
    }
    html
}
