//! 検索クエリ処理
//!
//! - 空のクエリ: 全件をそのままの順で返す
//! - 1語: 名前・型番・分類に対してあいまい一致し、スコア降順で返す
//! - 複数語（半角スペース区切り）: 語ごとに検索し、型番（specific_name）が
//!   すべての語の結果に現れるレコードだけを残す。並びは最後の語のスコア降順。
//!
//! 複数語の絞り込みはレコードの同一性ではなく型番文字列で判定するため、
//! 型番が同じ別レコードは同じものとして扱われる。

use crate::fuzzy::{score, Term, DEFAULT_THRESHOLD};
use crate::index::Inventory;
use crate::types::InventoryRecord;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// 検索オプション
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// 1語あたりの最大件数
    pub limit: usize,
    /// 隣り合う2文字の入れ替えを許容する
    pub allow_typo: bool,
    /// これより低いスコアは捨てる
    pub threshold: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 100,
            allow_typo: true,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// 検索結果1件（全件表示ではスコアなし）
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SearchHit<'a> {
    pub record: &'a InventoryRecord,
    pub score: Option<f64>,
}

impl<'a> SearchHit<'a> {
    pub fn unranked(record: &'a InventoryRecord) -> Self {
        Self {
            record,
            score: None,
        }
    }
}

fn by_score_desc(a: &SearchHit<'_>, b: &SearchHit<'_>) -> Ordering {
    let a = a.score.unwrap_or(f64::NEG_INFINITY);
    let b = b.score.unwrap_or(f64::NEG_INFINITY);
    b.total_cmp(&a)
}

/// 1語で検索する（スコア降順、同点は元の順）
pub fn search_term<'a>(
    inventory: &'a Inventory,
    term: &str,
    options: &SearchOptions,
) -> Vec<SearchHit<'a>> {
    let term = Term::new(term);
    if term.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit<'a>> = inventory
        .entries()
        .filter_map(|(record, prepared)| {
            prepared
                .fields()
                .into_iter()
                .filter_map(|field| score(&term, field, options.allow_typo))
                .max_by(f64::total_cmp)
                .filter(|s| *s >= options.threshold)
                .map(|s| SearchHit {
                    record,
                    score: Some(s),
                })
        })
        .collect();

    hits.sort_by(by_score_desc);
    hits.truncate(options.limit);
    hits
}

/// クエリ文字列で検索する
pub fn run_query<'a>(
    inventory: &'a Inventory,
    query: &str,
    options: &SearchOptions,
) -> Vec<SearchHit<'a>> {
    let query = query.trim();

    if query.is_empty() {
        return inventory.records().iter().map(SearchHit::unranked).collect();
    }

    if !query.contains(' ') {
        return search_term(inventory, query, options);
    }

    // 連続スペースで生じる空の語は無視する
    let per_term: Vec<Vec<SearchHit<'a>>> = query
        .split(' ')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| search_term(inventory, term, options))
        .collect();

    let Some((last, earlier)) = per_term.split_last() else {
        return Vec::new();
    };

    let earlier_names: Vec<HashSet<&str>> = earlier
        .iter()
        .map(|hits| {
            hits.iter()
                .map(|hit| hit.record.specific_name.as_str())
                .collect()
        })
        .collect();

    let mut results: Vec<SearchHit<'a>> = last
        .iter()
        .filter(|hit| {
            earlier_names
                .iter()
                .all(|names| names.contains(hit.record.specific_name.as_str()))
        })
        .copied()
        .collect();

    results.sort_by(by_score_desc);
    results
}
