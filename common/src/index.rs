//! 検索インデックス
//!
//! 統一レコード列に連番を振り、検索対象フィールド（名前・型番・分類）を前処理しておく。
//! 更新のたびに丸ごと作り直す。

use crate::fuzzy::Prepared;
use crate::query::{run_query, SearchHit, SearchOptions};
use crate::types::InventoryRecord;

/// 1レコード分の前処理済み検索フィールド
#[derive(Debug, Clone, Default)]
pub struct PreparedRecord {
    pub name: Prepared,
    pub specific_name: Prepared,
    pub category: Prepared,
}

impl PreparedRecord {
    pub fn new(record: &InventoryRecord) -> Self {
        Self {
            name: Prepared::new(&record.name),
            specific_name: Prepared::new(&record.specific_name),
            category: Prepared::new(&record.category),
        }
    }

    pub fn fields(&self) -> [&Prepared; 3] {
        [&self.name, &self.specific_name, &self.category]
    }
}

/// 検索可能な在庫コレクション
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    records: Vec<InventoryRecord>,
    prepared: Vec<PreparedRecord>,
}

impl Inventory {
    /// 連番（0始まり）を振り直して検索用フィールドを前処理する
    pub fn build(mut records: Vec<InventoryRecord>) -> Self {
        for (index, record) in records.iter_mut().enumerate() {
            record.index = index;
        }
        let prepared = records.iter().map(PreparedRecord::new).collect();
        Self { records, prepared }
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<InventoryRecord> {
        self.records
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&InventoryRecord, &PreparedRecord)> {
        self.records.iter().zip(self.prepared.iter())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 検索語で絞り込む（空なら全件）
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchHit<'_>> {
        run_query(self, query, options)
    }
}
