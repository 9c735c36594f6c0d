//! 在庫スナップショットのキャッシュ
//!
//! 取得・正規化に成功した在庫をJSONで保存し、起動時に最新の取得が
//! 終わっていなければ代わりに使う。保存は成功時のみ、毎回上書き。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tool_library_common::{Inventory, InventoryRecord};
use tracing::warn;

/// スナップショットファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 保存日時（RFC 3339）
    saved_at: String,
    /// 工具 → 材料の順のレコード
    records: Vec<InventoryRecord>,
}

impl SnapshotFile {
    const CURRENT_VERSION: u32 = 1;

    pub fn from_inventory(inventory: &Inventory) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            saved_at: chrono::Utc::now().to_rfc3339(),
            records: inventory.records().to_vec(),
        }
    }

    /// スナップショットを読み込み（なし・壊れている・バージョン違いは None）
    pub fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "snapshot unreadable");
                return None;
            }
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, SnapshotFile>(reader) {
            Ok(snapshot) => {
                if snapshot.version != Self::CURRENT_VERSION {
                    warn!(
                        found = snapshot.version,
                        expected = Self::CURRENT_VERSION,
                        "snapshot version mismatch, ignoring"
                    );
                    return None;
                }
                Some(snapshot)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "snapshot is not valid JSON, ignoring");
                None
            }
        }
    }

    /// スナップショットを保存（一時ファイルに書いてから置き換える）
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, self)?;
            writer.flush()?;
        }
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// スナップショットを削除。削除したら true
    pub fn clear(path: &Path) -> Result<bool> {
        if path.exists() {
            std::fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// 検索インデックスを作り直して在庫に戻す
    pub fn into_inventory(self) -> Inventory {
        Inventory::build(self.records)
    }

    pub fn saved_at(&self) -> &str {
        &self.saved_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
