//! 在庫の構築
//!
//! シート取得 → CSV解析 → 正規化 → 索引構築 を一度に行う。
//! どの段階で失敗しても在庫は返さない（片方のシートだけ読めても捨てる）。

use crate::cache::SnapshotFile;
use crate::config::Config;
use crate::error::{Result, ToolLibraryError};
use crate::fetcher::{SheetFetcher, SheetLocator};
use std::path::Path;
use tool_library_common::{normalize_inventory, parse_sheet, Inventory};
use tracing::{debug, info, warn};

/// 2シートのCSVから在庫を作る
pub fn build_inventory(materials_csv: &str, tools_csv: &str) -> Result<Inventory> {
    let materials = parse_sheet(materials_csv);
    let tools = parse_sheet(tools_csv);
    debug!(materials = ?materials.headers, tools = ?tools.headers, "sheet headers");

    if materials.has_errors() || tools.has_errors() {
        warn!(materials = ?materials.errors, tools = ?tools.errors, "error parsing sheets");
    }
    let materials = materials.into_rows()?;
    let tools = tools.into_rows()?;

    info!(materials = materials.len(), tools = tools.len(), "sheets retrieved");

    let records = normalize_inventory(&materials, &tools);
    Ok(Inventory::build(records))
}

/// シートを取得して在庫を作る
pub async fn prepare_inventory(
    fetcher: &SheetFetcher,
    materials: &SheetLocator,
    tools: &SheetLocator,
) -> Result<Inventory> {
    info!("getting sheets");
    let texts = fetcher.fetch_both(materials, tools).await?;
    build_inventory(&texts.materials, &texts.tools)
}

/// 在庫を保存する。失敗してもログだけ（在庫の差し替えは済んでいる前提）
pub fn persist_snapshot(inventory: &Inventory, snapshot_path: &Path) {
    match SnapshotFile::from_inventory(inventory).save(snapshot_path) {
        Ok(()) => info!(path = %snapshot_path.display(), records = inventory.len(), "snapshot saved"),
        Err(e) => warn!(path = %snapshot_path.display(), error = %e, "failed to save snapshot"),
    }
}

/// 1回きりの読み込み
///
/// - `offline`: スナップショットだけを使う
/// - それ以外: 取得して保存。取得に失敗したらスナップショットに切り替える
pub async fn load_inventory(config: &Config, offline: bool) -> Result<Inventory> {
    let snapshot_path = config.snapshot_path()?;

    if offline {
        return SnapshotFile::load(&snapshot_path)
            .map(SnapshotFile::into_inventory)
            .ok_or(ToolLibraryError::NoInventory);
    }

    let fetcher = SheetFetcher::new(config.fetch_timeout())?;
    match prepare_inventory(&fetcher, &config.materials, &config.tools).await {
        Ok(inventory) => {
            persist_snapshot(&inventory, &snapshot_path);
            Ok(inventory)
        }
        Err(e) => match SnapshotFile::load(&snapshot_path) {
            Some(snapshot) => {
                warn!(error = %e, saved_at = snapshot.saved_at(), "live load failed, using snapshot");
                Ok(snapshot.into_inventory())
            }
            None => Err(e),
        },
    }
}
