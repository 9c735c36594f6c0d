//! 在庫構築パイプラインのテスト
//!
//! CSV解析 → 正規化 → 索引構築、取得失敗時のスナップショット切り替えを検証

use std::path::{Path, PathBuf};
use tempfile::tempdir;
use tool_library::cache::SnapshotFile;
use tool_library::config::Config;
use tool_library::error::ToolLibraryError;
use tool_library::fetcher::{SheetFetcher, SheetLocator};
use tool_library::pipeline::{build_inventory, load_inventory, prepare_inventory};
use tool_library_common::{LastChecked, Provenance, SearchOptions};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_text(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).expect("fixture読み込み失敗")
}

fn config_with(materials: PathBuf, tools: PathBuf, snapshot: PathBuf) -> Config {
    Config {
        materials: SheetLocator::File(materials),
        tools: SheetLocator::File(tools),
        snapshot_path: Some(snapshot),
        ..Config::default()
    }
}

/// 工具 → 材料の順で正規化される
#[test]
fn test_build_inventory_from_sheets() {
    let inventory = build_inventory(&fixture_text("materials.csv"), &fixture_text("tools.csv"))
        .expect("在庫構築失敗");

    let names: Vec<_> = inventory.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Drill", "Hammer", "Saw", "Drill Bit", "Paint"]);

    let drill = &inventory.records()[0];
    assert_eq!(drill.provenance, Provenance::Tool);
    assert_eq!(drill.specific_name, "DeWalt 20V");
    assert_eq!(drill.category, "Power Tools");
    assert_eq!(drill.location, "Shelf A");
    assert_eq!(drill.condition, "Good");
    assert_eq!(drill.last_checked.to_simple_date(), "3/14/2024");

    let saw = &inventory.records()[2];
    assert_eq!(saw.last_checked, LastChecked::NotAvailable);

    let bit = &inventory.records()[3];
    assert_eq!(bit.provenance, Provenance::Material);
    assert_eq!(bit.quantity, "High");
    assert_eq!(bit.condition, "NA");
    assert_eq!(bit.last_checked.to_simple_date(), "1/5/2024");

    let paint = &inventory.records()[4];
    assert_eq!(paint.last_checked.to_simple_date(), "1/5/2024");

    let indices: Vec<_> = inventory.records().iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

/// 同じデータからの再構築は同じ結果
#[test]
fn test_rebuild_is_deterministic() {
    let materials = fixture_text("materials.csv");
    let tools = fixture_text("tools.csv");

    let first = build_inventory(&materials, &tools).unwrap();
    let second = build_inventory(&materials, &tools).unwrap();
    assert_eq!(first.records(), second.records());
}

/// どちらかのシートが壊れていれば在庫は作らない
#[test]
fn test_parse_error_on_either_sheet_fails() {
    let tools = fixture_text("tools.csv");
    let broken = "General Name,Category\nglue,adhesives,extra\n";

    let err = build_inventory(broken, &tools).unwrap_err();
    assert!(matches!(err, ToolLibraryError::SheetParse(_)));

    let err = build_inventory(&fixture_text("materials.csv"), broken).unwrap_err();
    assert!(matches!(err, ToolLibraryError::SheetParse(_)));
}

/// 全体の検索（端から端まで）
#[test]
fn test_search_built_inventory() {
    let inventory =
        build_inventory(&fixture_text("materials.csv"), &fixture_text("tools.csv")).unwrap();
    let options = SearchOptions::default();

    let all = inventory.search("", &options);
    assert_eq!(all.len(), 5);
    assert!(all.iter().all(|hit| hit.score.is_none()));

    let drills = inventory.search("drill", &options);
    let names: Vec<_> = drills.iter().map(|hit| hit.record.name.as_str()).collect();
    assert_eq!(names, vec!["Drill", "Drill Bit"]);
}

/// ファイルからの取得
#[tokio::test]
async fn test_prepare_inventory_from_files() {
    let fetcher = SheetFetcher::new(None).unwrap();
    let inventory = prepare_inventory(
        &fetcher,
        &SheetLocator::File(fixture("materials.csv")),
        &SheetLocator::File(fixture("tools.csv")),
    )
    .await
    .expect("取得失敗");

    assert_eq!(inventory.len(), 5);
}

/// 取得に成功したらスナップショットを保存する
#[tokio::test]
async fn test_load_inventory_persists_snapshot() {
    let dir = tempdir().expect("Failed to create temp dir");
    let snapshot = dir.path().join("inventory.json");
    let config = config_with(fixture("materials.csv"), fixture("tools.csv"), snapshot.clone());

    let inventory = load_inventory(&config, false).await.unwrap();
    assert_eq!(inventory.len(), 5);

    let saved = SnapshotFile::load(&snapshot).expect("スナップショットが保存されていない");
    assert_eq!(saved.len(), 5);
}

/// 取得に失敗したらスナップショットを使う
#[tokio::test]
async fn test_load_inventory_falls_back_to_snapshot() {
    let dir = tempdir().expect("Failed to create temp dir");
    let snapshot = dir.path().join("inventory.json");

    let good = config_with(fixture("materials.csv"), fixture("tools.csv"), snapshot.clone());
    load_inventory(&good, false).await.unwrap();

    let missing = dir.path().join("missing.csv");
    let broken = config_with(missing.clone(), missing, snapshot);
    let inventory = load_inventory(&broken, false).await.expect("スナップショットに切り替わらない");
    assert_eq!(inventory.len(), 5);
    assert_eq!(inventory.records()[0].name, "Drill");
}

/// 取得失敗かつスナップショットなし
#[tokio::test]
async fn test_load_inventory_without_snapshot_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("missing.csv");
    let config = config_with(missing.clone(), missing, dir.path().join("inventory.json"));

    let err = load_inventory(&config, false).await.unwrap_err();
    assert!(matches!(err, ToolLibraryError::Fetch { .. }));

    let err = load_inventory(&config, true).await.unwrap_err();
    assert!(matches!(err, ToolLibraryError::NoInventory));
}
