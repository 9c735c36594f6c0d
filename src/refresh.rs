//! 定期更新ループ
//!
//! 1つのタスクが `InventoryState` を持ち、`tokio::select!` で
//! 取得完了・更新タイマー・検索語入力・Ctrl-C を待つ。
//! タイマーは取得が終わってから張り直す（取得中は次の取得を始めない）。

use crate::cache::SnapshotFile;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::fetcher::SheetFetcher;
use crate::output::{format_hits, write_output};
use crate::pipeline::{persist_snapshot, prepare_inventory};
use crate::state::InventoryState;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tool_library_common::{Inventory, SearchOptions};
use tracing::{debug, info, warn};

type InventoryFuture<'a> = Pin<Box<dyn Future<Output = Result<Inventory>> + 'a>>;

/// watch の実行オプション
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub initial_query: String,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub interval: Duration,
    /// 標準入力から検索語を読む
    pub read_stdin: bool,
}

/// 取得中の更新
struct InFlight<'a> {
    future: InventoryFuture<'a>,
    /// 起動時の取得（スナップショット表示済み）は描画し直さない
    render_on_commit: bool,
}

/// 取得結果を反映する。成功なら差し替えて保存し true、失敗なら前の在庫のまま false
pub fn apply_refresh(
    state: &mut InventoryState,
    result: Result<Inventory>,
    snapshot_path: &Path,
) -> bool {
    match result {
        Ok(inventory) => {
            let records = inventory.len();
            let generation = state.replace(inventory);
            info!(records, generation, "inventory refreshed");
            persist_snapshot(&state.current(), snapshot_path);
            true
        }
        Err(e) => {
            warn!(error = %e, "refresh failed, keeping previous inventory");
            false
        }
    }
}

/// 現在の在庫を検索して書き出す
pub fn render_current(
    state: &InventoryState,
    query: &str,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let inventory = state.current();
    let hits = inventory.search(query, &SearchOptions::default());
    debug!(query, hits = hits.len(), "rendering");
    let content = format_hits(&hits, format)?;
    write_output(&content, output)
}

/// 描画する。書き出しに失敗してもログだけ残して更新は続ける
fn render_or_warn(state: &InventoryState, query: &str, format: OutputFormat, output: Option<&Path>) {
    if let Err(e) = render_current(state, query, format, output) {
        warn!(error = %e, "failed to write results");
    }
}

/// Ctrl-C か標準入力の終端まで更新し続ける
pub async fn run_watch(config: &Config, options: WatchOptions) -> Result<()> {
    let snapshot_path = config.snapshot_path()?;
    let fetcher = SheetFetcher::new(config.fetch_timeout())?;
    let output = options.output.as_deref();
    let mut query = options.initial_query.clone();
    let mut state = InventoryState::default();

    let mut initial: InventoryFuture<'_> =
        Box::pin(prepare_inventory(&fetcher, &config.materials, &config.tools));

    let mut in_flight = match SnapshotFile::load(&snapshot_path) {
        Some(snapshot) => {
            info!(saved_at = snapshot.saved_at(), records = snapshot.len(), "showing snapshot");
            state.replace(snapshot.into_inventory());
            render_or_warn(&state, &query, options.format, output);
            Some(InFlight {
                future: initial,
                render_on_commit: false,
            })
        }
        None => {
            let result = initial.as_mut().await;
            apply_refresh(&mut state, result, &snapshot_path);
            render_or_warn(&state, &query, options.format, output);
            None
        }
    };

    let sleep = tokio::time::sleep(options.interval);
    tokio::pin!(sleep);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            result = async {
                match in_flight.as_mut() {
                    Some(flight) => flight.future.as_mut().await,
                    None => std::future::pending().await,
                }
            }, if in_flight.is_some() => {
                let render = in_flight
                    .take()
                    .map(|flight| flight.render_on_commit)
                    .unwrap_or(false);
                if apply_refresh(&mut state, result, &snapshot_path) && render {
                    render_or_warn(&state, &query, options.format, output);
                }
                sleep.as_mut().reset(Instant::now() + options.interval);
            }
            () = &mut sleep, if in_flight.is_none() => {
                info!("refreshing inventory");
                in_flight = Some(InFlight {
                    future: Box::pin(prepare_inventory(&fetcher, &config.materials, &config.tools)),
                    render_on_commit: true,
                });
            }
            line = lines.next_line(), if options.read_stdin => {
                match line {
                    Ok(Some(line)) => {
                        query = line;
                        render_or_warn(&state, &query, options.format, output);
                    }
                    Ok(None) => {
                        info!("query input closed");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to read query input");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    Ok(())
}
