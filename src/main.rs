use anyhow::Context;
use clap::Parser;
use tool_library::{cache, cli, config, output, pipeline, refresh, request};
use cache::SnapshotFile;
use cli::{Cli, Commands};
use config::Config;
use tool_library_common::SearchOptions;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut config = Config::load().context("設定の読み込みに失敗")?;

    match cli.command {
        Commands::Search { query, output, format, offline } => {
            let query = query.join(" ");
            let inventory = pipeline::load_inventory(&config, offline).await?;
            let hits = inventory.search(&query, &SearchOptions::default());
            eprintln!("✔ {}件中 {}件ヒット", inventory.len(), hits.len());

            let content = output::format_hits(&hits, format)?;
            output::write_output(&content, output.as_deref())?;
            if let Some(path) = &output {
                eprintln!("✔ 結果を保存: {}", path.display());
            }
        }

        Commands::Watch { query, stdin, output, format, interval_secs } => {
            let interval = interval_secs
                .map(|secs| std::time::Duration::from_secs(secs.max(1)))
                .unwrap_or_else(|| config.refresh_interval());
            eprintln!("🔄 tool-library - {}秒ごとに更新 (Ctrl-Cで終了)", interval.as_secs());

            let options = refresh::WatchOptions {
                initial_query: query,
                output,
                format,
                interval,
                read_stdin: stdin,
            };
            refresh::run_watch(&config, options).await?;
        }

        Commands::Cache { clear, info } => {
            let path = config.snapshot_path()?;

            if clear {
                if SnapshotFile::clear(&path)? {
                    println!("✔ キャッシュを削除: {}", path.display());
                } else {
                    println!("キャッシュはありません");
                }
            }

            if info || !clear {
                println!("キャッシュ: {}", path.display());
                match SnapshotFile::load(&path) {
                    Some(snapshot) => {
                        println!("  保存日時: {}", snapshot.saved_at());
                        println!("  件数: {}", snapshot.len());
                    }
                    None => println!("  (なし)"),
                }
            }
        }

        Commands::Config { set_materials, set_tools, set_timeout, show } => {
            let mut changed = false;

            if let Some(value) = set_materials {
                config.materials = value.parse().map_err(anyhow::Error::msg)?;
                changed = true;
            }
            if let Some(value) = set_tools {
                config.tools = value.parse().map_err(anyhow::Error::msg)?;
                changed = true;
            }
            if let Some(secs) = set_timeout {
                config.fetch_timeout_secs = (secs > 0).then_some(secs);
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }

        Commands::Request => {
            request::request_item(&config)?;
            println!("✔ リクエストフォームを開きました");
        }
    }

    Ok(())
}
