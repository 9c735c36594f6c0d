use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tool-library")]
#[command(about = "工具・材料在庫のあいまい検索ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力（-vv でさらに詳細）
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 在庫を検索して結果を出力
    Search {
        /// 検索語（空なら全件）
        query: Vec<String>,

        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (html/json)
        #[arg(short, long, default_value = "html")]
        format: OutputFormat,

        /// シートを取得せずキャッシュだけを使う
        #[arg(long)]
        offline: bool,
    },

    /// 定期的に在庫を更新しながら検索結果を書き出す
    Watch {
        /// 初期の検索語
        #[arg(short, long, default_value = "")]
        query: String,

        /// 標準入力から1行ずつ検索語を読む（EOFで終了）
        #[arg(long)]
        stdin: bool,

        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (html/json)
        #[arg(short, long, default_value = "html")]
        format: OutputFormat,

        /// 更新間隔（秒、省略時は設定値）
        #[arg(long)]
        interval_secs: Option<u64>,
    },

    /// キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 材料シートの所在 (published:<key>:<gid> / URL / ファイル)
        #[arg(long)]
        set_materials: Option<String>,

        /// 工具シートの所在
        #[arg(long)]
        set_tools: Option<String>,

        /// 取得タイムアウト（秒、0 で無効）
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 新しい物品のリクエストフォームを開く
    Request,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use html or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_search_joins_words() {
        let cli = Cli::parse_from(["tool-library", "search", "red", "hammer", "--format", "json"]);
        match cli.command {
            Commands::Search { query, format, offline, .. } => {
                assert_eq!(query.join(" "), "red hammer");
                assert_eq!(format, OutputFormat::Json);
                assert!(!offline);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::parse_from(["tool-library", "-vv", "request"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Request));
    }
}
