use crate::error::{Result, ToolLibraryError};
use crate::fetcher::SheetLocator;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 公開スプレッドシートのキー（材料・工具シート共通）
pub const DEFAULT_SHEET_KEY: &str =
    "2PACX-1vRlpOHqojslmCaRAX-eeLSsteaBUiAwQN-5koJdnJBF6CzSzYPd9gp_wdEJHYwhcRlIZLMQtuT4WurI";
pub const DEFAULT_MATERIALS_GID: &str = "62212422";
pub const DEFAULT_TOOLS_GID: &str = "363871847";

/// 新しい物品のリクエストフォーム
pub const DEFAULT_REQUEST_FORM_URL: &str =
    "https://docs.google.com/forms/d/e/1FAIpQLSdTW_DD2_LnClS0X5jmzhL5NPRNpkJImFQtGaXf0l30mCqRsQ/viewform";

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 120;

const SNAPSHOT_FILE_NAME: &str = "inventory.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub materials: SheetLocator,
    pub tools: SheetLocator,
    pub refresh_interval_secs: u64,
    /// 未指定ならタイムアウトなし
    pub fetch_timeout_secs: Option<u64>,
    pub request_form_url: String,
    /// 未指定ならキャッシュディレクトリの inventory.json
    pub snapshot_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// 指定パスから読み込む（なければ既定値）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ToolLibraryError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("tool-library").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            materials: SheetLocator::published(DEFAULT_SHEET_KEY, DEFAULT_MATERIALS_GID),
            tools: SheetLocator::published(DEFAULT_SHEET_KEY, DEFAULT_TOOLS_GID),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            fetch_timeout_secs: None,
            request_form_url: DEFAULT_REQUEST_FORM_URL.into(),
            snapshot_path: None,
        }
    }

    /// 環境変数を優先
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("TOOL_LIBRARY_MATERIALS_URL") {
            self.materials = value.parse().map_err(ToolLibraryError::Config)?;
        }
        if let Ok(value) = std::env::var("TOOL_LIBRARY_TOOLS_URL") {
            self.tools = value.parse().map_err(ToolLibraryError::Config)?;
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }

    pub fn snapshot_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.snapshot_path {
            return Ok(path.clone());
        }

        let base = dirs::cache_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
            .ok_or_else(|| ToolLibraryError::Config("キャッシュディレクトリが見つかりません".into()))?;
        Ok(base.join("tool-library").join(SNAPSHOT_FILE_NAME))
    }
}
