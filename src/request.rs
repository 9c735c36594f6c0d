//! 新しい物品のリクエスト

use crate::config::Config;
use crate::error::{Result, ToolLibraryError};
use tracing::info;

/// 設定のリクエストフォームを既定のブラウザで開く
pub fn request_item(config: &Config) -> Result<()> {
    info!(url = %config.request_form_url, "opening request form");
    open::that(&config.request_form_url).map_err(|e| ToolLibraryError::Browser(e.to_string()))
}
