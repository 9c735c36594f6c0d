//! シート取得モジュール
//!
//! 材料シートと工具シートを同時に取得し、両方そろうまで待つ。
//! どちらかが失敗すれば全体を失敗とする（再試行なし）。
//! タイムアウトは任意。指定しなければ通信層がエラーを返すまで待ち続ける。

mod locator;

pub use locator::SheetLocator;

use crate::error::{Result, ToolLibraryError};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// 取得した2シートの生テキスト
#[derive(Debug, Clone)]
pub struct SheetTexts {
    pub materials: String,
    pub tools: String,
}

pub struct SheetFetcher {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl SheetFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, timeout })
    }

    /// 材料・工具の2シートを並行して取得する
    pub async fn fetch_both(
        &self,
        materials: &SheetLocator,
        tools: &SheetLocator,
    ) -> Result<SheetTexts> {
        let (materials, tools) = tokio::try_join!(
            self.fetch("materials", materials),
            self.fetch("tools", tools),
        )?;
        Ok(SheetTexts { materials, tools })
    }

    /// 1シートを取得する
    pub async fn fetch(&self, sheet: &str, locator: &SheetLocator) -> Result<String> {
        debug!(sheet, %locator, "fetching sheet");
        let text = self.with_timeout(sheet, self.fetch_inner(sheet, locator)).await?;
        debug!(sheet, bytes = text.len(), "sheet fetched");
        Ok(text)
    }

    async fn with_timeout<F>(&self, sheet: &str, fut: F) -> Result<String>
    where
        F: Future<Output = Result<String>>,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| ToolLibraryError::Timeout {
                    sheet: sheet.to_string(),
                    seconds: limit.as_secs(),
                })?,
            None => fut.await,
        }
    }

    async fn fetch_inner(&self, sheet: &str, locator: &SheetLocator) -> Result<String> {
        let fetch_error = |message: String| ToolLibraryError::Fetch {
            sheet: sheet.to_string(),
            message,
        };

        let url = match (locator, locator.url()) {
            (SheetLocator::File(path), _) => {
                return tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| fetch_error(format!("{}: {}", path.display(), e)));
            }
            (_, Some(url)) => url,
            (_, None) => return Err(fetch_error(format!("no URL for {}", locator))),
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolLibraryError::HttpStatus {
                sheet: sheet.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| fetch_error(e.to_string()))
    }
}
