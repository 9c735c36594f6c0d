//! シート取得のテスト
//!
//! ローカルファイルと、1回だけ応答するローカルHTTPサーバーから取得する

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tool_library::error::ToolLibraryError;
use tool_library::fetcher::{SheetFetcher, SheetLocator};

const TOOLS_CSV: &str = "General Name,Specific Name ,Category\ndrill,DeWalt,power tools\n";

/// 1回だけ応答するサーバーを起動する
async fn serve_once(status_line: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 2048];
        let _ = stream.read(&mut buf).await;

        let response = format!(
            "{}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
    });

    addr
}

fn url_for(addr: SocketAddr) -> SheetLocator {
    SheetLocator::Url(format!("http://{}/pub?output=csv", addr))
}

/// HTTPで取得
#[tokio::test]
async fn test_fetch_over_http() {
    let addr = serve_once("HTTP/1.1 200 OK", TOOLS_CSV).await;
    let fetcher = SheetFetcher::new(None).unwrap();

    let text = fetcher.fetch("tools", &url_for(addr)).await.expect("取得失敗");
    assert_eq!(text, TOOLS_CSV);
}

/// 成功以外のステータスはエラー
#[tokio::test]
async fn test_fetch_http_status_error() {
    let addr = serve_once("HTTP/1.1 404 Not Found", "").await;
    let fetcher = SheetFetcher::new(None).unwrap();

    let err = fetcher.fetch("materials", &url_for(addr)).await.unwrap_err();
    match err {
        ToolLibraryError::HttpStatus { sheet, status } => {
            assert_eq!(sheet, "materials");
            assert_eq!(status, 404);
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// 応答しないサーバーはタイムアウト
#[tokio::test]
async fn test_fetch_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (_stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let fetcher = SheetFetcher::new(Some(Duration::from_millis(200))).unwrap();
    let err = fetcher.fetch("tools", &url_for(addr)).await.unwrap_err();
    assert!(matches!(err, ToolLibraryError::Timeout { .. }));
}

/// 2シートの並行取得。片方が失敗すれば全体が失敗
#[tokio::test]
async fn test_fetch_both_requires_both() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let materials = dir.path().join("materials.csv");
    let tools = dir.path().join("tools.csv");
    std::fs::write(&materials, "General Name\nglue\n").unwrap();
    std::fs::write(&tools, TOOLS_CSV).unwrap();

    let fetcher = SheetFetcher::new(None).unwrap();
    let texts = fetcher
        .fetch_both(&SheetLocator::File(materials.clone()), &SheetLocator::File(tools))
        .await
        .unwrap();
    assert_eq!(texts.materials, "General Name\nglue\n");
    assert_eq!(texts.tools, TOOLS_CSV);

    let err = fetcher
        .fetch_both(
            &SheetLocator::File(materials),
            &SheetLocator::File(dir.path().join("missing.csv")),
        )
        .await
        .unwrap_err();
    match err {
        ToolLibraryError::Fetch { sheet, .. } => assert_eq!(sheet, "tools"),
        other => panic!("unexpected error: {other}"),
    }
}
