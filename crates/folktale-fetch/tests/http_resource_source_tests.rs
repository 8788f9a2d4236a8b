//! Integration tests for `HttpResourceSource` against a local one-shot server.

use folktale_core::error::FetchError;
use folktale_core::source::ResourceSource;
use folktale_fetch::HttpResourceSource;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves exactly one request with `status_line` and `body`, returning the
/// request line it received.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = vec![0_u8; 4096];
        let n = stream.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).into_owned();

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();

        request.lines().next().unwrap_or_default().to_owned()
    });

    (base_url, handle)
}

#[tokio::test]
async fn test_fetch_returns_body_on_success() {
    // Arrange
    let (base_url, server) = serve_once("200 OK", r#"{"creatures":[]}"#).await;
    let source = HttpResourceSource::new(&format!("{base_url}/content/"));

    // Act
    let body = source.fetch("story.json").await.unwrap();

    // Assert
    assert_eq!(body, br#"{"creatures":[]}"#);
    let request_line = server.await.unwrap();
    assert_eq!(request_line, "GET /content/story.json HTTP/1.1");
}

#[tokio::test]
async fn test_fetch_maps_non_success_status() {
    let (base_url, server) = serve_once("404 Not Found", "").await;
    let source = HttpResourceSource::new(&base_url);

    let result = source.fetch("ui-config.json").await;

    assert_eq!(result, Err(FetchError::Status(404)));
    server.await.unwrap();
}

#[tokio::test]
async fn test_fetch_maps_connection_failure_to_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let source = HttpResourceSource::new(&format!("http://{addr}"));

    let result = source.fetch("story.json").await;

    assert!(matches!(result, Err(FetchError::Transport(_))));
}
