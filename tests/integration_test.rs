//! Integration tests for reelcrop
//!
//! ローカルに立てた1回限りのHTTPサーバーを相手に、変換リポジトリと
//! CLIワークフロー全体を検証する。

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use reelcrop::adapter::config::Config;
use reelcrop::adapter::http::client::GenerateClient;
use reelcrop::adapter::repositories::http_transform_repository::HttpTransformRepository;
use reelcrop::domain::entities::workflow_state::Phase;
use reelcrop::domain::error::{RemoteError, WorkflowError};
use reelcrop::domain::repositories::transform_repository::{ImageUpload, TransformRepository};
use reelcrop::driver::{Args, ReelCropWorkflow};

const PNG_BODY: &[u8] = b"\x89PNG\r\n\x1a\nreel";

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn boundary_of(head: &str) -> Option<String> {
    head.lines()
        .find(|line| line.to_ascii_lowercase().starts_with("content-type:"))
        .and_then(|line| line.split("boundary=").nth(1))
        .map(|b| b.trim().trim_matches('"').to_string())
}

/// Accepts one request, answers it and returns the raw request text
async fn serve_once(status_line: &'static str, body: &'static [u8]) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);

            let Some(head_end) = find(&request, b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&request[..head_end]).to_string();
            let Some(boundary) = boundary_of(&head) else {
                break;
            };
            if find(&request[head_end..], format!("--{}--", boundary).as_bytes()).is_some() {
                break;
            }
        }

        let header = format!(
            "HTTP/1.1 {}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status_line,
            body.len()
        );
        socket.write_all(header.as_bytes()).await.unwrap();
        socket.write_all(body).await.unwrap();
        socket.shutdown().await.unwrap();

        String::from_utf8_lossy(&request).to_string()
    });

    (base_url, handle)
}

fn upload() -> ImageUpload {
    ImageUpload {
        file_name: "shot.png".to_string(),
        media_type: "image/png".to_string(),
        data: b"\x89PNG\r\n\x1a\nshot".to_vec(),
    }
}

fn repository(base_url: &str) -> HttpTransformRepository {
    HttpTransformRepository::new(GenerateClient::new(format!("{}/generate", base_url)).unwrap())
}

#[tokio::test]
async fn test_transform_posts_multipart_file() {
    let (base_url, server) = serve_once("200 OK", PNG_BODY).await;

    let result = repository(&base_url).transform(&upload()).await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(result, PNG_BODY);
    assert!(request.starts_with("POST /generate HTTP/1.1"));
    assert!(request.contains("multipart/form-data"));
    assert!(request.contains(r#"name="file""#));
    assert!(request.contains(r#"filename="shot.png""#));
}

#[tokio::test]
async fn test_transform_non_success_status() {
    let (base_url, server) = serve_once("500 Internal Server Error", b"boom").await;

    let result = repository(&base_url).transform(&upload()).await;
    server.await.unwrap();

    assert_eq!(result, Err(RemoteError::Status(500)));
    assert_eq!(result.unwrap_err().to_string(), "Server error: 500");
}

#[tokio::test]
async fn test_transform_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = repository(&base_url).transform(&upload()).await.unwrap_err();

    assert!(matches!(err, RemoteError::Transport(_)));
    assert!(err.to_string().starts_with("Network error:"));
}

fn write_image(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("screenshot.png");
    fs::write(&path, b"\x89PNG\r\n\x1a\nscreenshot").unwrap();
    path
}

fn config_for(base_url: &str) -> Config {
    Config {
        backend_url: base_url.to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_cli_workflow_end_to_end() {
    let (base_url, server) = serve_once("200 OK", PNG_BODY).await;
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let image = write_image(&input_dir);
    let args = Args::parse_from(["reelcrop", "--json", image.to_str().unwrap()]);

    let mut workflow = ReelCropWorkflow::new(config_for(&base_url), output_dir.path()).unwrap();
    let report = workflow.execute(&args).await.unwrap();
    server.await.unwrap();

    let phases: Vec<Phase> = report.frames.iter().map(|f| f.phase).collect();
    assert_eq!(phases, vec![Phase::Ready, Phase::Processing, Phase::Completed]);

    let saved = output_dir.path().join("instagram-reel-cropped.png");
    assert_eq!(report.saved_to, Some(saved.clone()));
    assert_eq!(fs::read(&saved).unwrap(), PNG_BODY);
    assert_eq!(workflow.live_handle_count(), 0);
}

#[tokio::test]
async fn test_cli_workflow_server_error() {
    let (base_url, server) = serve_once("503 Service Unavailable", b"").await;
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let image = write_image(&input_dir);
    let args = Args::parse_from(["reelcrop", image.to_str().unwrap()]);

    let mut workflow = ReelCropWorkflow::new(config_for(&base_url), output_dir.path()).unwrap();
    let err = workflow.execute(&args).await.unwrap_err();
    server.await.unwrap();

    assert_eq!(
        err.downcast_ref::<WorkflowError>(),
        Some(&WorkflowError::RemoteFailure(RemoteError::Status(503)))
    );
    assert!(!output_dir.path().join("instagram-reel-cropped.png").exists());
}

#[tokio::test]
async fn test_cli_workflow_dry_run_makes_no_request() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let image = write_image(&input_dir);
    let args = Args::parse_from(["reelcrop", "--dry-run", image.to_str().unwrap()]);

    // 接続先が存在しなくても dry-run は成功する
    let mut workflow =
        ReelCropWorkflow::new(config_for("http://127.0.0.1:9"), output_dir.path()).unwrap();
    let report = workflow.execute(&args).await.unwrap();

    assert_eq!(report.frames.len(), 1);
    assert!(report.saved_to.is_none());
    assert_eq!(fs::read_dir(output_dir.path()).unwrap().count(), 0);
}
