use photo_gallery::upload::{
    FileSource, ProgressMode, SelectedFile, TransferProgress, UploadClient, UploadController,
    UploadError,
};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep, timeout};

/// Serves exactly one request with a canned response and hands back the raw request.
async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{addr}/upload"), server)
}

fn message_body(message: &str) -> String {
    serde_json::json!({ "message": message }).to_string()
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        let Some(header_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let content_length = text[..header_end].lines().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        });

        let complete = match content_length {
            Some(length) => buf.len() >= header_end + 4 + length,
            None => text.ends_with("--\r\n") || text.ends_with("0\r\n\r\n"),
        };
        if complete {
            break;
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn batch() -> Vec<SelectedFile> {
    vec![
        SelectedFile::new("sunset.jpg", b"first image".to_vec()),
        SelectedFile::new("forest.png", b"second image".to_vec()),
    ]
}

#[tokio::test]
async fn posts_every_file_under_the_files_field() {
    let (endpoint, server) = serve_once("200 OK", message_body("2 files successfully uploaded!")).await;
    let client = UploadClient::new(endpoint);

    let message = client.upload(batch(), |_| {}).await.unwrap();
    assert_eq!(message, "2 files successfully uploaded!");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /upload HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("content-type: multipart/form-data; boundary="));
    assert_eq!(request.matches(r#"name="files""#).count(), 2);
    assert!(request.contains(r#"filename="sunset.jpg""#));
    assert!(request.contains(r#"filename="forest.png""#));
    assert!(request.contains("image/jpeg"));
    assert!(request.contains("first image"));
    assert!(request.contains("second image"));
}

#[tokio::test]
async fn reports_transfer_progress_per_file() {
    let (endpoint, server) = serve_once("200 OK", message_body("OK")).await;
    let client = UploadClient::new(endpoint);

    let big = vec![7u8; 150 * 1024];
    let files = vec![
        SelectedFile::new("big.bmp", big),
        SelectedFile::new("small.gif", b"gif".to_vec()),
    ];

    let seen = Arc::new(Mutex::new(Vec::<TransferProgress>::new()));
    let sink = Arc::clone(&seen);
    client
        .upload(files, move |progress| sink.lock().unwrap().push(progress))
        .await
        .unwrap();
    server.await.unwrap();

    let seen = seen.lock().unwrap();
    let big_steps: Vec<_> = seen.iter().filter(|p| p.file_index == 0).collect();
    assert_eq!(big_steps.len(), 3);
    assert!(big_steps.windows(2).all(|pair| pair[0].sent < pair[1].sent));
    assert_eq!(big_steps.last().unwrap().percent(), 100.0);

    let small_steps: Vec<_> = seen.iter().filter(|p| p.file_index == 1).collect();
    assert_eq!(small_steps.len(), 1);
    assert_eq!(small_steps[0].sent, 3);
}

#[tokio::test]
async fn non_success_status_is_a_rejection() {
    let (endpoint, server) = serve_once("413 Payload Too Large", message_body("Too large")).await;
    let client = UploadClient::new(endpoint);

    let err = client.upload(batch(), |_| {}).await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, UploadError::Rejected { status: 413, .. }));
    assert_eq!(err.to_string(), "Upload failed: Too large");
}

#[tokio::test]
async fn unreadable_body_is_a_transport_error() {
    let (endpoint, server) = serve_once("500 Internal Server Error", "Internal Server Error".to_owned()).await;
    let client = UploadClient::new(endpoint);

    let err = client.upload(batch(), |_| {}).await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, UploadError::Transport(_)));
    assert!(err.to_string().starts_with("Error uploading files: "));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = UploadClient::new(format!("http://{addr}/upload"));
    let err = client.upload(batch(), |_| {}).await.unwrap_err();

    assert!(matches!(err, UploadError::Transport(_)));
}

async fn poll_until<F>(controller: &mut UploadController, now: f64, done: F)
where
    F: Fn(&UploadController) -> bool,
{
    timeout(Duration::from_secs(10), async {
        loop {
            controller.poll(now);
            if done(controller) {
                break;
            }
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("upload never finished");
}

#[tokio::test]
async fn empty_selection_sends_nothing() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let client = UploadClient::new(format!("http://{addr}/upload"));
    let mut controller = UploadController::new(
        client,
        tokio::runtime::Handle::current(),
        ProgressMode::Simulated,
    );

    assert!(!controller.select_files(FileSource::Drop, Vec::new(), 0.0));
    controller.poll(0.1);
    assert!(!controller.board().panel().is_visible());
    assert_eq!(controller.board().in_flight(), 0);

    let accepted = timeout(Duration::from_millis(200), listener.accept()).await;
    assert!(accepted.is_err(), "no request should reach the server");
}

#[tokio::test]
async fn success_shows_banner_for_five_seconds() {
    let (endpoint, server) = serve_once("200 OK", message_body("OK")).await;
    let mut controller = UploadController::new(
        UploadClient::new(endpoint),
        tokio::runtime::Handle::current(),
        ProgressMode::Transfer,
    );

    assert!(controller.select_files(FileSource::Picker, batch(), 0.0));
    assert_eq!(controller.board().panel().rows().len(), 2);

    poll_until(&mut controller, 1.0, |c| c.board().in_flight() == 0).await;
    server.await.unwrap();

    assert_eq!(controller.board().banner(1.0), Some("OK"));
    assert!(controller.board().alert().is_none());
    assert!(
        controller
            .board()
            .panel()
            .rows()
            .iter()
            .all(|row| row.progress() == 100.0)
    );

    controller.poll(5.9);
    assert_eq!(controller.board().banner(5.9), Some("OK"));
    controller.poll(6.0);
    assert_eq!(controller.board().banner(6.0), None);
}

#[tokio::test]
async fn rejection_raises_only_an_alert() {
    let (endpoint, server) = serve_once("400 Bad Request", message_body("Too large")).await;
    let mut controller = UploadController::new(
        UploadClient::new(endpoint),
        tokio::runtime::Handle::current(),
        ProgressMode::Simulated,
    );

    controller.select_files(FileSource::Drop, batch(), 0.0);
    poll_until(&mut controller, 0.05, |c| c.board().in_flight() == 0).await;
    server.await.unwrap();

    assert!(controller.board().banner(0.05).is_none());
    assert_eq!(controller.board().alert(), Some("Upload failed: Too large"));

    controller.dismiss_alert();
    assert!(controller.board().alert().is_none());
}

#[tokio::test]
async fn cancel_clears_rows_but_banner_still_appears() {
    let (endpoint, server) = serve_once("200 OK", message_body("OK")).await;
    let mut controller = UploadController::new(
        UploadClient::new(endpoint),
        tokio::runtime::Handle::current(),
        ProgressMode::Simulated,
    );

    controller.select_files(FileSource::Picker, batch(), 0.0);
    controller.cancel();
    assert!(controller.board().panel().rows().is_empty());
    assert!(!controller.board().panel().is_visible());

    poll_until(&mut controller, 0.5, |c| c.board().in_flight() == 0).await;
    server.await.unwrap();

    assert_eq!(controller.board().banner(0.5), Some("OK"));
    assert!(!controller.board().panel().is_visible());
}
