//! HTTP transport against a local one-shot server
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use markup_validate::service::{HttpSettings, HttpTransport, OutputFormat};
use markup_validate::{IgnoreSet, Transport, TransportError, ValidationError, Validator};

/// Accept one connection, answer with `status` and `body`, return the raw request
async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept connection");
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{addr}/check"), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.expect("read request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if request_complete(&buf) {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
    let body_len = buf.len() - (head_end + 4);

    match head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
    {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .is_ok_and(|len| body_len >= len),
        None => buf.ends_with(b"0\r\n\r\n") || buf.ends_with(b"--\r\n"),
    }
}

fn transport_for(endpoint: String) -> HttpTransport {
    HttpTransport::new(HttpSettings {
        endpoint,
        user_agent: "site-ci/2.0".to_string(),
        timeout: Some(Duration::from_secs(10)),
    })
    .expect("create transport")
}

#[tokio::test]
async fn test_request_carries_form_fields_and_user_agent() {
    let (endpoint, server) = serve_once("200 OK", r#"{"messages":[]}"#.to_string()).await;
    let transport = transport_for(endpoint);

    let body = transport
        .submit("<p>hello</p>", OutputFormat::Json)
        .await
        .expect("submit document");
    assert_eq!(body, r#"{"messages":[]}"#);

    let request = server.await.expect("server task");
    let lowered = request.to_ascii_lowercase();
    assert!(lowered.starts_with("post /check "), "request: {request}");
    assert!(lowered.contains("user-agent: site-ci/2.0"));
    assert!(lowered.contains("content-type: multipart/form-data; boundary="));

    let output_at = request
        .find("name=\"output\"")
        .expect("output field present");
    let after_output = &request[output_at + "name=\"output\"".len()..];
    assert!(after_output.trim_start().starts_with("json"));

    assert!(request.contains("name=\"uploaded_file\"; filename=\"document.html\""));
    assert!(request.contains("<p>hello</p>"));
}

#[tokio::test]
async fn test_error_status_keeps_truncated_body() {
    let (endpoint, server) = serve_once("503 Service Unavailable", "x".repeat(500)).await;
    let transport = transport_for(endpoint);

    let err = transport
        .submit("<p>hello</p>", OutputFormat::Json)
        .await
        .expect_err("503 must fail");
    server.await.expect("server task");

    match err {
        TransportError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body.chars().count(), 200);
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_validator_over_http_reports_findings() {
    let body = r#"{"messages":[
        {"type":"info","message":"Document checking completed."},
        {"type":"error","message":"Stray end tag div.","lastLine":"1","lastColumn":"16"}
    ]}"#;
    let (endpoint, server) = serve_once("200 OK", body.to_string()).await;
    let validator = Validator::with_transport(IgnoreSet::default(), transport_for(endpoint));

    let err = validator
        .validate("<p>hello</p></div>")
        .await
        .expect_err("stray end tag");
    server.await.expect("server task");

    let ValidationError::ValidationFailed { findings } = &err else {
        panic!("expected ValidationFailed, got {err:?}");
    };
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].message, "Stray end tag div.");
    assert_eq!(findings[0].context.as_deref(), Some("<p>hello</p></div>"));
}
