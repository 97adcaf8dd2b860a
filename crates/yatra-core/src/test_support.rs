//! Canned HTTP responses on a local socket, for exercising the real clients.

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

/// One response served to one connection.
pub struct Canned {
    pub status: u16,
    pub body: &'static str,
}

impl Canned {
    pub fn new(status: u16, body: &'static str) -> Self {
        Self { status, body }
    }
}

/// Serves `responses` in order, one connection each, on 127.0.0.1.
///
/// Returns the base URL and a handle resolving to the request line
/// (`GET /path?query HTTP/1.1`) of every request received.
pub async fn serve(responses: Vec<Canned>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

    let handle = tokio::spawn(async move {
        let mut request_lines = Vec::new();
        for canned in responses {
            let (mut stream, _) = listener.accept().await.expect("accept");
            request_lines.push(read_request_line(&mut stream).await);
            let response = format!(
                "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                canned.status,
                canned.body.len(),
                canned.body
            );
            stream
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            let _ = stream.shutdown().await;
        }
        request_lines
    });

    (base_url, handle)
}

/// Base URL of a port nothing listens on.
pub async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

async fn read_request_line(stream: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        let n = stream.read(&mut chunk).await.expect("read request");
        if n == 0 {
            break buffer.len();
        }
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body_read = buffer.len() - head_end;
    while body_read < content_length {
        let n = stream.read(&mut chunk).await.expect("read body");
        if n == 0 {
            break;
        }
        body_read += n;
    }

    head.lines().next().unwrap_or_default().to_string()
}
