//! Shared utilities for the integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use imgprobe::config::ProbeConfig;
use imgprobe::HttpServer;

/// A PNG-looking payload of exactly `len` bytes (magic prefix plus
/// padding). Enough to exercise size accounting without a real image.
pub fn png_payload(len: usize) -> Vec<u8> {
    let magic: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let mut body = magic.to_vec();
    body.resize(len, 0);
    body
}

/// Start an imgprobe server on an ephemeral port, returning its
/// address. The server task runs until the test process exits.
pub async fn start_server(config: ProbeConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        HttpServer::new(config).run(listener).await.unwrap();
    });
    addr
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut byte = [0u8; 1];
    // Read until the blank line; these mocks never accept bodies.
    while !buf.ends_with(b"\r\n\r\n") {
        match socket.read(&mut byte).await {
            Ok(0) | Err(_) => break,
            Ok(_) => buf.push(byte[0]),
        }
    }
}

fn status_line(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        403 => "403 Forbidden",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Start a mock image origin that serves a fixed binary body with the
/// given content type. Returns its address.
pub async fn start_image_backend(content_type: &'static str, body: Vec<u8>) -> SocketAddr {
    start_scripted_backend(move |_| (200, content_type, body.clone())).await
}

/// Start a programmable mock origin. The closure receives the
/// zero-based request index and returns (status, content type, body).
pub async fn start_scripted_backend<F>(script: F) -> SocketAddr
where
    F: Fn(usize) -> (u16, &'static str, Vec<u8>) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let script = Arc::new(script);

    tokio::spawn(async move {
        let mut request_index = 0usize;
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let index = request_index;
                    request_index += 1;
                    let script = script.clone();
                    tokio::spawn(async move {
                        read_request_head(&mut socket).await;
                        let (status, content_type, body) = script(index);
                        let head = format!(
                            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                            status_line(status),
                            content_type,
                            body.len()
                        );
                        let _ = socket.write_all(head.as_bytes()).await;
                        let _ = socket.write_all(&body).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
