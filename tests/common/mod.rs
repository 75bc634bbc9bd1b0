//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use parking_exporter::observability::metrics::sample;

pub const SUCCESS: &str = "parking_app_health_checks_total{status=\"success\"}";
pub const ERROR: &str = "parking_app_health_checks_total{status=\"error\"}";
pub const LATENCY_COUNT: &str = "parking_app_response_time_seconds_count";

/// Read the request head so closing the socket does not reset the connection.
async fn drain_request(socket: &mut TcpStream) {
    let mut buf = [0u8; 4096];
    let mut seen = Vec::new();
    while let Ok(n) = socket.read(&mut buf).await {
        if n == 0 {
            break;
        }
        seen.extend_from_slice(&buf[..n]);
        if seen.windows(4).any(|w| w == b"\r\n\r\n") || seen.len() > 64 * 1024 {
            break;
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        301 => "Moved Permanently",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Start a programmable mock parking app; returns its address.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        drain_request(&mut socket).await;
                        let (status, body) = f().await;
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock parking app that always answers with `status` and `body`.
pub async fn start_mock_backend(status: u16, body: String) -> SocketAddr {
    start_programmable_backend(move || {
        let body = body.clone();
        async move { (status, body) }
    })
    .await
}

/// Start a mock that writes `raw` verbatim to every connection, then closes it.
pub async fn start_raw_backend(raw: Vec<u8>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let raw = Arc::new(raw);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let raw = raw.clone();
            tokio::spawn(async move {
                drain_request(&mut socket).await;
                let _ = socket.write_all(&raw).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Accept connections but never answer.
pub async fn start_stalled_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Parking page with `occupied` taken and `free` empty spots.
pub fn parking_page(occupied: usize, free: usize) -> String {
    let mut rows = String::new();
    for i in 0..occupied + free {
        let flag = if i < occupied { "True" } else { "False" };
        rows.push_str(&format!(
            "\n      <tr>\n        <td>{}</td>\n        <td>{}</td>\n        <td>{}</td>\n        <td>{}</td>\n      </tr>",
            i + 1,
            i % 3,
            ["A", "B", "C"][i % 3],
            flag
        ));
    }
    format!(
        "<!doctype html>\n<html>\n  <body>\n    <h1>Parking</h1>\n    <table>\n      <tr><th>ID</th><th>Etaza</th><th>Sekcija</th><th>Je Okupirano</th></tr>{}\n    </table>\n  </body>\n</html>\n",
        rows
    )
}

/// Poll `rendered()` until `series` reaches at least `min`.
pub async fn wait_for_sample<F>(rendered: F, series: &str, min: f64) -> bool
where
    F: Fn() -> String,
{
    for _ in 0..100 {
        if sample(&rendered(), series).is_some_and(|v| v >= min) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}
