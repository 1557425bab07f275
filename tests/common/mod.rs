//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use rate_prowler::config::EndpointConfig;

/// Mock backend answering each request with the status picked by `f`.
///
/// `f` receives the zero-based request number. Returns the bound address
/// and a live request counter.
pub async fn start_programmable_backend<F>(f: F) -> (SocketAddr, Arc<AtomicU32>)
where
    F: Fn(u32) -> u16 + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(AtomicU32::new(0));
    let f = Arc::new(f);

    let counter = calls.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        if !read_request_head(&mut socket).await {
                            return;
                        }
                        let status = f(counter.fetch_add(1, Ordering::SeqCst));
                        let body = "ok";
                        let response = format!(
                            "HTTP/1.1 {status} Mock\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                            body.len(),
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, calls)
}

/// Mock backend that always answers `status`.
#[allow(dead_code)]
pub async fn start_fixed_backend(status: u16) -> (SocketAddr, Arc<AtomicU32>) {
    start_programmable_backend(move |_| status).await
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

#[allow(dead_code)]
pub fn endpoint(name: &str, addr: SocketAddr, rate: &str, max_requests: u64) -> EndpointConfig {
    EndpointConfig {
        name: name.to_string(),
        url: format!("http://{addr}/probe"),
        rate: rate.to_string(),
        max_requests,
        proxy: None,
        error_wait_intervals: vec![0],
    }
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) -> bool {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 512];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return false,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    return true;
                }
            }
        }
    }
}
