//! Shared fixtures for backend tests

#![allow(dead_code)]

use chrono::Utc;
use dns_controlplane_backend::{PoolServer, get_server_object};
use dns_controlplane_core::ConfigRegistry;
use dns_controlplane_core::types::{Domain, DomainStatus, NOT_DELETED};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub fn domain(name: &str) -> Domain {
    let now = Utc::now();
    Domain {
        id: "3f1d2c4b-5a69-4c55-9a0e-8a2f6c1e0b7d".to_string(),
        tenant_id: "tenant-a".to_string(),
        name: name.to_string(),
        email: "hostmaster@example.org".to_string(),
        ttl: 3600,
        serial: 1_700_000_000,
        refresh: 3600,
        retry: 600,
        expire: 86400,
        minimum: 3600,
        status: DomainStatus::Active,
        description: None,
        deleted: NOT_DELETED.to_string(),
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn pool_server(registry: &ConfigRegistry, backend: &str, server_id: &str) -> PoolServer {
    get_server_object(registry, backend, server_id).unwrap()
}

/// One-shot HTTP responder; yields the raw request it received.
pub async fn respond_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {status} Status\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        request
    });

    (format!("http://{addr}"), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
