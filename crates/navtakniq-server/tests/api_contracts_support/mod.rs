// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use navtakniq_server::{create_app_with_store, FakeStore, ServerConfig};
use navtakniq_store::ContentStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub async fn spawn_app(store: Arc<dyn ContentStore>) -> SocketAddr {
    spawn_app_with_config(store, ServerConfig::default()).await
}

pub async fn spawn_app_with_config(store: Arc<dyn ContentStore>, config: ServerConfig) -> SocketAddr {
    let app = create_app_with_store(store, config).await;
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

pub async fn spawn_fake() -> (SocketAddr, Arc<FakeStore>) {
    let store = Arc::new(FakeStore::default());
    let addr = spawn_app(store.clone()).await;
    (addr, store)
}

pub fn base_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}

pub async fn send_raw_with_method(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some(payload) = body {
        req.push_str("Content-Type: application/json\r\n");
        req.push_str(&format!("Content-Length: {}\r\n", payload.len()));
    }
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    req.push_str("\r\n");
    if let Some(payload) = body {
        req.push_str(payload);
    }
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

pub fn json_body(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("json body")
}
