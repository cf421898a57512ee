//! HTTP server instance
//!
//! A [`Server`] is built from a [`ServiceConfig`] at startup, owns the
//! router, and serves until its cancellation token fires. Handlers receive
//! everything they need through axum state; nothing is process-global.

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::api::{create_app, ApiState};
use crate::config::ServiceConfig;

pub struct Server {
    config: ServiceConfig,
    state: ApiState,
}

impl Server {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            state: ApiState::new(),
        }
    }

    /// The fully layered router, usable without binding a socket.
    pub fn router(&self) -> Router {
        create_app(self.state.clone(), &self.config.server)
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener> {
        let addr = &self.config.server.addr;
        TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))
    }

    /// Bind and serve until `cancel` is triggered.
    pub async fn run(self, cancel: CancellationToken) -> Result<()> {
        let listener = self.bind().await?;
        self.serve(listener, cancel).await
    }

    /// Serve on an already-bound listener until `cancel` is triggered.
    ///
    /// In-flight requests complete before this returns.
    pub async fn serve(self, listener: TcpListener, cancel: CancellationToken) -> Result<()> {
        let local_addr: SocketAddr = listener
            .local_addr()
            .context("Failed to read listener address")?;
        info!("✓ HTTP server listening on {}", local_addr);
        info!("🎯 Predictions available at: http://{}/predict", local_addr);

        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
                info!("[HttpServer] Received shutdown signal");
            })
            .await;

        match result {
            Ok(()) => {
                info!("[HttpServer] Graceful shutdown complete");
                Ok(())
            }
            Err(e) => {
                error!("[HttpServer] Server error: {}", e);
                Err(anyhow::anyhow!("HTTP server error: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::PredictionResult;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn local_config() -> ServiceConfig {
        let mut config = ServiceConfig::default();
        config.server.addr = "127.0.0.1:0".to_string();
        config
    }

    #[tokio::test]
    async fn test_serves_over_tcp_and_shuts_down() {
        let server = Server::new(local_config());
        let listener = server.bind().await.unwrap();
        let addr = listener.local_addr().unwrap();

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(server.serve(listener, cancel.clone()));

        let body = r#"{"co2": 100}"#;
        let request = format!(
            "POST /predict HTTP/1.1\r\n\
             Host: {addr}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        );

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();

        assert!(raw.starts_with("HTTP/1.1 200"), "unexpected response: {raw}");
        let json = raw.split("\r\n\r\n").nth(1).unwrap();
        let result: PredictionResult = serde_json::from_str(json).unwrap();
        assert!((result.temperature - 2.2).abs() < 1e-9);

        cancel.cancel();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_websocket_echo_over_tcp() {
        let server = Server::new(local_config());
        let listener = server.bind().await.unwrap();
        let addr = listener.local_addr().unwrap();

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(server.serve(listener, cancel.clone()));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let handshake = format!(
            "GET /ws HTTP/1.1\r\n\
             Host: {addr}\r\n\
             Connection: Upgrade\r\n\
             Upgrade: websocket\r\n\
             Sec-WebSocket-Version: 13\r\n\
             Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\r\n"
        );
        stream.write_all(handshake.as_bytes()).await.unwrap();

        let mut head = Vec::new();
        while !head.ends_with(b"\r\n\r\n") {
            head.push(stream.read_u8().await.unwrap());
        }
        let head = String::from_utf8(head).unwrap();
        assert!(head.starts_with("HTTP/1.1 101"), "unexpected handshake: {head}");
        // RFC 6455 sample key/accept pair
        assert!(head.contains("s3pPLMBiTxaQ9kYGzzhZRbK+xOo="));

        // Client frames must be masked: FIN + text opcode, mask bit + length
        let payload = b"hello";
        let mask = [0x12_u8, 0x34, 0x56, 0x78];
        let mut frame = vec![0x81, 0x80 | u8::try_from(payload.len()).unwrap()];
        frame.extend_from_slice(&mask);
        frame.extend(payload.iter().enumerate().map(|(i, b)| b ^ mask[i % 4]));
        stream.write_all(&frame).await.unwrap();

        let opcode = stream.read_u8().await.unwrap();
        let len = stream.read_u8().await.unwrap();
        assert_eq!(opcode, 0x81);
        let mut reply = vec![0; usize::from(len & 0x7f)];
        stream.read_exact(&mut reply).await.unwrap();
        assert_eq!(reply, b"Echo: hello");

        drop(stream);
        cancel.cancel();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let first = Server::new(local_config());
        let listener = first.bind().await.unwrap();
        let taken = listener.local_addr().unwrap();

        let mut config = ServiceConfig::default();
        config.server.addr = taken.to_string();
        let err = Server::new(config).bind().await.unwrap_err();
        assert!(err.to_string().contains("Failed to bind"));
    }
}
