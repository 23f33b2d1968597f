//! HTTP data source implementation
//!
//! One GET per poll against a configured endpoint that answers with a JSON
//! array of records. No request body, no authentication.

use async_trait::async_trait;
use anyhow::Result;
use flamewatch_core::{DataSource, SourceMetadata, TransportError};
use log::debug;
use std::time::{Duration, Instant};

pub use flamewatch_types::source_configs::http::HttpSourceConfig;

/// HTTP JSON endpoint source
pub struct HttpSource {
    metadata: SourceMetadata,
    config: HttpSourceConfig,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            metadata: SourceMetadata {
                id: "http".to_string(),
                name: "HTTP".to_string(),
                description: format!("JSON records from {}", config.endpoint),
            },
            config,
            client,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                endpoint: self.config.endpoint.clone(),
                timeout_ms: self.config.timeout_ms,
            }
        } else {
            TransportError::Request {
                endpoint: self.config.endpoint.clone(),
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    async fn fetch(&self) -> Result<Vec<u8>, TransportError> {
        let start = Instant::now();
        let response = self
            .client
            .get(&self.config.endpoint)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                endpoint: self.config.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        debug!(
            "Fetched {} bytes from {} in {:?}",
            body.len(),
            self.config.endpoint,
            start.elapsed()
        );
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and return the endpoint URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{}/flamex_data", addr)
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let body = r#"[{"sample_time":"2024-01-01T00:00:00Z","device_data":{"flame":1,"gas":2}}]"#;
        let endpoint = serve_once("200 OK", body).await;
        let source = HttpSource::new(HttpSourceConfig::new(endpoint)).unwrap();

        let raw = source.fetch().await.unwrap();
        assert_eq!(raw, body.as_bytes());
    }

    #[tokio::test]
    async fn test_error_status_is_transport_error() {
        let endpoint = serve_once("503 Service Unavailable", "").await;
        let source = HttpSource::new(HttpSourceConfig::new(endpoint)).unwrap();

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source =
            HttpSource::new(HttpSourceConfig::new(format!("http://{}/data", addr))).unwrap();
        assert!(matches!(
            source.fetch().await,
            Err(TransportError::Request { .. }) | Err(TransportError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        // Accept the connection but never answer
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let mut config = HttpSourceConfig::new(format!("http://{}/flamex_data", addr));
        config.timeout_ms = 100;
        let source = HttpSource::new(config).unwrap();

        let err = source.fetch().await.unwrap_err();
        assert!(
            matches!(err, TransportError::Timeout { timeout_ms: 100, .. }),
            "unexpected error: {err}"
        );
    }
}
