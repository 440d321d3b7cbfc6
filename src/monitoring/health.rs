//! Health check HTTP endpoint.
//!
//! Provides a tiny HTTP server on localhost:9090/health that returns
//! monitor status as JSON. Used by external uptime monitors.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::monitor::cycle::CycleSummary;

/// Shared health state updated by the driver loop.
#[derive(Clone)]
pub struct HealthState {
    inner: Arc<RwLock<HealthData>>,
}

#[derive(Debug, Clone, Serialize)]
struct HealthData {
    status: String,
    cycle_number: u64,
    started_at: DateTime<Utc>,
    last_cycle_at: Option<DateTime<Utc>>,
    last_cycle_locations: usize,
    last_cycle_sent: usize,
    last_cycle_failed: usize,
    uptime_seconds: i64,
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HealthData {
                status: "ok".to_string(),
                cycle_number: 0,
                started_at: Utc::now(),
                last_cycle_at: None,
                last_cycle_locations: 0,
                last_cycle_sent: 0,
                last_cycle_failed: 0,
                uptime_seconds: 0,
            })),
        }
    }

    pub fn record_cycle(&self, cycle_number: u64, summary: &CycleSummary) {
        let inner = self.inner.clone();
        let locations = summary.locations.len();
        let sent = summary.total_sent();
        let failed = summary.total_failed();
        tokio::spawn(async move {
            let mut data = inner.write().await;
            data.cycle_number = cycle_number;
            data.last_cycle_at = Some(Utc::now());
            data.last_cycle_locations = locations;
            data.last_cycle_sent = sent;
            data.last_cycle_failed = failed;
            data.uptime_seconds = (Utc::now() - data.started_at).num_seconds();
        });
    }
}

/// Spawn the health check HTTP server. Returns a handle that can be aborted.
pub fn spawn_health_server(state: HealthState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let addr = "127.0.0.1:9090";
        let listener = match TcpListener::bind(addr).await {
            Ok(l) => {
                info!(addr, "Health check server listening");
                l
            }
            Err(e) => {
                warn!(error = %e, addr, "Failed to bind health check server — continuing without it");
                return;
            }
        };

        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    warn!(error = %e, "Failed to accept health check connection");
                    continue;
                }
            };

            let state = state.clone();
            tokio::spawn(async move {
                // Read the request (we don't care about the contents)
                let mut buf = [0u8; 1024];
                let _ = tokio::io::AsyncReadExt::read(&mut socket, &mut buf).await;

                // Build JSON response
                let data = state.inner.read().await;
                let body = serde_json::to_string(&*data).unwrap_or_else(|_| {
                    r#"{"status":"error","message":"serialization failed"}"#.to_string()
                });

                let response = format!(
                    "HTTP/1.1 200 OK\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     Connection: close\r\n\
                     \r\n\
                     {}",
                    body.len(),
                    body
                );

                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    })
}
