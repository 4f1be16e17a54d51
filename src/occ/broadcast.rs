//! WebSocket broadcaster for the OCC dashboard.
//!
//! Holds the registry of connected dashboard clients and pushes the same
//! JSON frame to all of them: a full snapshot on connect, fresh metrics on
//! an interval, and alert frames whenever an alert is raised or
//! acknowledged. A send to a closed socket is skipped and the client is
//! pruned; there is no retry, no backpressure, and no ordering guarantee
//! across clients.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;

use super::metrics::{MetricsManager, MetricsSnapshot};
use crate::db::models::Alert;

/// Frames pushed to dashboard clients.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum OccFrame {
    #[serde(rename = "snapshot")]
    Snapshot {
        metrics: MetricsSnapshot,
        alerts: Vec<Alert>,
    },
    #[serde(rename = "metrics")]
    Metrics { metrics: MetricsSnapshot },
    #[serde(rename = "alert_raised")]
    AlertRaised { alert: Alert },
    #[serde(rename = "alert_acked")]
    AlertAcked { alert: Alert },
}

/// Shared registry of connected clients.
#[derive(Clone)]
pub struct BroadcastState {
    clients: Arc<RwLock<HashMap<u64, UnboundedSender<Message>>>>,
    next_client_id: Arc<AtomicU64>,
}

impl Default for BroadcastState {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastState {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
            next_client_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Register a client sender, returning its assigned id.
    pub async fn register(&self, tx: UnboundedSender<Message>) -> u64 {
        let id = self.next_client_id.fetch_add(1, Ordering::Relaxed);
        self.clients.write().await.insert(id, tx);
        id
    }

    pub async fn unregister(&self, id: u64) {
        self.clients.write().await.remove(&id);
    }

    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Send the same text payload to every registered client. Clients whose
    /// channel is closed are pruned instead of failing the broadcast.
    pub async fn broadcast(&self, payload: &str) {
        let mut closed: Vec<u64> = Vec::new();
        {
            let clients = self.clients.read().await;
            for (id, tx) in clients.iter() {
                if tx.send(Message::Text(payload.to_string())).is_err() {
                    closed.push(*id);
                }
            }
        }
        if !closed.is_empty() {
            let mut clients = self.clients.write().await;
            for id in closed {
                clients.remove(&id);
                tracing::debug!("Pruned closed OCC client {}", id);
            }
        }
    }

    pub async fn broadcast_frame(&self, frame: &OccFrame) {
        match serde_json::to_string(frame) {
            Ok(payload) => self.broadcast(&payload).await,
            Err(e) => tracing::warn!("Failed to serialize OCC frame: {}", e),
        }
    }
}

/// Recompute the metrics snapshot on an interval and push it to every
/// client, mirroring the source dashboard's timer loop.
pub fn spawn_metrics_ticker(state: BroadcastState, pool: PgPool) {
    let interval_secs = crate::config::broadcast_interval_secs();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            if state.client_count().await == 0 {
                continue;
            }
            match MetricsManager::new(&pool).snapshot().await {
                Ok(metrics) => {
                    state.broadcast_frame(&OccFrame::Metrics { metrics }).await;
                },
                Err(e) => {
                    tracing::warn!("Failed to compute metrics snapshot: {}", e);
                },
            }
        }
    });
}

/// Drive one dashboard client connection: register it, send the initial
/// snapshot, forward broadcast frames, and clean up on disconnect.
pub async fn handle_client_socket(socket: WebSocket, state: BroadcastState, pool: PgPool) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    // Forward frames from the registry channel onto the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let client_id = state.register(tx.clone()).await;
    tracing::info!("OCC client {} connected", client_id);

    // Initial snapshot: current metrics plus the active alert list
    let snapshot = MetricsManager::new(&pool).snapshot().await;
    let alerts = crate::repos::AlertRepo::new(&pool).active().await;
    match (snapshot, alerts) {
        (Ok(metrics), Ok(alerts)) => {
            let frame = OccFrame::Snapshot { metrics, alerts };
            match serde_json::to_string(&frame) {
                Ok(payload) => {
                    let _ = tx.send(Message::Text(payload));
                },
                Err(e) => tracing::warn!("Failed to serialize snapshot: {}", e),
            }
        },
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("Failed to build initial snapshot: {}", e);
        },
    }

    // Dashboards only listen; drain the read side until the peer closes
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    tracing::trace!("Received from OCC client: {}", text);
                },
                Message::Close(_) => {
                    break;
                },
                _ => {},
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    state.unregister(client_id).await;
    tracing::info!("OCC client {} disconnected", client_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_alert() -> Alert {
        Alert {
            id: 1,
            severity: "warning".to_string(),
            source: "icu".to_string(),
            message: "ICU occupancy above 50%".to_string(),
            acknowledged: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_frame_tags() {
        let frame = OccFrame::AlertRaised {
            alert: sample_alert(),
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains(r#""type":"alert_raised""#));
    }

    #[tokio::test]
    async fn test_register_assigns_distinct_ids() {
        let state = BroadcastState::new();
        let (tx1, _rx1) = tokio::sync::mpsc::unbounded_channel();
        let (tx2, _rx2) = tokio::sync::mpsc::unbounded_channel();
        let a = state.register(tx1).await;
        let b = state.register(tx2).await;
        assert_ne!(a, b);
        assert_eq!(state.client_count().await, 2);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_open_client() {
        let state = BroadcastState::new();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        state.register(tx).await;

        state.broadcast("hello").await;

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg, Message::Text("hello".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_prunes_closed_client() {
        let state = BroadcastState::new();
        let (tx_open, mut rx_open) = tokio::sync::mpsc::unbounded_channel();
        let (tx_closed, rx_closed) = tokio::sync::mpsc::unbounded_channel();
        state.register(tx_open).await;
        state.register(tx_closed).await;
        drop(rx_closed);

        state.broadcast("tick").await;

        // The closed client is pruned, the open one still got the payload
        assert_eq!(state.client_count().await, 1);
        assert!(rx_open.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_unregister_removes_client() {
        let state = BroadcastState::new();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let id = state.register(tx).await;
        state.unregister(id).await;
        assert_eq!(state.client_count().await, 0);
    }
}
