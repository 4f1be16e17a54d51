//! Broadcast registry behavior through the public API.
//!
//! Exercises the OCC client registry the way the WebSocket layer drives it:
//! many clients, payloads fanned out to all of them, closed clients pruned
//! without disturbing the rest. No live socket or database is needed.

use axum::extract::ws::Message;
use medops::occ::broadcast::BroadcastState;

#[tokio::test]
async fn test_fanout_reaches_every_client() {
    let state = BroadcastState::new();
    let mut receivers = Vec::new();
    for _ in 0..10 {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        state.register(tx).await;
        receivers.push(rx);
    }

    state.broadcast("payload").await;

    for rx in receivers.iter_mut() {
        let msg = rx.recv().await.expect("client missed broadcast");
        assert_eq!(msg, Message::Text("payload".to_string()));
    }
}

#[tokio::test]
async fn test_every_client_sees_same_payload_order() {
    let state = BroadcastState::new();
    let (tx_a, mut rx_a) = tokio::sync::mpsc::unbounded_channel();
    let (tx_b, mut rx_b) = tokio::sync::mpsc::unbounded_channel();
    state.register(tx_a).await;
    state.register(tx_b).await;

    state.broadcast("first").await;
    state.broadcast("second").await;

    for rx in [&mut rx_a, &mut rx_b] {
        assert_eq!(rx.recv().await.unwrap(), Message::Text("first".to_string()));
        assert_eq!(rx.recv().await.unwrap(), Message::Text("second".to_string()));
    }
}

#[tokio::test]
async fn test_closed_clients_do_not_break_fanout() {
    let state = BroadcastState::new();

    // Interleave open and closed clients
    let mut open = Vec::new();
    for i in 0..6 {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        state.register(tx).await;
        if i % 2 == 0 {
            open.push(rx);
        } else {
            drop(rx);
        }
    }
    assert_eq!(state.client_count().await, 6);

    state.broadcast("tick").await;

    // Closed halves pruned, open halves served
    assert_eq!(state.client_count().await, 3);
    for rx in open.iter_mut() {
        assert!(rx.recv().await.is_some());
    }
}

#[tokio::test]
async fn test_registry_empty_after_all_unregister() {
    let state = BroadcastState::new();
    let mut ids = Vec::new();
    for _ in 0..4 {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        ids.push(state.register(tx).await);
    }
    for id in ids {
        state.unregister(id).await;
    }
    assert_eq!(state.client_count().await, 0);

    // Broadcasting to an empty registry is a no-op, not an error
    state.broadcast("nobody home").await;
}
