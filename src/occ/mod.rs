//! OCC — the Operations Command Centre dashboard service.
//!
//! The one component of the platform with live behavior: REST routes for
//! the metrics snapshot and the alert feed, plus a WebSocket broadcaster
//! that pushes the same payload to every connected dashboard.

pub mod broadcast;
pub mod handlers;
pub mod metrics;
