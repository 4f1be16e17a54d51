//! REST routes for the OCC dashboard service.

use axum::{
    extract::{Path, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use super::broadcast::OccFrame;
use super::metrics::MetricsManager;
use crate::error::MedOpsError;
use crate::repos::AlertRepo;
use crate::server::{error_response, ok_response, AppState};
use crate::services::models::RaiseAlertRequest;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(get_metrics))
        .route("/alerts", get(list_alerts).post(raise_alert))
        .route("/alerts/:id/ack", post(acknowledge_alert))
}

async fn get_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match MetricsManager::new(&state.db_pool).snapshot().await {
        Ok(snapshot) => ok_response(StatusCode::OK, snapshot),
        Err(e) => error_response(e),
    }
}

async fn list_alerts(State(state): State<AppState>) -> impl IntoResponse {
    match AlertRepo::new(&state.db_pool).active().await {
        Ok(alerts) => ok_response(StatusCode::OK, alerts),
        Err(e) => error_response(e),
    }
}

/// Raise an alert and push it to every connected dashboard.
async fn raise_alert(
    State(state): State<AppState>,
    Json(req): Json<RaiseAlertRequest>,
) -> impl IntoResponse {
    match AlertRepo::new(&state.db_pool)
        .raise(&req.severity, &req.source, &req.message)
        .await
    {
        Ok(alert) => {
            if let Some(broadcast) = &state.broadcast {
                broadcast
                    .broadcast_frame(&OccFrame::AlertRaised {
                        alert: alert.clone(),
                    })
                    .await;
            }
            ok_response(StatusCode::CREATED, alert)
        },
        Err(e) => error_response(e),
    }
}

async fn acknowledge_alert(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match AlertRepo::new(&state.db_pool).acknowledge(id).await {
        Ok(alert) => {
            if let Some(broadcast) = &state.broadcast {
                broadcast
                    .broadcast_frame(&OccFrame::AlertAcked {
                        alert: alert.clone(),
                    })
                    .await;
            }
            ok_response(StatusCode::OK, alert)
        },
        Err(e) => error_response(e),
    }
}

/// Upgrade to a dashboard WebSocket connection.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let Some(broadcast) = state.broadcast.clone() else {
        // Only reachable if the route is mounted outside the OCC service
        return error_response(MedOpsError::Config(
            "WebSocket broadcaster not running".to_string(),
        ));
    };
    let pool = state.db_pool.clone();
    ws.on_upgrade(move |socket| super::broadcast::handle_client_socket(socket, broadcast, pool))
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_creation() {
        let _router = routes();
    }
}
