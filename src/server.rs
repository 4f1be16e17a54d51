use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Service;
use crate::error::MedOpsError;
use crate::occ;
use crate::services;
use crate::services::models::{ApiErrorBody, ApiResponse};

/// State shared across handlers of one service process.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub service: Service,
    pub port: u16,
    /// Present only when running the OCC service.
    pub broadcast: Option<occ::broadcast::BroadcastState>,
}

/// One running platform service bound to its conventional port.
pub struct ServiceServer {
    service: Service,
    port: u16,
    db_pool: PgPool,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

impl ServiceServer {
    pub fn new(service: Service, port: u16, db_pool: PgPool) -> Self {
        Self {
            service,
            port,
            db_pool,
        }
    }

    /// Run the service until the process is stopped.
    pub async fn run(self) -> Result<()> {
        let broadcast = if self.service == Service::Occ {
            let state = occ::broadcast::BroadcastState::new();
            occ::broadcast::spawn_metrics_ticker(state.clone(), self.db_pool.clone());
            Some(state)
        } else {
            None
        };

        let state = AppState {
            db_pool: self.db_pool,
            service: self.service,
            port: self.port,
            broadcast,
        };

        let app = create_router(state);

        let addr = format!("127.0.0.1:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind to {}", addr))?;

        tracing::info!("{} service listening on {}", self.service.name(), addr);

        axum::serve(listener, app).await.context("Server error")?;

        Ok(())
    }
}

/// Build the router for the service this process is running.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_handler))
        .merge(service_routes(state.service));

    let mut router = Router::new().nest("/api", api_routes);

    // The WebSocket upgrade lives outside the /api prefix, as in the source
    if state.service == Service::Occ {
        router = router.route("/ws", get(occ::handlers::ws_handler));
    }

    router
        .fallback(not_found_handler)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

fn service_routes(service: Service) -> Router<AppState> {
    match service {
        Service::Hms => services::hms::routes(),
        Service::Crm => services::crm::routes(),
        Service::Onboarding => services::onboarding::routes(),
        Service::Partners => services::partners::routes(),
        Service::Analytics => services::analytics::routes(),
        Service::Occ => occ::handlers::routes(),
    }
}

/// Health check handler
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: format!("medops-{}", state.service.name()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// 404 Not Found handler
async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorBody::new("NOT_FOUND", "Not found".to_string())),
    )
}

/// Map a repo-layer error to the platform's error envelope.
pub fn error_response(err: MedOpsError) -> Response {
    let status = match &err {
        MedOpsError::NotFound(..) => StatusCode::NOT_FOUND,
        MedOpsError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Request failed: {}", err);
    }
    (
        status,
        Json(ApiErrorBody::new(err.to_error_code(), err.to_string())),
    )
        .into_response()
}

/// Success helper used by every handler.
pub fn ok_response<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(ApiResponse::ok(data))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            service: "medops-hms".to_string(),
            version: "0.3.0".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("medops-hms"));
    }

    #[test]
    fn test_error_response_status_mapping() {
        let resp = error_response(MedOpsError::NotFound("patient", 9));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = error_response(MedOpsError::InvalidInput("bad".to_string()));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = error_response(MedOpsError::Config("x".to_string()));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
