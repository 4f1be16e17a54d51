//! Analytics — read-only aggregates over the shared schema.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::repos::AnalyticsRepo;
use crate::server::{error_response, ok_response, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route("/revenue/monthly", get(monthly_revenue))
        .route("/appointments/load", get(department_load))
}

async fn summary(State(state): State<AppState>) -> impl IntoResponse {
    match AnalyticsRepo::new(&state.db_pool).summary().await {
        Ok(summary) => ok_response(StatusCode::OK, summary),
        Err(e) => error_response(e),
    }
}

async fn monthly_revenue(State(state): State<AppState>) -> impl IntoResponse {
    match AnalyticsRepo::new(&state.db_pool).monthly_revenue().await {
        Ok(rows) => ok_response(StatusCode::OK, rows),
        Err(e) => error_response(e),
    }
}

async fn department_load(State(state): State<AppState>) -> impl IntoResponse {
    match AnalyticsRepo::new(&state.db_pool).department_load().await {
        Ok(rows) => ok_response(StatusCode::OK, rows),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_creation() {
        let _router = routes();
    }
}
