//! CRM — leads pipeline for hospital owners.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, patch},
    Router,
};

use super::models::*;
use crate::repos::LeadRepo;
use crate::server::{error_response, ok_response, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leads", get(list_leads).post(create_lead))
        .route("/leads/summary", get(lead_summary))
        .route("/leads/:id/stage", patch(update_lead_stage))
}

async fn list_leads(
    State(state): State<AppState>,
    Query(query): Query<LeadListQuery>,
) -> impl IntoResponse {
    match LeadRepo::new(&state.db_pool)
        .list(query.stage.as_deref())
        .await
    {
        Ok(leads) => ok_response(StatusCode::OK, leads),
        Err(e) => error_response(e),
    }
}

async fn create_lead(
    State(state): State<AppState>,
    Json(req): Json<CreateLeadRequest>,
) -> impl IntoResponse {
    match LeadRepo::new(&state.db_pool)
        .create(&req.hospital_name, &req.contact_name, req.email.as_deref())
        .await
    {
        Ok(lead) => ok_response(StatusCode::CREATED, lead),
        Err(e) => error_response(e),
    }
}

async fn update_lead_stage(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateLeadStageRequest>,
) -> impl IntoResponse {
    match LeadRepo::new(&state.db_pool).set_stage(id, &req.stage).await {
        Ok(lead) => ok_response(StatusCode::OK, lead),
        Err(e) => error_response(e),
    }
}

async fn lead_summary(State(state): State<AppState>) -> impl IntoResponse {
    match LeadRepo::new(&state.db_pool).summary().await {
        Ok(counts) => ok_response(StatusCode::OK, counts),
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
