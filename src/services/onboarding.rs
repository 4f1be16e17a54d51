//! Onboarding — hospital signups walking through plan/profile/billing steps.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, patch},
    Router,
};

use super::models::*;
use crate::repos::SignupRepo;
use crate::server::{error_response, ok_response, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signups", get(list_signups).post(create_signup))
        .route("/signups/:id", get(get_signup))
        .route("/signups/:id/step", patch(update_signup_step))
}

async fn list_signups(State(state): State<AppState>) -> impl IntoResponse {
    match SignupRepo::new(&state.db_pool).list().await {
        Ok(signups) => ok_response(StatusCode::OK, signups),
        Err(e) => error_response(e),
    }
}

async fn get_signup(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match SignupRepo::new(&state.db_pool).get(id).await {
        Ok(signup) => ok_response(StatusCode::OK, signup),
        Err(e) => error_response(e),
    }
}

async fn create_signup(
    State(state): State<AppState>,
    Json(req): Json<CreateSignupRequest>,
) -> impl IntoResponse {
    match SignupRepo::new(&state.db_pool)
        .create(&req.hospital_name, &req.plan)
        .await
    {
        Ok(signup) => ok_response(StatusCode::CREATED, signup),
        Err(e) => error_response(e),
    }
}

async fn update_signup_step(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateSignupStepRequest>,
) -> impl IntoResponse {
    match SignupRepo::new(&state.db_pool).set_step(id, &req.step).await {
        Ok(signup) => ok_response(StatusCode::OK, signup),
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
