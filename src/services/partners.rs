//! Partner integration — projects run with external integration partners.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, patch},
    Router,
};

use super::models::*;
use crate::repos::ProjectRepo;
use crate::server::{error_response, ok_response, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/:id", get(get_project))
        .route("/projects/:id/status", patch(update_project_status))
}

async fn list_projects(State(state): State<AppState>) -> impl IntoResponse {
    match ProjectRepo::new(&state.db_pool).list().await {
        Ok(projects) => ok_response(StatusCode::OK, projects),
        Err(e) => error_response(e),
    }
}

async fn get_project(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match ProjectRepo::new(&state.db_pool).get(id).await {
        Ok(project) => ok_response(StatusCode::OK, project),
        Err(e) => error_response(e),
    }
}

async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> impl IntoResponse {
    match ProjectRepo::new(&state.db_pool)
        .create(&req.partner_name, &req.title)
        .await
    {
        Ok(project) => ok_response(StatusCode::CREATED, project),
        Err(e) => error_response(e),
    }
}

async fn update_project_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProjectStatusRequest>,
) -> impl IntoResponse {
    match ProjectRepo::new(&state.db_pool)
        .set_status(id, &req.status)
        .await
    {
        Ok(project) => ok_response(StatusCode::OK, project),
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
