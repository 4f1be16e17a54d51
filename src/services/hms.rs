//! HMS — the patient/billing/bed CRUD service.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, patch, post},
    Router,
};

use super::models::*;
use crate::repos::{AppointmentRepo, BedRepo, InvoiceRepo, PatientRepo};
use crate::server::{error_response, ok_response, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route("/patients/:id", get(get_patient))
        .route("/appointments", get(list_appointments).post(create_appointment))
        .route("/appointments/:id", patch(update_appointment))
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route("/invoices/:id/pay", post(pay_invoice))
        .route("/beds", get(list_beds))
        .route("/beds/:id", patch(update_bed))
}

async fn list_patients(State(state): State<AppState>) -> impl IntoResponse {
    match PatientRepo::new(&state.db_pool).list().await {
        Ok(patients) => ok_response(StatusCode::OK, patients),
        Err(e) => error_response(e),
    }
}

async fn get_patient(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match PatientRepo::new(&state.db_pool).get(id).await {
        Ok(patient) => ok_response(StatusCode::OK, patient),
        Err(e) => error_response(e),
    }
}

async fn create_patient(
    State(state): State<AppState>,
    Json(req): Json<CreatePatientRequest>,
) -> impl IntoResponse {
    match PatientRepo::new(&state.db_pool)
        .create(
            &req.full_name,
            req.date_of_birth,
            req.phone.as_deref(),
            req.email.as_deref(),
        )
        .await
    {
        Ok(patient) => ok_response(StatusCode::CREATED, patient),
        Err(e) => error_response(e),
    }
}

async fn list_appointments(
    State(state): State<AppState>,
    Query(query): Query<AppointmentListQuery>,
) -> impl IntoResponse {
    match AppointmentRepo::new(&state.db_pool)
        .list(query.status.as_deref(), query.patient_id)
        .await
    {
        Ok(appointments) => ok_response(StatusCode::OK, appointments),
        Err(e) => error_response(e),
    }
}

async fn create_appointment(
    State(state): State<AppState>,
    Json(req): Json<CreateAppointmentRequest>,
) -> impl IntoResponse {
    match AppointmentRepo::new(&state.db_pool)
        .create(req.patient_id, &req.department, req.scheduled_at)
        .await
    {
        Ok(appointment) => ok_response(StatusCode::CREATED, appointment),
        Err(e) => error_response(e),
    }
}

async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateAppointmentRequest>,
) -> impl IntoResponse {
    match AppointmentRepo::new(&state.db_pool)
        .set_status(id, &req.status)
        .await
    {
        Ok(appointment) => ok_response(StatusCode::OK, appointment),
        Err(e) => error_response(e),
    }
}

async fn list_invoices(State(state): State<AppState>) -> impl IntoResponse {
    match InvoiceRepo::new(&state.db_pool).list().await {
        Ok(invoices) => ok_response(StatusCode::OK, invoices),
        Err(e) => error_response(e),
    }
}

async fn create_invoice(
    State(state): State<AppState>,
    Json(req): Json<CreateInvoiceRequest>,
) -> impl IntoResponse {
    match InvoiceRepo::new(&state.db_pool)
        .issue(req.patient_id, req.amount_cents)
        .await
    {
        Ok(invoice) => ok_response(StatusCode::CREATED, invoice),
        Err(e) => error_response(e),
    }
}

async fn pay_invoice(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match InvoiceRepo::new(&state.db_pool).pay(id).await {
        Ok(invoice) => ok_response(StatusCode::OK, invoice),
        Err(e) => error_response(e),
    }
}

async fn list_beds(
    State(state): State<AppState>,
    Query(query): Query<BedListQuery>,
) -> impl IntoResponse {
    match BedRepo::new(&state.db_pool).list(query.ward.as_deref()).await {
        Ok(beds) => ok_response(StatusCode::OK, beds),
        Err(e) => error_response(e),
    }
}

/// Assign or release a bed depending on whether `patient_id` is present.
async fn update_bed(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateBedRequest>,
) -> impl IntoResponse {
    let repo = BedRepo::new(&state.db_pool);
    let result = match req.patient_id {
        Some(patient_id) => repo.assign(id, patient_id).await,
        None => repo.release(id).await,
    };
    match result {
        Ok(bed) => ok_response(StatusCode::OK, bed),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_creation() {
        // Verifies the route table builds without panicking on path syntax
        let _router = routes();
    }
}
