use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Success envelope: `{"status":"ok","data":...}`, the shape every service
/// in the platform returns.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { status: "ok", data }
    }
}

/// Error envelope: `{"status":"error","error":{code,message}}`
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub status: &'static str,
    pub error: ApiError,
}

#[derive(Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiErrorBody {
    pub fn new(code: &str, message: String) -> Self {
        Self {
            status: "error",
            error: ApiError {
                code: code.to_string(),
                message,
                details: None,
            },
        }
    }
}

// ============================================================================
// Request DTOs
// ============================================================================

#[derive(Deserialize)]
pub struct CreatePatientRequest {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_id: i64,
    pub department: String,
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct UpdateAppointmentRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreateInvoiceRequest {
    pub patient_id: i64,
    pub amount_cents: i64,
}

#[derive(Deserialize)]
pub struct UpdateBedRequest {
    /// Some(id) assigns the bed to that patient; None releases it.
    pub patient_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateLeadRequest {
    pub hospital_name: String,
    pub contact_name: String,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateLeadStageRequest {
    pub stage: String,
}

#[derive(Deserialize)]
pub struct CreateSignupRequest {
    pub hospital_name: String,
    #[serde(default = "default_plan")]
    pub plan: String,
}

fn default_plan() -> String {
    "starter".to_string()
}

#[derive(Deserialize)]
pub struct UpdateSignupStepRequest {
    pub step: String,
}

#[derive(Deserialize)]
pub struct CreateProjectRequest {
    pub partner_name: String,
    pub title: String,
}

#[derive(Deserialize)]
pub struct UpdateProjectStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct RaiseAlertRequest {
    pub severity: String,
    pub source: String,
    pub message: String,
}

// ============================================================================
// Query DTOs
// ============================================================================

#[derive(Deserialize)]
pub struct AppointmentListQuery {
    pub status: Option<String>,
    pub patient_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct BedListQuery {
    pub ward: Option<String>,
}

#[derive(Deserialize)]
pub struct LeadListQuery {
    pub stage: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_shape() {
        let json = serde_json::to_string(&ApiResponse::ok(vec![1, 2, 3])).unwrap();
        assert_eq!(json, r#"{"status":"ok","data":[1,2,3]}"#);
    }

    #[test]
    fn test_error_envelope_shape() {
        let body = ApiErrorBody::new("NOT_FOUND", "patient 7 not found".to_string());
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""status":"error""#));
        assert!(json.contains("NOT_FOUND"));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_create_patient_request_deserialization() {
        let json = r#"{"full_name":"Ada Okafor","date_of_birth":"1990-03-14"}"#;
        let req: CreatePatientRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.full_name, "Ada Okafor");
        assert!(req.phone.is_none());
    }

    #[test]
    fn test_create_signup_request_default_plan() {
        let json = r#"{"hospital_name":"Cedar Grove Clinic"}"#;
        let req: CreateSignupRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.plan, "starter");
    }

    #[test]
    fn test_update_bed_request_release() {
        let req: UpdateBedRequest = serde_json::from_str(r#"{"patient_id":null}"#).unwrap();
        assert!(req.patient_id.is_none());
    }

    #[test]
    fn test_raise_alert_request_deserialization() {
        let json = r#"{"severity":"critical","source":"icu","message":"Bed 3 offline"}"#;
        let req: RaiseAlertRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.severity, "critical");
    }
}
