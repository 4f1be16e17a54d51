use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Patient {
    pub id: i64,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub department: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Valid appointment status transitions are enforced at the repo layer;
/// the database only constrains the value set.
pub const APPOINTMENT_STATUSES: &[&str] = &["scheduled", "completed", "cancelled"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: i64,
    pub patient_id: i64,
    pub amount_cents: i64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
}

pub const INVOICE_STATUSES: &[&str] = &["draft", "issued", "paid", "void"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StaffMember {
    pub id: i64,
    pub full_name: String,
    pub role: String,
    pub department: String,
    pub on_duty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bed {
    pub id: i64,
    pub ward: String,
    pub bed_number: i32,
    pub occupied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lead {
    pub id: i64,
    pub hospital_name: String,
    pub contact_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub stage: String,
    pub created_at: DateTime<Utc>,
}

pub const LEAD_STAGES: &[&str] = &["new", "contacted", "demo", "negotiation", "won", "lost"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Signup {
    pub id: i64,
    pub hospital_name: String,
    pub plan: String,
    pub step: String,
    pub created_at: DateTime<Utc>,
}

pub const SIGNUP_PLANS: &[&str] = &["starter", "clinic", "enterprise"];
pub const SIGNUP_STEPS: &[&str] = &["registered", "profile", "billing", "live"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PartnerProject {
    pub id: i64,
    pub partner_name: String,
    pub title: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const PROJECT_STATUSES: &[&str] = &["proposed", "active", "paused", "delivered"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alert {
    pub id: i64,
    pub severity: String,
    pub source: String,
    pub message: String,
    pub acknowledged: bool,
    pub created_at: DateTime<Utc>,
}

pub const ALERT_SEVERITIES: &[&str] = &["info", "warning", "critical"];

/// Per-stage lead counts returned by the CRM summary route.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StageCount {
    pub stage: String,
    pub count: i64,
}

/// One month of paid revenue, for the analytics service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue_cents: i64,
}

/// Appointment counts per department, for the analytics service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DepartmentLoad {
    pub department: String,
    pub count: i64,
}

/// Platform-wide counters for the analytics summary route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSummary {
    pub patients: i64,
    pub appointments: i64,
    pub invoices: i64,
    pub revenue_paid_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_optional_fields_skipped() {
        let patient = Patient {
            id: 1,
            full_name: "Ada Okafor".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 3, 14).unwrap(),
            phone: None,
            email: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&patient).unwrap();
        assert!(!json.contains("phone"));
        assert!(!json.contains("email"));
    }

    #[test]
    fn test_value_sets_are_nonempty_and_distinct() {
        for set in [
            APPOINTMENT_STATUSES,
            INVOICE_STATUSES,
            LEAD_STAGES,
            SIGNUP_PLANS,
            SIGNUP_STEPS,
            PROJECT_STATUSES,
            ALERT_SEVERITIES,
        ] {
            let mut values = set.to_vec();
            values.sort_unstable();
            values.dedup();
            assert_eq!(values.len(), set.len());
        }
    }
}
