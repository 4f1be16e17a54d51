//! Repository layer: one struct per entity, owning all SQL for it.
//!
//! Handlers never touch SQL directly; they construct a repo borrowing the
//! process-wide pool and call a method. Value-set validation (stages,
//! steps, statuses, severities) happens here so every surface that writes
//! goes through the same checks.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::db::models::{
    Alert, Appointment, Bed, DepartmentLoad, Invoice, Lead, MonthlyRevenue, PartnerProject,
    Patient, PlatformSummary, Signup, StageCount, ALERT_SEVERITIES, APPOINTMENT_STATUSES,
    LEAD_STAGES, PROJECT_STATUSES, SIGNUP_PLANS, SIGNUP_STEPS,
};
use crate::error::{MedOpsError, Result};
use crate::sql;

fn validate_value(set: &[&str], value: &str, what: &str) -> Result<()> {
    if set.contains(&value) {
        Ok(())
    } else {
        Err(MedOpsError::InvalidInput(format!(
            "Invalid {} '{}'. Expected one of: {}",
            what,
            value,
            set.join(", ")
        )))
    }
}

// ============================================================================
// HMS
// ============================================================================

pub struct PatientRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PatientRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Patient>> {
        let patients = sqlx::query_as::<_, Patient>(sql::SELECT_PATIENTS)
            .fetch_all(self.pool)
            .await?;
        Ok(patients)
    }

    pub async fn get(&self, id: i64) -> Result<Patient> {
        sqlx::query_as::<_, Patient>(sql::SELECT_PATIENT_BY_ID)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(MedOpsError::NotFound("patient", id))
    }

    pub async fn create(
        &self,
        full_name: &str,
        date_of_birth: NaiveDate,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<Patient> {
        if full_name.trim().is_empty() {
            return Err(MedOpsError::InvalidInput(
                "Patient name must not be empty".to_string(),
            ));
        }
        let patient = sqlx::query_as::<_, Patient>(sql::INSERT_PATIENT)
            .bind(full_name)
            .bind(date_of_birth)
            .bind(phone)
            .bind(email)
            .fetch_one(self.pool)
            .await?;
        Ok(patient)
    }
}

pub struct AppointmentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> AppointmentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Both filters are optional; the WHERE clause is assembled per call.
    pub async fn list(
        &self,
        status: Option<&str>,
        patient_id: Option<i64>,
    ) -> Result<Vec<Appointment>> {
        let mut query = format!(
            "SELECT {} FROM appointments WHERE 1=1",
            sql::APPOINTMENT_COLUMNS
        );
        if status.is_some() {
            query.push_str(" AND status = $1");
        }
        if patient_id.is_some() {
            query.push_str(if status.is_some() {
                " AND patient_id = $2"
            } else {
                " AND patient_id = $1"
            });
        }
        query.push_str(" ORDER BY scheduled_at");

        let mut q = sqlx::query_as::<_, Appointment>(&query);
        if let Some(s) = status {
            q = q.bind(s.to_string());
        }
        if let Some(pid) = patient_id {
            q = q.bind(pid);
        }
        Ok(q.fetch_all(self.pool).await?)
    }

    pub async fn create(
        &self,
        patient_id: i64,
        department: &str,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Appointment> {
        // Surface a 404-shaped error instead of a raw FK violation
        PatientRepo::new(self.pool).get(patient_id).await?;

        let appointment = sqlx::query_as::<_, Appointment>(sql::INSERT_APPOINTMENT)
            .bind(patient_id)
            .bind(department)
            .bind(scheduled_at)
            .fetch_one(self.pool)
            .await?;
        Ok(appointment)
    }

    pub async fn set_status(&self, id: i64, status: &str) -> Result<Appointment> {
        validate_value(APPOINTMENT_STATUSES, status, "appointment status")?;
        sqlx::query_as::<_, Appointment>(sql::UPDATE_APPOINTMENT_STATUS)
            .bind(id)
            .bind(status)
            .fetch_optional(self.pool)
            .await?
            .ok_or(MedOpsError::NotFound("appointment", id))
    }
}

pub struct InvoiceRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> InvoiceRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Invoice>> {
        Ok(sqlx::query_as::<_, Invoice>(sql::SELECT_INVOICES)
            .fetch_all(self.pool)
            .await?)
    }

    pub async fn issue(&self, patient_id: i64, amount_cents: i64) -> Result<Invoice> {
        if amount_cents < 0 {
            return Err(MedOpsError::InvalidInput(
                "Invoice amount must not be negative".to_string(),
            ));
        }
        PatientRepo::new(self.pool).get(patient_id).await?;

        let invoice = sqlx::query_as::<_, Invoice>(sql::INSERT_INVOICE)
            .bind(patient_id)
            .bind(amount_cents)
            .fetch_one(self.pool)
            .await?;
        Ok(invoice)
    }

    /// Only issued invoices can be paid; anything else reports NotFound,
    /// matching the source system's behavior of a no-op UPDATE.
    pub async fn pay(&self, id: i64) -> Result<Invoice> {
        sqlx::query_as::<_, Invoice>(sql::MARK_INVOICE_PAID)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(MedOpsError::NotFound("payable invoice", id))
    }
}

pub struct BedRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BedRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, ward: Option<&str>) -> Result<Vec<Bed>> {
        let beds = if let Some(ward) = ward {
            sqlx::query_as::<_, Bed>(&format!(
                "SELECT {} FROM beds WHERE ward = $1 ORDER BY ward, bed_number",
                sql::BED_COLUMNS
            ))
            .bind(ward)
            .fetch_all(self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Bed>(&format!(
                "SELECT {} FROM beds ORDER BY ward, bed_number",
                sql::BED_COLUMNS
            ))
            .fetch_all(self.pool)
            .await?
        };
        Ok(beds)
    }

    pub async fn assign(&self, id: i64, patient_id: i64) -> Result<Bed> {
        PatientRepo::new(self.pool).get(patient_id).await?;
        sqlx::query_as::<_, Bed>(sql::ASSIGN_BED)
            .bind(id)
            .bind(patient_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(MedOpsError::NotFound("bed", id))
    }

    pub async fn release(&self, id: i64) -> Result<Bed> {
        sqlx::query_as::<_, Bed>(sql::RELEASE_BED)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(MedOpsError::NotFound("bed", id))
    }
}

// ============================================================================
// CRM
// ============================================================================

pub struct LeadRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> LeadRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, stage: Option<&str>) -> Result<Vec<Lead>> {
        let leads = if let Some(stage) = stage {
            validate_value(LEAD_STAGES, stage, "lead stage")?;
            sqlx::query_as::<_, Lead>(&format!(
                "SELECT {} FROM leads WHERE stage = $1 ORDER BY created_at DESC",
                sql::LEAD_COLUMNS
            ))
            .bind(stage)
            .fetch_all(self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Lead>(&format!(
                "SELECT {} FROM leads ORDER BY created_at DESC",
                sql::LEAD_COLUMNS
            ))
            .fetch_all(self.pool)
            .await?
        };
        Ok(leads)
    }

    pub async fn create(
        &self,
        hospital_name: &str,
        contact_name: &str,
        email: Option<&str>,
    ) -> Result<Lead> {
        if hospital_name.trim().is_empty() {
            return Err(MedOpsError::InvalidInput(
                "Hospital name must not be empty".to_string(),
            ));
        }
        let lead = sqlx::query_as::<_, Lead>(sql::INSERT_LEAD)
            .bind(hospital_name)
            .bind(contact_name)
            .bind(email)
            .fetch_one(self.pool)
            .await?;
        Ok(lead)
    }

    pub async fn set_stage(&self, id: i64, stage: &str) -> Result<Lead> {
        validate_value(LEAD_STAGES, stage, "lead stage")?;
        sqlx::query_as::<_, Lead>(sql::UPDATE_LEAD_STAGE)
            .bind(id)
            .bind(stage)
            .fetch_optional(self.pool)
            .await?
            .ok_or(MedOpsError::NotFound("lead", id))
    }

    pub async fn summary(&self) -> Result<Vec<StageCount>> {
        Ok(sqlx::query_as::<_, StageCount>(sql::COUNT_LEADS_BY_STAGE)
            .fetch_all(self.pool)
            .await?)
    }
}

// ============================================================================
// Onboarding
// ============================================================================

pub struct SignupRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SignupRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Signup>> {
        Ok(sqlx::query_as::<_, Signup>(sql::SELECT_SIGNUPS)
            .fetch_all(self.pool)
            .await?)
    }

    pub async fn get(&self, id: i64) -> Result<Signup> {
        sqlx::query_as::<_, Signup>(sql::SELECT_SIGNUP_BY_ID)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(MedOpsError::NotFound("signup", id))
    }

    pub async fn create(&self, hospital_name: &str, plan: &str) -> Result<Signup> {
        validate_value(SIGNUP_PLANS, plan, "plan")?;
        let signup = sqlx::query_as::<_, Signup>(sql::INSERT_SIGNUP)
            .bind(hospital_name)
            .bind(plan)
            .fetch_one(self.pool)
            .await?;
        Ok(signup)
    }

    pub async fn set_step(&self, id: i64, step: &str) -> Result<Signup> {
        validate_value(SIGNUP_STEPS, step, "onboarding step")?;
        sqlx::query_as::<_, Signup>(sql::UPDATE_SIGNUP_STEP)
            .bind(id)
            .bind(step)
            .fetch_optional(self.pool)
            .await?
            .ok_or(MedOpsError::NotFound("signup", id))
    }
}

// ============================================================================
// Partner integration
// ============================================================================

pub struct ProjectRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProjectRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<PartnerProject>> {
        Ok(sqlx::query_as::<_, PartnerProject>(sql::SELECT_PROJECTS)
            .fetch_all(self.pool)
            .await?)
    }

    pub async fn get(&self, id: i64) -> Result<PartnerProject> {
        sqlx::query_as::<_, PartnerProject>(sql::SELECT_PROJECT_BY_ID)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(MedOpsError::NotFound("project", id))
    }

    pub async fn create(&self, partner_name: &str, title: &str) -> Result<PartnerProject> {
        if partner_name.trim().is_empty() || title.trim().is_empty() {
            return Err(MedOpsError::InvalidInput(
                "Partner name and title must not be empty".to_string(),
            ));
        }
        let project = sqlx::query_as::<_, PartnerProject>(sql::INSERT_PROJECT)
            .bind(partner_name)
            .bind(title)
            .fetch_one(self.pool)
            .await?;
        Ok(project)
    }

    pub async fn set_status(&self, id: i64, status: &str) -> Result<PartnerProject> {
        validate_value(PROJECT_STATUSES, status, "project status")?;
        sqlx::query_as::<_, PartnerProject>(sql::UPDATE_PROJECT_STATUS)
            .bind(id)
            .bind(status)
            .fetch_optional(self.pool)
            .await?
            .ok_or(MedOpsError::NotFound("project", id))
    }
}

// ============================================================================
// Alerts (OCC)
// ============================================================================

pub struct AlertRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> AlertRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn active(&self) -> Result<Vec<Alert>> {
        Ok(sqlx::query_as::<_, Alert>(sql::SELECT_ACTIVE_ALERTS)
            .fetch_all(self.pool)
            .await?)
    }

    pub async fn raise(&self, severity: &str, source: &str, message: &str) -> Result<Alert> {
        validate_value(ALERT_SEVERITIES, severity, "alert severity")?;
        if message.trim().is_empty() {
            return Err(MedOpsError::InvalidInput(
                "Alert message must not be empty".to_string(),
            ));
        }
        let alert = sqlx::query_as::<_, Alert>(sql::INSERT_ALERT)
            .bind(severity)
            .bind(source)
            .bind(message)
            .fetch_one(self.pool)
            .await?;
        Ok(alert)
    }

    pub async fn acknowledge(&self, id: i64) -> Result<Alert> {
        sqlx::query_as::<_, Alert>(sql::ACKNOWLEDGE_ALERT)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(MedOpsError::NotFound("alert", id))
    }
}

// ============================================================================
// Analytics
// ============================================================================

pub struct AnalyticsRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> AnalyticsRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn summary(&self) -> Result<PlatformSummary> {
        let patients: i64 = sqlx::query_scalar(sql::COUNT_PATIENTS)
            .fetch_one(self.pool)
            .await?;
        let appointments: i64 = sqlx::query_scalar(sql::COUNT_APPOINTMENTS)
            .fetch_one(self.pool)
            .await?;
        let invoices: i64 = sqlx::query_scalar(sql::COUNT_INVOICES)
            .fetch_one(self.pool)
            .await?;
        let revenue_paid_cents: i64 = sqlx::query_scalar(sql::SUM_PAID_REVENUE)
            .fetch_one(self.pool)
            .await?;

        Ok(PlatformSummary {
            patients,
            appointments,
            invoices,
            revenue_paid_cents,
        })
    }

    pub async fn monthly_revenue(&self) -> Result<Vec<MonthlyRevenue>> {
        Ok(sqlx::query_as::<_, MonthlyRevenue>(sql::REVENUE_BY_MONTH)
            .fetch_all(self.pool)
            .await?)
    }

    pub async fn department_load(&self) -> Result<Vec<DepartmentLoad>> {
        Ok(
            sqlx::query_as::<_, DepartmentLoad>(sql::APPOINTMENTS_BY_DEPARTMENT)
                .fetch_all(self.pool)
                .await?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_value_accepts_known() {
        assert!(validate_value(LEAD_STAGES, "demo", "lead stage").is_ok());
    }

    #[test]
    fn test_validate_value_rejects_unknown() {
        let err = validate_value(LEAD_STAGES, "ghost", "lead stage").unwrap_err();
        assert_eq!(err.to_error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("lead stage"));
    }

    #[test]
    fn test_validate_value_lists_expected_values() {
        let err = validate_value(ALERT_SEVERITIES, "fatal", "alert severity").unwrap_err();
        assert!(err.to_string().contains("info, warning, critical"));
    }
}
