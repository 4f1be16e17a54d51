//! Centralized SQL query constants.
//!
//! Every repository pulls its statements from here so the query surface of
//! the whole platform is visible in one place. Dynamic WHERE clauses are
//! still assembled inline where a filter is optional.

// ============================================================================
// Patients
// ============================================================================

pub const SELECT_PATIENTS: &str =
    "SELECT id, full_name, date_of_birth, phone, email, created_at FROM patients ORDER BY id";

pub const SELECT_PATIENT_BY_ID: &str =
    "SELECT id, full_name, date_of_birth, phone, email, created_at FROM patients WHERE id = $1";

pub const INSERT_PATIENT: &str = r#"
    INSERT INTO patients (full_name, date_of_birth, phone, email)
    VALUES ($1, $2, $3, $4)
    RETURNING id, full_name, date_of_birth, phone, email, created_at
"#;

// ============================================================================
// Appointments
// ============================================================================

pub const APPOINTMENT_COLUMNS: &str =
    "id, patient_id, department, scheduled_at, status, created_at";

pub const INSERT_APPOINTMENT: &str = r#"
    INSERT INTO appointments (patient_id, department, scheduled_at)
    VALUES ($1, $2, $3)
    RETURNING id, patient_id, department, scheduled_at, status, created_at
"#;

pub const UPDATE_APPOINTMENT_STATUS: &str = r#"
    UPDATE appointments SET status = $2 WHERE id = $1
    RETURNING id, patient_id, department, scheduled_at, status, created_at
"#;

// ============================================================================
// Invoices
// ============================================================================

pub const SELECT_INVOICES: &str =
    "SELECT id, patient_id, amount_cents, status, issued_at FROM invoices ORDER BY id";

pub const INSERT_INVOICE: &str = r#"
    INSERT INTO invoices (patient_id, amount_cents, status, issued_at)
    VALUES ($1, $2, 'issued', now())
    RETURNING id, patient_id, amount_cents, status, issued_at
"#;

pub const MARK_INVOICE_PAID: &str = r#"
    UPDATE invoices SET status = 'paid' WHERE id = $1 AND status = 'issued'
    RETURNING id, patient_id, amount_cents, status, issued_at
"#;

// ============================================================================
// Beds
// ============================================================================

pub const BED_COLUMNS: &str = "id, ward, bed_number, occupied, patient_id";

pub const ASSIGN_BED: &str = r#"
    UPDATE beds SET occupied = true, patient_id = $2 WHERE id = $1
    RETURNING id, ward, bed_number, occupied, patient_id
"#;

pub const RELEASE_BED: &str = r#"
    UPDATE beds SET occupied = false, patient_id = NULL WHERE id = $1
    RETURNING id, ward, bed_number, occupied, patient_id
"#;

// ============================================================================
// Leads (CRM)
// ============================================================================

pub const LEAD_COLUMNS: &str = "id, hospital_name, contact_name, email, stage, created_at";

pub const INSERT_LEAD: &str = r#"
    INSERT INTO leads (hospital_name, contact_name, email)
    VALUES ($1, $2, $3)
    RETURNING id, hospital_name, contact_name, email, stage, created_at
"#;

pub const UPDATE_LEAD_STAGE: &str = r#"
    UPDATE leads SET stage = $2 WHERE id = $1
    RETURNING id, hospital_name, contact_name, email, stage, created_at
"#;

pub const COUNT_LEADS_BY_STAGE: &str =
    "SELECT stage, COUNT(*) AS count FROM leads GROUP BY stage ORDER BY stage";

// ============================================================================
// Signups (onboarding)
// ============================================================================

pub const SELECT_SIGNUPS: &str =
    "SELECT id, hospital_name, plan, step, created_at FROM signups ORDER BY id";

pub const SELECT_SIGNUP_BY_ID: &str =
    "SELECT id, hospital_name, plan, step, created_at FROM signups WHERE id = $1";

pub const INSERT_SIGNUP: &str = r#"
    INSERT INTO signups (hospital_name, plan)
    VALUES ($1, $2)
    RETURNING id, hospital_name, plan, step, created_at
"#;

pub const UPDATE_SIGNUP_STEP: &str = r#"
    UPDATE signups SET step = $2 WHERE id = $1
    RETURNING id, hospital_name, plan, step, created_at
"#;

// ============================================================================
// Partner projects
// ============================================================================

pub const SELECT_PROJECTS: &str = r#"
    SELECT id, partner_name, title, status, created_at, updated_at
    FROM partner_projects ORDER BY id
"#;

pub const SELECT_PROJECT_BY_ID: &str = r#"
    SELECT id, partner_name, title, status, created_at, updated_at
    FROM partner_projects WHERE id = $1
"#;

pub const INSERT_PROJECT: &str = r#"
    INSERT INTO partner_projects (partner_name, title)
    VALUES ($1, $2)
    RETURNING id, partner_name, title, status, created_at, updated_at
"#;

pub const UPDATE_PROJECT_STATUS: &str = r#"
    UPDATE partner_projects SET status = $2, updated_at = now() WHERE id = $1
    RETURNING id, partner_name, title, status, created_at, updated_at
"#;

// ============================================================================
// Alerts (OCC)
// ============================================================================

pub const SELECT_ACTIVE_ALERTS: &str = r#"
    SELECT id, severity, source, message, acknowledged, created_at
    FROM alerts WHERE acknowledged = false ORDER BY created_at DESC
"#;

pub const INSERT_ALERT: &str = r#"
    INSERT INTO alerts (severity, source, message)
    VALUES ($1, $2, $3)
    RETURNING id, severity, source, message, acknowledged, created_at
"#;

pub const ACKNOWLEDGE_ALERT: &str = r#"
    UPDATE alerts SET acknowledged = true WHERE id = $1
    RETURNING id, severity, source, message, acknowledged, created_at
"#;

// ============================================================================
// Aggregates (analytics + OCC metrics)
// ============================================================================

pub const COUNT_PATIENTS: &str = "SELECT COUNT(*) FROM patients";
pub const COUNT_APPOINTMENTS: &str = "SELECT COUNT(*) FROM appointments";
pub const COUNT_INVOICES: &str = "SELECT COUNT(*) FROM invoices";

// SUM(bigint) yields NUMERIC in Postgres; cast back so it decodes as i64
pub const SUM_PAID_REVENUE: &str =
    "SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM invoices WHERE status = 'paid'";

pub const REVENUE_BY_MONTH: &str = r#"
    SELECT to_char(date_trunc('month', issued_at), 'YYYY-MM') AS month,
           COALESCE(SUM(amount_cents), 0)::BIGINT AS revenue_cents
    FROM invoices
    WHERE status = 'paid' AND issued_at IS NOT NULL
    GROUP BY 1 ORDER BY 1
"#;

pub const APPOINTMENTS_BY_DEPARTMENT: &str = r#"
    SELECT department, COUNT(*) AS count
    FROM appointments GROUP BY department ORDER BY department
"#;

pub const COUNT_BEDS: &str = "SELECT COUNT(*) FROM beds";
pub const COUNT_OCCUPIED_BEDS: &str = "SELECT COUNT(*) FROM beds WHERE occupied = true";
pub const COUNT_STAFF_ON_DUTY: &str = "SELECT COUNT(*) FROM staff WHERE on_duty = true";
pub const COUNT_ACTIVE_ALERTS: &str = "SELECT COUNT(*) FROM alerts WHERE acknowledged = false";

pub const COUNT_APPOINTMENTS_TODAY: &str = r#"
    SELECT COUNT(*) FROM appointments
    WHERE scheduled_at >= date_trunc('day', now())
      AND scheduled_at < date_trunc('day', now()) + interval '1 day'
"#;
