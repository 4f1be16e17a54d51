pub mod models;

use crate::error::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// One pool per process, shared by every route handler in that service.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Create the shared schema. Every statement is idempotent so `migrate`
/// can be re-run against a live database.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS patients (
            id BIGSERIAL PRIMARY KEY,
            full_name TEXT NOT NULL,
            date_of_birth DATE NOT NULL,
            phone TEXT,
            email TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id BIGSERIAL PRIMARY KEY,
            patient_id BIGINT NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
            department TEXT NOT NULL,
            scheduled_at TIMESTAMPTZ NOT NULL,
            status TEXT NOT NULL DEFAULT 'scheduled',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            CHECK (status IN ('scheduled', 'completed', 'cancelled'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_appointments_patient_id
            ON appointments(patient_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS invoices (
            id BIGSERIAL PRIMARY KEY,
            patient_id BIGINT NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
            amount_cents BIGINT NOT NULL,
            status TEXT NOT NULL DEFAULT 'draft',
            issued_at TIMESTAMPTZ,
            CHECK (status IN ('draft', 'issued', 'paid', 'void')),
            CHECK (amount_cents >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS staff (
            id BIGSERIAL PRIMARY KEY,
            full_name TEXT NOT NULL,
            role TEXT NOT NULL,
            department TEXT NOT NULL,
            on_duty BOOLEAN NOT NULL DEFAULT false
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS beds (
            id BIGSERIAL PRIMARY KEY,
            ward TEXT NOT NULL,
            bed_number INTEGER NOT NULL,
            occupied BOOLEAN NOT NULL DEFAULT false,
            patient_id BIGINT REFERENCES patients(id) ON DELETE SET NULL,
            UNIQUE (ward, bed_number)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS leads (
            id BIGSERIAL PRIMARY KEY,
            hospital_name TEXT NOT NULL,
            contact_name TEXT NOT NULL,
            email TEXT,
            stage TEXT NOT NULL DEFAULT 'new',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            CHECK (stage IN ('new', 'contacted', 'demo', 'negotiation', 'won', 'lost'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS signups (
            id BIGSERIAL PRIMARY KEY,
            hospital_name TEXT NOT NULL,
            plan TEXT NOT NULL DEFAULT 'starter',
            step TEXT NOT NULL DEFAULT 'registered',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            CHECK (plan IN ('starter', 'clinic', 'enterprise')),
            CHECK (step IN ('registered', 'profile', 'billing', 'live'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS partner_projects (
            id BIGSERIAL PRIMARY KEY,
            partner_name TEXT NOT NULL,
            title TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'proposed',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            CHECK (status IN ('proposed', 'active', 'paused', 'delivered'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS alerts (
            id BIGSERIAL PRIMARY KEY,
            severity TEXT NOT NULL,
            source TEXT NOT NULL,
            message TEXT NOT NULL,
            acknowledged BOOLEAN NOT NULL DEFAULT false,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            CHECK (severity IN ('info', 'warning', 'critical'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Schema migration complete");
    Ok(())
}

/// Insert the demo dataset the smoke suites run against. Skipped entirely
/// if any patients already exist, so re-running `seed` is safe.
pub async fn seed_demo_data(pool: &PgPool) -> Result<bool> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM patients")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        tracing::info!("Database already seeded ({} patients), skipping", existing);
        return Ok(false);
    }

    sqlx::query(
        r#"
        INSERT INTO patients (full_name, date_of_birth, phone, email) VALUES
            ('Ada Okafor', '1990-03-14', '+15550101', 'ada@example.com'),
            ('Liam Chen', '1985-07-02', '+15550102', 'liam@example.com'),
            ('Priya Nair', '1978-11-23', NULL, 'priya@example.com'),
            ('Samuel Mensah', '2001-01-09', '+15550104', NULL)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO appointments (patient_id, department, scheduled_at, status) VALUES
            (1, 'cardiology', now() + interval '2 hours', 'scheduled'),
            (2, 'radiology', now() + interval '1 day', 'scheduled'),
            (3, 'cardiology', now() - interval '3 days', 'completed'),
            (4, 'pediatrics', now() - interval '1 day', 'cancelled')
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO invoices (patient_id, amount_cents, status, issued_at) VALUES
            (1, 125000, 'paid', now() - interval '10 days'),
            (2, 48000, 'issued', now() - interval '2 days'),
            (3, 230000, 'paid', now() - interval '40 days'),
            (4, 15000, 'draft', NULL)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO staff (full_name, role, department, on_duty) VALUES
            ('Dr. Elena Voss', 'physician', 'cardiology', true),
            ('Dr. Yusuf Adeyemi', 'physician', 'pediatrics', true),
            ('Marta Kowalska', 'nurse', 'cardiology', true),
            ('Tom Becker', 'nurse', 'radiology', false)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO beds (ward, bed_number, occupied, patient_id) VALUES
            ('icu', 1, true, 1),
            ('icu', 2, false, NULL),
            ('general', 1, true, 3),
            ('general', 2, false, NULL),
            ('general', 3, false, NULL)
        ON CONFLICT (ward, bed_number) DO NOTHING
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO leads (hospital_name, contact_name, email, stage) VALUES
            ('St. Brigid Clinic', 'Maeve Doyle', 'maeve@stbrigid.example', 'demo'),
            ('Lakeside Medical', 'Arjun Rao', 'arjun@lakeside.example', 'new'),
            ('Northgate Hospital', 'Ines Duarte', NULL, 'won')
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO signups (hospital_name, plan, step) VALUES
            ('Northgate Hospital', 'enterprise', 'billing'),
            ('Cedar Grove Clinic', 'starter', 'registered')
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO partner_projects (partner_name, title, status) VALUES
            ('LabLink', 'Lab results integration', 'active'),
            ('PharmaSys', 'e-Prescription pilot', 'proposed')
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO alerts (severity, source, message, acknowledged) VALUES
            ('warning', 'icu', 'ICU occupancy above 50%', false),
            ('info', 'pharmacy', 'Restock order placed', true)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Demo data seeded");
    Ok(true)
}
