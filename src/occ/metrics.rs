//! Metrics snapshot for the OCC dashboard.
//!
//! Occupancy, appointment load, staffing and alert counts are real
//! aggregates; the vitals averages are mocked with jittered random values,
//! as in the source platform (there is no telemetry feed to read).

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::Result;
use crate::sql;

/// Mock vitals stay inside these ranges.
pub const HEART_RATE_RANGE: (f64, f64) = (64.0, 96.0);
pub const SPO2_RANGE: (f64, f64) = (93.0, 99.5);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub generated_at: DateTime<Utc>,
    pub beds_total: i64,
    pub beds_occupied: i64,
    pub appointments_today: i64,
    pub staff_on_duty: i64,
    pub active_alerts: i64,
    pub avg_heart_rate: f64,
    pub avg_spo2: f64,
}

pub struct MetricsManager<'a> {
    pool: &'a PgPool,
}

impl<'a> MetricsManager<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn snapshot(&self) -> Result<MetricsSnapshot> {
        let beds_total: i64 = sqlx::query_scalar(sql::COUNT_BEDS)
            .fetch_one(self.pool)
            .await?;
        let beds_occupied: i64 = sqlx::query_scalar(sql::COUNT_OCCUPIED_BEDS)
            .fetch_one(self.pool)
            .await?;
        let appointments_today: i64 = sqlx::query_scalar(sql::COUNT_APPOINTMENTS_TODAY)
            .fetch_one(self.pool)
            .await?;
        let staff_on_duty: i64 = sqlx::query_scalar(sql::COUNT_STAFF_ON_DUTY)
            .fetch_one(self.pool)
            .await?;
        let active_alerts: i64 = sqlx::query_scalar(sql::COUNT_ACTIVE_ALERTS)
            .fetch_one(self.pool)
            .await?;

        let (avg_heart_rate, avg_spo2) = mock_vitals();

        Ok(MetricsSnapshot {
            generated_at: Utc::now(),
            beds_total,
            beds_occupied,
            appointments_today,
            staff_on_duty,
            active_alerts,
            avg_heart_rate,
            avg_spo2,
        })
    }
}

/// Random vitals in plausible ward-average ranges, rounded to one decimal.
pub fn mock_vitals() -> (f64, f64) {
    let mut rng = rand::rng();
    let hr = rng.random_range(HEART_RATE_RANGE.0..=HEART_RATE_RANGE.1);
    let spo2 = rng.random_range(SPO2_RANGE.0..=SPO2_RANGE.1);
    ((hr * 10.0).round() / 10.0, (spo2 * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_vitals_stay_in_range() {
        for _ in 0..100 {
            let (hr, spo2) = mock_vitals();
            assert!((HEART_RATE_RANGE.0..=HEART_RATE_RANGE.1).contains(&hr), "hr={}", hr);
            assert!((SPO2_RANGE.0..=SPO2_RANGE.1).contains(&spo2), "spo2={}", spo2);
        }
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = MetricsSnapshot {
            generated_at: Utc::now(),
            beds_total: 5,
            beds_occupied: 2,
            appointments_today: 3,
            staff_on_duty: 4,
            active_alerts: 1,
            avg_heart_rate: 72.4,
            avg_spo2: 97.1,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("beds_occupied"));
        assert!(json.contains("avg_spo2"));
    }
}
