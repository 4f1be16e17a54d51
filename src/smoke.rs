//! Smoke suites: scripted checks against a live service.
//!
//! The source platform carried dozens of one-off verification scripts that
//! curl a service and print pass/fail lines. Here each suite is a sequence
//! of named checks run by one parameterized runner; a check failure (or any
//! transport error) prints a red ✗ and the suite keeps going. The runner
//! exits nonzero if anything failed.

use futures_util::StreamExt;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::Service;
use crate::error::{MedOpsError, Result};

const GREEN_CHECK: &str = "\x1b[32m✓\x1b[0m";
const RED_CROSS: &str = "\x1b[31m✗\x1b[0m";

/// Outcome of one named check.
#[derive(Debug)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
    pub detail: Option<String>,
}

/// Collected results for one suite run.
#[derive(Debug, Default)]
pub struct SmokeReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl SmokeReport {
    pub fn record(&mut self, name: &str, result: std::result::Result<(), String>) {
        match result {
            Ok(()) => {
                println!("{} {}", GREEN_CHECK, name);
                self.outcomes.push(CheckOutcome {
                    name: name.to_string(),
                    passed: true,
                    detail: None,
                });
            },
            Err(detail) => {
                println!("{} {} — {}", RED_CROSS, name, detail);
                self.outcomes.push(CheckOutcome {
                    name: name.to_string(),
                    passed: false,
                    detail: Some(detail),
                });
            },
        }
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn print_summary(&self) {
        println!(
            "\n{} passed, {} failed, {} total",
            self.passed(),
            self.failed(),
            self.outcomes.len()
        );
    }
}

/// Runs the checks of one suite against a base URL.
pub struct SmokeRunner {
    client: reqwest::Client,
    base_url: String,
}

type Check = std::result::Result<(), String>;

impl SmokeRunner {
    pub fn new(base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Run the named suite. `all` runs every service suite against each
    /// service's conventional port, ignoring the base URL override.
    pub async fn run_suite(suite: &str, base_url: Option<&str>) -> Result<SmokeReport> {
        if suite == "all" {
            let mut report = SmokeReport::default();
            for service in Service::all() {
                println!("--- {} ---", service.name());
                let url = format!("http://127.0.0.1:{}", service.default_port());
                let runner = SmokeRunner::new(url)?;
                runner.run_service(service, &mut report).await;
            }
            return Ok(report);
        }

        let service = Service::parse(suite)?;
        let url = base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", service.default_port()));
        let runner = SmokeRunner::new(url)?;
        let mut report = SmokeReport::default();
        runner.run_service(service, &mut report).await;
        Ok(report)
    }

    async fn run_service(&self, service: Service, report: &mut SmokeReport) {
        report.record(
            &format!("{}: health endpoint responds", service.name()),
            self.check_health().await,
        );
        match service {
            Service::Hms => self.run_hms(report).await,
            Service::Crm => self.run_crm(report).await,
            Service::Onboarding => self.run_onboarding(report).await,
            Service::Partners => self.run_partners(report).await,
            Service::Analytics => self.run_analytics(report).await,
            Service::Occ => self.run_occ(report).await,
        }
    }

    // ------------------------------------------------------------------
    // HTTP helpers
    // ------------------------------------------------------------------

    async fn get_json(&self, path: &str) -> std::result::Result<Value, String> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("GET {} failed: {}", url, e))?;
        if !resp.status().is_success() {
            return Err(format!("GET {} returned {}", url, resp.status()));
        }
        resp.json().await.map_err(|e| format!("invalid JSON: {}", e))
    }

    async fn send_json(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &Value,
    ) -> std::result::Result<Value, String> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .request(method.clone(), &url)
            .json(body)
            .send()
            .await
            .map_err(|e| format!("{} {} failed: {}", method, url, e))?;
        if !resp.status().is_success() {
            return Err(format!("{} {} returned {}", method, url, resp.status()));
        }
        resp.json().await.map_err(|e| format!("invalid JSON: {}", e))
    }

    async fn check_health(&self) -> Check {
        let body = self.get_json("/api/health").await?;
        expect_str(&body, "/status", "healthy")
    }

    /// Assert `{"status":"ok","data":[...]}` with a nonempty array.
    async fn check_nonempty_list(&self, path: &str) -> Check {
        let body = self.get_json(path).await?;
        let data = body["data"]
            .as_array()
            .ok_or_else(|| format!("{}: data is not an array", path))?;
        if data.is_empty() {
            return Err(format!("{}: expected at least one row", path));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Suites
    // ------------------------------------------------------------------

    async fn run_hms(&self, report: &mut SmokeReport) {
        report.record(
            "hms: patients list has rows",
            self.check_nonempty_list("/api/patients").await,
        );
        report.record(
            "hms: beds list has rows",
            self.check_nonempty_list("/api/beds").await,
        );
        report.record(
            "hms: patient create/fetch round-trip",
            self.check_patient_roundtrip().await,
        );
    }

    async fn check_patient_roundtrip(&self) -> Check {
        let created = self
            .send_json(
                reqwest::Method::POST,
                "/api/patients",
                &json!({
                    "full_name": "Smoke Test Patient",
                    "date_of_birth": "1970-01-01"
                }),
            )
            .await?;
        let id = created["data"]["id"]
            .as_i64()
            .ok_or("created patient has no id")?;
        let fetched = self.get_json(&format!("/api/patients/{}", id)).await?;
        expect_str(&fetched, "/data/full_name", "Smoke Test Patient")
    }

    async fn run_crm(&self, report: &mut SmokeReport) {
        report.record(
            "crm: leads list has rows",
            self.check_nonempty_list("/api/leads").await,
        );
        report.record(
            "crm: stage summary has rows",
            self.check_nonempty_list("/api/leads/summary").await,
        );
        report.record("crm: lead stage transition", self.check_lead_stage().await);
    }

    async fn check_lead_stage(&self) -> Check {
        let created = self
            .send_json(
                reqwest::Method::POST,
                "/api/leads",
                &json!({
                    "hospital_name": "Smoke Test Hospital",
                    "contact_name": "Smoke Tester"
                }),
            )
            .await?;
        let id = created["data"]["id"].as_i64().ok_or("created lead has no id")?;
        let updated = self
            .send_json(
                reqwest::Method::PATCH,
                &format!("/api/leads/{}/stage", id),
                &json!({"stage": "contacted"}),
            )
            .await?;
        expect_str(&updated, "/data/stage", "contacted")
    }

    async fn run_onboarding(&self, report: &mut SmokeReport) {
        report.record(
            "onboarding: signup step walk",
            self.check_signup_walk().await,
        );
    }

    async fn check_signup_walk(&self) -> Check {
        let created = self
            .send_json(
                reqwest::Method::POST,
                "/api/signups",
                &json!({"hospital_name": "Smoke Test Clinic", "plan": "clinic"}),
            )
            .await?;
        let id = created["data"]["id"]
            .as_i64()
            .ok_or("created signup has no id")?;
        self.send_json(
            reqwest::Method::PATCH,
            &format!("/api/signups/{}/step", id),
            &json!({"step": "profile"}),
        )
        .await?;
        let fetched = self.get_json(&format!("/api/signups/{}", id)).await?;
        expect_str(&fetched, "/data/step", "profile")
    }

    async fn run_partners(&self, report: &mut SmokeReport) {
        report.record(
            "partners: project status transition",
            self.check_project_status().await,
        );
    }

    async fn check_project_status(&self) -> Check {
        let created = self
            .send_json(
                reqwest::Method::POST,
                "/api/projects",
                &json!({"partner_name": "Smoke Partner", "title": "Smoke integration"}),
            )
            .await?;
        let id = created["data"]["id"]
            .as_i64()
            .ok_or("created project has no id")?;
        let updated = self
            .send_json(
                reqwest::Method::PATCH,
                &format!("/api/projects/{}/status", id),
                &json!({"status": "active"}),
            )
            .await?;
        expect_str(&updated, "/data/status", "active")
    }

    async fn run_analytics(&self, report: &mut SmokeReport) {
        report.record(
            "analytics: summary counts patients",
            self.check_summary().await,
        );
        let revenue = self.get_json("/api/revenue/monthly").await.map(|_| ());
        report.record("analytics: monthly revenue responds", revenue);
        let load = self.get_json("/api/appointments/load").await.map(|_| ());
        report.record("analytics: department load responds", load);
    }

    async fn check_summary(&self) -> Check {
        let body = self.get_json("/api/summary").await?;
        let patients = body["data"]["patients"]
            .as_i64()
            .ok_or("summary has no patient count")?;
        if patients == 0 {
            return Err("expected nonzero patient count (run `medops seed`?)".to_string());
        }
        Ok(())
    }

    async fn run_occ(&self, report: &mut SmokeReport) {
        report.record("occ: metrics snapshot responds", self.check_metrics().await);
        report.record(
            "occ: alert raise/ack round-trip",
            self.check_alert_roundtrip().await,
        );
        report.record(
            "occ: websocket sends snapshot on connect",
            self.check_ws_snapshot().await,
        );
    }

    async fn check_metrics(&self) -> Check {
        let body = self.get_json("/api/metrics").await?;
        if body["data"]["beds_total"].as_i64().is_none() {
            return Err("metrics snapshot missing beds_total".to_string());
        }
        Ok(())
    }

    async fn check_alert_roundtrip(&self) -> Check {
        let raised = self
            .send_json(
                reqwest::Method::POST,
                "/api/alerts",
                &json!({
                    "severity": "info",
                    "source": "smoke",
                    "message": "Smoke test alert"
                }),
            )
            .await?;
        let id = raised["data"]["id"].as_i64().ok_or("raised alert has no id")?;
        let acked = self
            .send_json(
                reqwest::Method::POST,
                &format!("/api/alerts/{}/ack", id),
                &json!({}),
            )
            .await?;
        if acked["data"]["acknowledged"].as_bool() != Some(true) {
            return Err("alert was not acknowledged".to_string());
        }
        Ok(())
    }

    /// Connect a WebSocket client and require a snapshot frame within 10s.
    async fn check_ws_snapshot(&self) -> Check {
        let ws_url = format!(
            "{}/ws",
            self.base_url
                .replacen("http://", "ws://", 1)
                .replacen("https://", "wss://", 1)
        );
        let (mut stream, _) = tokio_tungstenite::connect_async(ws_url.as_str())
            .await
            .map_err(|e| format!("WebSocket connect to {} failed: {}", ws_url, e))?;

        let frame = tokio::time::timeout(Duration::from_secs(10), stream.next())
            .await
            .map_err(|_| "no frame within 10s".to_string())?
            .ok_or("connection closed before first frame")?
            .map_err(|e| format!("WebSocket error: {}", e))?;

        let text = frame
            .into_text()
            .map_err(|e| format!("non-text frame: {}", e))?;
        let value: Value =
            serde_json::from_str(&text).map_err(|e| format!("invalid frame JSON: {}", e))?;
        expect_str(&value, "/type", "snapshot")
    }
}

/// Run a suite and turn a failing report into a process-level error.
pub async fn run(suite: &str, base_url: Option<&str>) -> Result<()> {
    let report = SmokeRunner::run_suite(suite, base_url).await?;
    report.print_summary();
    if report.all_passed() {
        Ok(())
    } else {
        Err(MedOpsError::InvalidInput(format!(
            "{} smoke check(s) failed",
            report.failed()
        )))
    }
}

fn expect_str(value: &Value, pointer: &str, expected: &str) -> Check {
    match value.pointer(pointer).and_then(|v| v.as_str()) {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(format!(
            "{}: expected '{}', got '{}'",
            pointer, expected, actual
        )),
        None => Err(format!("{}: missing in response", pointer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_arithmetic() {
        let mut report = SmokeReport::default();
        report.record("a", Ok(()));
        report.record("b", Err("boom".to_string()));
        report.record("c", Ok(()));
        assert_eq!(report.passed(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_empty_report_passes() {
        let report = SmokeReport::default();
        assert!(report.all_passed());
    }

    #[test]
    fn test_expect_str_matches() {
        let value = json!({"data": {"stage": "contacted"}});
        assert!(expect_str(&value, "/data/stage", "contacted").is_ok());
    }

    #[test]
    fn test_expect_str_reports_mismatch() {
        let value = json!({"data": {"stage": "new"}});
        let err = expect_str(&value, "/data/stage", "contacted").unwrap_err();
        assert!(err.contains("expected 'contacted'"));
    }

    #[test]
    fn test_expect_str_reports_missing() {
        let value = json!({});
        let err = expect_str(&value, "/data/stage", "contacted").unwrap_err();
        assert!(err.contains("missing"));
    }
}
