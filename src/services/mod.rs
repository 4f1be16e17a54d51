//! Route tables and handlers for the platform's CRUD services.
//!
//! Each submodule is one service: the same `HTTP route → repo call → JSON
//! envelope` shape the source platform repeated per file, consolidated
//! behind a shared `AppState`.

pub mod analytics;
pub mod crm;
pub mod hms;
pub mod models;
pub mod onboarding;
pub mod partners;
