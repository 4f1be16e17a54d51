pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod occ;
pub mod repos;
pub mod server;
pub mod services;
pub mod smoke;
pub mod sql;
