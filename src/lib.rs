// ABOUTME: Library root for rollguard - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod cluster;
pub mod config;
pub mod deploy;
pub mod error;
pub mod exec;
pub mod health;
pub mod kubectl;
pub mod orchestrator;
pub mod output;
pub mod status;
pub mod types;
