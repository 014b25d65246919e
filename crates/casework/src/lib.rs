//! Form-driven case management engine for approved premises placement
//! applications: a wizard-style page flow over case records owned by a
//! remote case-management API.

pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod telemetry;
