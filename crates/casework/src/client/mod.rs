//! Outbound plumbing to the remote case-management API.

mod case_api;
mod rest;

pub use case_api::{ApiError, CaseApi, HttpCaseApi};
pub use rest::{sanitize_body, ClientError, PipedResponse, RestClient};
