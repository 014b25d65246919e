//! The page-flow engine: static journey registry, per-page behavior
//! contracts, the task-list controller, and review assembly.

pub mod dates;
pub mod domain;
pub mod flash;
pub mod page;
pub mod pages;
pub mod registry;
pub mod report;
mod router;
mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use router::journey_router;
pub use service::{
    page_path, FormService, ServiceError, StartOutcome, SubmitOutcome, UpdateOutcome,
};
