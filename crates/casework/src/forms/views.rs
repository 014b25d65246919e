//! Serialized shapes handed to the rendering layer.

use serde::Serialize;
use serde_json::Value;

use crate::forms::domain::{CaseStatus, SectionId, TaskStatus};
use crate::forms::page::{FieldErrors, SelectionItem};
use crate::forms::report::SectionSummary;

/// One rendered form step.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub case_id: String,
    pub task: &'static str,
    pub page: String,
    pub title: String,
    /// Normalized body for redisplay; reflects flashed input when the
    /// previous submission failed validation.
    pub body: Value,
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SelectionItem>>,
    /// Backward navigation target, empty on a task's first page.
    pub previous: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TaskListView {
    pub case_id: String,
    pub status: CaseStatus,
    pub status_label: &'static str,
    pub sections: Vec<TaskListSection>,
}

#[derive(Debug, Serialize)]
pub struct TaskListSection {
    pub section: SectionId,
    pub title: &'static str,
    pub tasks: Vec<TaskEntry>,
}

#[derive(Debug, Serialize)]
pub struct TaskEntry {
    pub slug: &'static str,
    pub name: &'static str,
    pub status: TaskStatus,
    pub status_label: &'static str,
    /// Where following the task link lands.
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub case_id: String,
    pub person_name: String,
    pub sections: Vec<SectionSummary>,
}

/// The application-start search view, with any flashed lookup failure.
#[derive(Debug, Serialize)]
pub struct SearchView {
    pub title: &'static str,
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
}
