use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier wrapper for case records owned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId(pub String);

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Subject of a placement application, as returned by the person lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    pub crn: String,
    pub name: String,
}

/// High level lifecycle of a case record on the web tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    InProgress,
    Submitted,
}

impl CaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In progress",
            Self::Submitted => "Submitted",
        }
    }
}

/// The application/assessment resource round-tripped through the remote API.
///
/// The web tier never persists it directly; every mutation is a
/// read-modify-write through the case API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: CaseId,
    pub person: PersonDetails,
    #[serde(default)]
    pub data: AnswerStore,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl CaseRecord {
    pub fn status(&self) -> CaseStatus {
        if self.submitted_at.is_some() {
            CaseStatus::Submitted
        } else {
            CaseStatus::InProgress
        }
    }
}

/// Per-page answers keyed by task slug then page slug.
///
/// A page's entry is only ever written after the page validated the
/// submitted body, so presence of a key doubles as the completion signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore(BTreeMap<String, BTreeMap<String, Value>>);

impl AnswerStore {
    pub fn page_answer(&self, task: &str, page: &str) -> Option<&Value> {
        self.0.get(task).and_then(|pages| pages.get(page))
    }

    pub fn record(&mut self, task: &str, page: &str, answer: Value) {
        self.0
            .entry(task.to_string())
            .or_default()
            .insert(page.to_string(), answer);
    }

    pub fn has_answer(&self, task: &str, page: &str) -> bool {
        self.page_answer(task, page).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|pages| pages.is_empty())
    }
}

/// Derived, binary completion state shown on the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    Completed,
}

impl TaskStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::Completed => "Completed",
        }
    }
}

/// Ordered sections of the placement journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    ReasonsForPlacement,
    ConsiderationsForPlacement,
    CheckYourAnswers,
}

impl SectionId {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::ReasonsForPlacement,
            Self::ConsiderationsForPlacement,
            Self::CheckYourAnswers,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ReasonsForPlacement => "Reasons for placement",
            Self::ConsiderationsForPlacement => "Considerations for placement",
            Self::CheckYourAnswers => "Check your answers",
        }
    }

    pub const fn tasks(self) -> &'static [TaskId] {
        match self {
            Self::ReasonsForPlacement => &[TaskId::BasicInformation, TaskId::TypeOfAp],
            Self::ConsiderationsForPlacement => &[TaskId::AttachRequiredDocuments],
            Self::CheckYourAnswers => &[TaskId::CheckYourAnswers],
        }
    }
}

/// Named task groups; ordering within a section is fixed at definition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskId {
    BasicInformation,
    TypeOfAp,
    AttachRequiredDocuments,
    CheckYourAnswers,
}

impl TaskId {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::BasicInformation,
            Self::TypeOfAp,
            Self::AttachRequiredDocuments,
            Self::CheckYourAnswers,
        ]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::BasicInformation => "basic-information",
            Self::TypeOfAp => "type-of-ap",
            Self::AttachRequiredDocuments => "attach-required-documents",
            Self::CheckYourAnswers => "check-your-answers",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BasicInformation => "Basic information",
            Self::TypeOfAp => "Type of AP required",
            Self::AttachRequiredDocuments => "Attach required documents",
            Self::CheckYourAnswers => "Check your answers",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|task| task.slug() == slug)
    }
}

/// Metadata for a document held by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub id: String,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Raw submitted-or-stored body for one page.
///
/// Values stay loosely typed here; each page's constructor lifts them
/// into its concrete body struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageInput(pub BTreeMap<String, Value>);

impl PageInput {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
            _ => Self::default(),
        }
    }

    /// A trimmed, non-empty string field, or `None`.
    pub fn text(&self, field: &str) -> Option<String> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    }
}

/// Navigation failures raised when a request names an unregistered step.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("no page {page} registered under task {task}")]
    UnknownPage { task: String, page: String },
}
