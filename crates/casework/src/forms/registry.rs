//! Static registry of the placement journey: sections to tasks to
//! ordered pages, plus lookup from request slugs to page behavior.
//!
//! The set of (task, page) pairs is closed at compile time; resolution
//! failures surface as an explicit [`FlowError`] rather than a missing
//! property access.

use crate::client::{ApiError, CaseApi};
use crate::forms::domain::{CaseRecord, FlowError, PageInput, TaskId, TaskStatus};
use crate::forms::page::FormPage;
use crate::forms::pages::{
    ApTypePage, AttachDocumentsPage, CheckAnswersPage, OralHearingPage, PlacementDatePage,
    ReleaseDatePage, ReleaseTypePage, SentenceTypePage, SituationPage,
};

/// Tag for each registered page, resolved from request slugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTag {
    SentenceType,
    ReleaseType,
    Situation,
    ReleaseDate,
    PlacementDate,
    OralHearing,
    ApType,
    AttachDocuments,
    CheckAnswers,
}

/// Ordered page slugs owned by a task. Branching only ever skips pages;
/// it never reorders this listing.
pub const fn pages_for(task: TaskId) -> &'static [&'static str] {
    match task {
        TaskId::BasicInformation => &[
            "sentence-type",
            "release-type",
            "situation",
            "release-date",
            "placement-date",
            "oral-hearing",
        ],
        TaskId::TypeOfAp => &["ap-type"],
        TaskId::AttachRequiredDocuments => &["attach-documents"],
        TaskId::CheckYourAnswers => &["review"],
    }
}

/// The page a task's journey opens on.
pub fn first_page(task: TaskId) -> &'static str {
    pages_for(task)[0]
}

/// Looks up the registered page for a (task, page) slug pair.
pub fn resolve(task_slug: &str, page_slug: &str) -> Result<(TaskId, PageTag), FlowError> {
    let unknown = || FlowError::UnknownPage {
        task: task_slug.to_string(),
        page: page_slug.to_string(),
    };

    let task = TaskId::from_slug(task_slug).ok_or_else(unknown)?;
    let tag = match (task, page_slug) {
        (TaskId::BasicInformation, "sentence-type") => PageTag::SentenceType,
        (TaskId::BasicInformation, "release-type") => PageTag::ReleaseType,
        (TaskId::BasicInformation, "situation") => PageTag::Situation,
        (TaskId::BasicInformation, "release-date") => PageTag::ReleaseDate,
        (TaskId::BasicInformation, "placement-date") => PageTag::PlacementDate,
        (TaskId::BasicInformation, "oral-hearing") => PageTag::OralHearing,
        (TaskId::TypeOfAp, "ap-type") => PageTag::ApType,
        (TaskId::AttachRequiredDocuments, "attach-documents") => PageTag::AttachDocuments,
        (TaskId::CheckYourAnswers, "review") => PageTag::CheckAnswers,
        _ => return Err(unknown()),
    };

    Ok((task, tag))
}

impl PageTag {
    /// Hydrates the page against a body and its case record, running the
    /// page's `initialize` step where one is defined.
    pub async fn instantiate<C: CaseApi>(
        self,
        input: &PageInput,
        record: &CaseRecord,
        token: &str,
        api: &C,
    ) -> Result<Box<dyn FormPage>, ApiError> {
        match self.instantiate_offline(input, record) {
            Some(page) => Ok(page),
            None => {
                let page = AttachDocumentsPage::initialize(input, record, token, api).await?;
                Ok(Box::new(page))
            }
        }
    }

    /// Hydrates pages that need no collaborator data. `None` for the
    /// attach-documents page, whose review rendering is special-cased.
    pub fn instantiate_offline(
        self,
        input: &PageInput,
        record: &CaseRecord,
    ) -> Option<Box<dyn FormPage>> {
        let page: Box<dyn FormPage> = match self {
            PageTag::SentenceType => Box::new(SentenceTypePage::from_input(input, record)),
            PageTag::ReleaseType => Box::new(ReleaseTypePage::from_input(input, record)),
            PageTag::Situation => Box::new(SituationPage::from_input(input, record)),
            PageTag::ReleaseDate => Box::new(ReleaseDatePage::from_input(input, record)),
            PageTag::PlacementDate => Box::new(PlacementDatePage::from_input(input, record)),
            PageTag::OralHearing => Box::new(OralHearingPage::from_input(input, record)),
            PageTag::ApType => Box::new(ApTypePage::from_input(input, record)),
            PageTag::CheckAnswers => Box::new(CheckAnswersPage::from_input(input, record)),
            PageTag::AttachDocuments => return None,
        };
        Some(page)
    }
}

/// Binary completion state: a task is complete only when every page it
/// owns has a recorded answer; anything less reads as not started.
pub fn task_status(record: &CaseRecord, task: TaskId) -> TaskStatus {
    let all_answered = pages_for(task)
        .iter()
        .all(|page| record.data.has_answer(task.slug(), page));

    if all_answered {
        TaskStatus::Completed
    } else {
        TaskStatus::NotStarted
    }
}
