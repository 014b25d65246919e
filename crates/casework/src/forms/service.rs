use std::sync::Arc;

use crate::client::{ApiError, CaseApi, PipedResponse};
use crate::forms::domain::{CaseId, FlowError, PageInput, SectionId, TaskId};
use crate::forms::flash::{FlashEntry, FlashStore};
use crate::forms::page::FieldErrors;
use crate::forms::registry::{self, first_page};
use crate::forms::report;
use crate::forms::views::{
    PageView, SearchView, SummaryView, TaskEntry, TaskListSection, TaskListView,
};

/// Drives the show/update cycle for every registered page, persisting
/// accepted answers through the case API and carrying validation
/// failures across the redirect via the flash store.
pub struct FormService<C, F> {
    api: Arc<C>,
    flash: Arc<F>,
}

/// Result of a page submission.
#[derive(Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The answer was persisted; `next_page` is `None` when the page
    /// ends its task.
    Saved { next_page: Option<&'static str> },
    /// Validation failed; redirect back to the page with this token.
    Invalid { flash_token: String },
}

/// Result of starting a new application from a CRN search.
#[derive(Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Created { case_id: CaseId },
    PersonNotFound { flash_token: String },
}

/// Result of a submission attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    /// The review step has not been confirmed; redirect there with this
    /// token.
    NotConfirmed { flash_token: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("application {0} has already been submitted")]
    AlreadySubmitted(CaseId),
}

impl<C, F> FormService<C, F>
where
    C: CaseApi,
    F: FlashStore,
{
    pub fn new(api: Arc<C>, flash: Arc<F>) -> Self {
        Self { api, flash }
    }

    /// Renders one step of the journey. A flashed validation failure
    /// from the preceding submission takes precedence over the stored
    /// answer and is consumed in the process.
    pub async fn show_page(
        &self,
        token: &str,
        case_id: &CaseId,
        task_slug: &str,
        page_slug: &str,
        flash_token: Option<&str>,
    ) -> Result<PageView, ServiceError> {
        let (task, tag) = registry::resolve(task_slug, page_slug)?;
        let record = self.api.application(token, case_id).await?;

        let flashed = flash_token.and_then(|value| self.flash.take(value));
        let (input, errors) = match flashed {
            Some(entry) => (entry.input, entry.errors),
            None => {
                let stored = record
                    .data
                    .page_answer(task.slug(), page_slug)
                    .map(PageInput::from_value)
                    .unwrap_or_default();
                (stored, FieldErrors::new())
            }
        };

        let page = tag
            .instantiate(&input, &record, token, self.api.as_ref())
            .await?;

        Ok(PageView {
            case_id: record.id.0.clone(),
            task: task.slug(),
            page: page_slug.to_string(),
            title: page.title(),
            body: page.answer(),
            errors,
            items: page.items(),
            previous: page.previous(),
        })
    }

    /// Validates and persists one page submission. The answer is only
    /// written once the page's own validation passes; failed input is
    /// flashed so the redisplay can preserve it.
    pub async fn update_page(
        &self,
        token: &str,
        case_id: &CaseId,
        task_slug: &str,
        page_slug: &str,
        input: PageInput,
    ) -> Result<UpdateOutcome, ServiceError> {
        let (task, tag) = registry::resolve(task_slug, page_slug)?;
        let mut record = self.api.application(token, case_id).await?;

        if record.submitted_at.is_some() {
            return Err(ServiceError::AlreadySubmitted(record.id));
        }

        let page = tag
            .instantiate(&input, &record, token, self.api.as_ref())
            .await?;

        let errors = page.errors();
        if !errors.is_empty() {
            let flash_token = self.flash.put(FlashEntry { errors, input });
            return Ok(UpdateOutcome::Invalid { flash_token });
        }

        record.data.record(task.slug(), page_slug, page.answer());
        self.api.update_application(token, &record).await?;

        let next = page.next();
        Ok(UpdateOutcome::Saved {
            next_page: (!next.is_empty()).then_some(next),
        })
    }

    /// Section-by-section task list with derived completion statuses.
    pub async fn task_list(
        &self,
        token: &str,
        case_id: &CaseId,
    ) -> Result<TaskListView, ServiceError> {
        let record = self.api.application(token, case_id).await?;

        let sections = SectionId::ordered()
            .into_iter()
            .map(|section| TaskListSection {
                section,
                title: section.label(),
                tasks: section
                    .tasks()
                    .iter()
                    .map(|task| {
                        let status = registry::task_status(&record, *task);
                        TaskEntry {
                            slug: task.slug(),
                            name: task.label(),
                            status,
                            status_label: status.label(),
                            path: page_path(&record.id, *task, first_page(*task)),
                        }
                    })
                    .collect(),
            })
            .collect();

        Ok(TaskListView {
            case_id: record.id.0.clone(),
            status: record.status(),
            status_label: record.status().label(),
            sections,
        })
    }

    /// The check-your-answers view assembled from stored answers.
    pub async fn summary(
        &self,
        token: &str,
        case_id: &CaseId,
    ) -> Result<SummaryView, ServiceError> {
        let record = self.api.application(token, case_id).await?;
        Ok(SummaryView {
            case_id: record.id.0.clone(),
            person_name: record.person.name.clone(),
            sections: report::assemble(&record),
        })
    }

    /// Starts a new application from a CRN. A failed person lookup is
    /// translated into a field-level flash error rather than a generic
    /// failure; any other collaborator error propagates.
    pub async fn start_application(
        &self,
        token: &str,
        crn: &str,
    ) -> Result<StartOutcome, ServiceError> {
        match self.api.find_person(token, crn).await {
            Ok(person) => {
                let record = self.api.create_application(token, &person.crn).await?;
                Ok(StartOutcome::Created { case_id: record.id })
            }
            Err(ApiError::PersonNotFound { crn }) => {
                let mut errors = FieldErrors::new();
                errors.insert(
                    "crn".to_string(),
                    format!("No person with a CRN of '{crn}' was found"),
                );
                let flash_token = self.flash.put(FlashEntry {
                    errors,
                    input: PageInput::default(),
                });
                Ok(StartOutcome::PersonNotFound { flash_token })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// The search view shown before an application exists, including any
    /// flashed lookup failure.
    pub fn search_view(&self, flash_token: Option<&str>) -> SearchView {
        let errors = flash_token
            .and_then(|value| self.flash.take(value))
            .map(|entry| entry.errors)
            .unwrap_or_default();

        SearchView {
            title: "Enter the person's CRN",
            errors,
        }
    }

    /// Submits the application once the review step is confirmed. The
    /// record is never mutated by this tier again afterwards.
    pub async fn submit(
        &self,
        token: &str,
        case_id: &CaseId,
    ) -> Result<SubmitOutcome, ServiceError> {
        let record = self.api.application(token, case_id).await?;

        if record.submitted_at.is_some() {
            return Err(ServiceError::AlreadySubmitted(record.id));
        }

        if !record
            .data
            .has_answer(TaskId::CheckYourAnswers.slug(), "review")
        {
            let mut errors = FieldErrors::new();
            errors.insert(
                "reviewed".to_string(),
                "You must review the information provided before submitting".to_string(),
            );
            let flash_token = self.flash.put(FlashEntry {
                errors,
                input: PageInput::default(),
            });
            return Ok(SubmitOutcome::NotConfirmed { flash_token });
        }

        self.api.submit_application(token, case_id).await?;
        Ok(SubmitOutcome::Submitted)
    }

    /// Streams a document held by the remote API to the caller.
    pub async fn document(
        &self,
        token: &str,
        case_id: &CaseId,
        document_id: &str,
    ) -> Result<PipedResponse, ServiceError> {
        let record = self.api.application(token, case_id).await?;
        let piped = self
            .api
            .document_stream(token, &record.person.crn, document_id)
            .await?;
        Ok(piped)
    }
}

/// Canonical path for one journey step.
pub fn page_path(case_id: &CaseId, task: TaskId, page: &str) -> String {
    format!("/applications/{case_id}/tasks/{}/pages/{page}", task.slug())
}
