//! Review assembly: reconstructs the human-readable answer trail from a
//! case record's stored answers, one card per answered task.

use serde::Serialize;

use crate::forms::domain::{CaseRecord, PageInput, SectionId, TaskId};
use crate::forms::page::ResponseRow;
use crate::forms::pages::AttachDocumentsPage;
use crate::forms::registry::{pages_for, resolve, PageTag};

#[derive(Debug, Clone, Serialize)]
pub struct TaskCard {
    pub task: TaskId,
    pub title: &'static str,
    pub rows: Vec<ResponseRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    pub section: SectionId,
    pub title: &'static str,
    pub cards: Vec<TaskCard>,
}

/// Walks sections, tasks, and pages in registry order and renders each
/// stored answer through its page's response contract. Unanswered pages
/// contribute nothing; ordering never varies per record.
pub fn assemble(record: &CaseRecord) -> Vec<SectionSummary> {
    let mut sections = Vec::new();

    for section in SectionId::ordered() {
        let mut cards = Vec::new();

        for task in section.tasks() {
            // The review task summarizes the others; it has no card of
            // its own.
            if *task == TaskId::CheckYourAnswers {
                continue;
            }

            let rows = task_rows(record, *task);
            if !rows.is_empty() {
                cards.push(TaskCard {
                    task: *task,
                    title: task.label(),
                    rows,
                });
            }
        }

        if !cards.is_empty() {
            sections.push(SectionSummary {
                section,
                title: section.label(),
                cards,
            });
        }
    }

    sections
}

fn task_rows(record: &CaseRecord, task: TaskId) -> Vec<ResponseRow> {
    let mut rows = Vec::new();

    for page in pages_for(task) {
        let Some(answer) = record.data.page_answer(task.slug(), page) else {
            continue;
        };

        let Ok((_, tag)) = resolve(task.slug(), page) else {
            continue;
        };

        // The document page enumerates its referenced list directly
        // instead of going through the per-field formatter.
        if tag == PageTag::AttachDocuments {
            rows.extend(AttachDocumentsPage::rows_from_answer(answer));
            continue;
        }

        let input = PageInput::from_value(answer);
        if let Some(instance) = tag.instantiate_offline(&input, record) {
            rows.extend(instance.response());
        }
    }

    rows
}
