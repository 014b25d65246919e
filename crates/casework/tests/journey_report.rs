use casework::forms::domain::{
    CaseId, CaseRecord, PersonDetails, SectionId, TaskId, TaskStatus,
};
use casework::forms::registry::{first_page, pages_for, task_status};
use casework::forms::report::assemble;
use chrono::Utc;
use serde_json::json;

fn record() -> CaseRecord {
    CaseRecord {
        id: CaseId("case-7001".to_string()),
        person: PersonDetails {
            crn: "X320741".to_string(),
            name: "Robert Brown".to_string(),
        },
        data: Default::default(),
        created_at: Utc::now(),
        submitted_at: None,
    }
}

#[test]
fn journey_structure_is_fixed_at_definition_time() {
    let sections = SectionId::ordered();
    assert_eq!(sections[0], SectionId::ReasonsForPlacement);
    assert_eq!(
        sections[0].tasks(),
        &[TaskId::BasicInformation, TaskId::TypeOfAp]
    );

    assert_eq!(
        pages_for(TaskId::BasicInformation),
        &[
            "sentence-type",
            "release-type",
            "situation",
            "release-date",
            "placement-date",
            "oral-hearing",
        ]
    );
    assert_eq!(first_page(TaskId::TypeOfAp), "ap-type");
}

#[test]
fn task_status_is_binary_completed_or_not_started() {
    let mut record = record();

    assert_eq!(
        task_status(&record, TaskId::TypeOfAp),
        TaskStatus::NotStarted
    );

    record
        .data
        .record("type-of-ap", "ap-type", json!({ "type": "standard" }));
    assert_eq!(
        task_status(&record, TaskId::TypeOfAp),
        TaskStatus::Completed
    );

    // A partially answered task reads as not started; there is no
    // in-progress state.
    record.data.record(
        "basic-information",
        "sentence-type",
        json!({ "sentenceType": "life" }),
    );
    assert_eq!(
        task_status(&record, TaskId::BasicInformation),
        TaskStatus::NotStarted
    );
}

#[test]
fn empty_record_assembles_no_sections() {
    assert!(assemble(&record()).is_empty());
}

#[test]
fn cards_follow_registry_order_and_skip_unanswered_pages() {
    let mut record = record();
    record.data.record(
        "basic-information",
        "release-date",
        json!({
            "knowReleaseDate": "yes",
            "releaseDate": "2026-05-12",
            "releaseDate-day": "12",
            "releaseDate-month": "5",
            "releaseDate-year": "2026",
        }),
    );
    record.data.record(
        "basic-information",
        "sentence-type",
        json!({ "sentenceType": "standardDeterminate" }),
    );
    record
        .data
        .record("type-of-ap", "ap-type", json!({ "type": "pipe" }));

    let sections = assemble(&record);
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].section, SectionId::ReasonsForPlacement);

    let cards = &sections[0].cards;
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].task, TaskId::BasicInformation);
    assert_eq!(cards[1].task, TaskId::TypeOfAp);

    // Registry order, not insertion order: sentence type precedes the
    // release date even though it was recorded second.
    let labels: Vec<&str> = cards[0].rows.iter().map(|row| row.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Which of the following best describes Robert Brown's sentence type?",
            "Do you know Robert Brown's release date?",
            "Release date",
        ]
    );

    let values: Vec<&str> = cards[0].rows.iter().map(|row| row.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["Standard determinate custody", "Yes", "12 May 2026"]
    );
}

#[test]
fn summary_rows_never_expose_raw_date_parts() {
    let mut record = record();
    record.data.record(
        "basic-information",
        "oral-hearing",
        json!({
            "knowOralHearingDate": "yes",
            "oralHearingDate": "2026-05-01",
            "oralHearingDate-day": "1",
            "oralHearingDate-month": "5",
            "oralHearingDate-year": "2026",
        }),
    );

    let sections = assemble(&record);
    let rows: Vec<_> = sections
        .iter()
        .flat_map(|section| section.cards.iter())
        .flat_map(|card| &card.rows)
        .collect();

    assert!(rows
        .iter()
        .any(|row| row.label == "Oral hearing date" && row.value == "1 May 2026"));
    assert!(rows.iter().all(|row| !row.label.contains("-day")
        && !row.label.contains("-month")
        && !row.label.contains("-year")));
}

#[test]
fn document_answers_render_one_row_per_document() {
    let mut record = record();
    record.data.record(
        "attach-required-documents",
        "attach-documents",
        json!({
            "selectedDocuments": [
                {
                    "id": "doc-1",
                    "fileName": "pre-sentence-report.pdf",
                    "description": "Pre-sentence report",
                },
                {
                    "id": "doc-2",
                    "fileName": "licence-conditions.pdf",
                    "description": "Licence conditions",
                },
            ],
        }),
    );

    let sections = assemble(&record);
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].section, SectionId::ConsiderationsForPlacement);

    let card = &sections[0].cards[0];
    assert_eq!(card.task, TaskId::AttachRequiredDocuments);
    assert_eq!(card.rows.len(), 2);
    assert_eq!(card.rows[0].label, "pre-sentence-report.pdf");
    assert_eq!(card.rows[0].value, "Pre-sentence report");
}
