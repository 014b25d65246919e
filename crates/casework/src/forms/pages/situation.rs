use serde_json::{Map, Value};

use crate::forms::domain::{CaseRecord, PageInput};
use crate::forms::page::{option_label, radio_items, FieldErrors, FormPage, ResponseRow, SelectionItem};

pub const OPTIONS: &[(&str, &str)] = &[
    ("riskManagement", "Application for risk management"),
    ("residencyManagement", "Specified residency requirement"),
    ("bailAssessment", "Bail assessment for residency requirement"),
    ("bailSentence", "Bail placement"),
    ("awaitingSentence", "Awaiting sentence"),
];

#[derive(Debug, Clone)]
pub struct SituationPage {
    person_name: String,
    situation: Option<String>,
}

impl SituationPage {
    pub fn from_input(input: &PageInput, record: &CaseRecord) -> Self {
        Self {
            person_name: record.person.name.clone(),
            situation: input.text("situation"),
        }
    }
}

impl FormPage for SituationPage {
    fn title(&self) -> String {
        format!(
            "Which of the following options best describes {}'s situation?",
            self.person_name
        )
    }

    fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.situation.is_none() {
            errors.insert(
                "situation".to_string(),
                "You must choose a situation".to_string(),
            );
        }
        errors
    }

    fn next(&self) -> &'static str {
        "release-date"
    }

    fn previous(&self) -> &'static str {
        "sentence-type"
    }

    fn response(&self) -> Vec<ResponseRow> {
        self.situation
            .as_deref()
            .map(|selected| vec![ResponseRow::new(self.title(), option_label(OPTIONS, selected))])
            .unwrap_or_default()
    }

    fn items(&self) -> Option<Vec<SelectionItem>> {
        Some(radio_items(OPTIONS, self.situation.as_deref()))
    }

    fn answer(&self) -> Value {
        let mut out = Map::new();
        if let Some(value) = &self.situation {
            out.insert("situation".to_string(), Value::String(value.clone()));
        }
        Value::Object(out)
    }
}
