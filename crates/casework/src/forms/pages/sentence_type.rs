use serde_json::{Map, Value};

use crate::forms::domain::{CaseRecord, PageInput};
use crate::forms::page::{option_label, radio_items, FieldErrors, FormPage, ResponseRow, SelectionItem};

pub const OPTIONS: &[(&str, &str)] = &[
    ("standardDeterminate", "Standard determinate custody"),
    ("extendedDeterminate", "Extended determinate custody"),
    ("life", "Life sentence"),
    ("ipp", "Indeterminate for public protection"),
    ("communityOrder", "Community Order"),
    ("bailPlacement", "Bail placement"),
    ("nonStatutory", "Non-statutory"),
];

#[derive(Debug, Clone)]
pub struct SentenceTypePage {
    person_name: String,
    sentence_type: Option<String>,
}

impl SentenceTypePage {
    pub fn from_input(input: &PageInput, record: &CaseRecord) -> Self {
        Self {
            person_name: record.person.name.clone(),
            sentence_type: input.text("sentenceType"),
        }
    }
}

impl FormPage for SentenceTypePage {
    fn title(&self) -> String {
        format!(
            "Which of the following best describes {}'s sentence type?",
            self.person_name
        )
    }

    fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.sentence_type.is_none() {
            errors.insert(
                "sentenceType".to_string(),
                "You must choose a sentence type".to_string(),
            );
        }
        errors
    }

    // Custodial sentences continue to release details; community and
    // bail placements have no release to describe, so they branch to the
    // situation question. Anything unrecognized falls through to the
    // terminal route.
    fn next(&self) -> &'static str {
        match self.sentence_type.as_deref() {
            Some("standardDeterminate" | "extendedDeterminate" | "life" | "ipp") => "release-type",
            Some("communityOrder" | "bailPlacement" | "nonStatutory") => "situation",
            _ => "",
        }
    }

    fn response(&self) -> Vec<ResponseRow> {
        self.sentence_type
            .as_deref()
            .map(|selected| vec![ResponseRow::new(self.title(), option_label(OPTIONS, selected))])
            .unwrap_or_default()
    }

    fn items(&self) -> Option<Vec<SelectionItem>> {
        Some(radio_items(OPTIONS, self.sentence_type.as_deref()))
    }

    fn answer(&self) -> Value {
        let mut out = Map::new();
        if let Some(value) = &self.sentence_type {
            out.insert("sentenceType".to_string(), Value::String(value.clone()));
        }
        Value::Object(out)
    }
}
