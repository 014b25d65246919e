use serde_json::{Map, Value};

use crate::forms::domain::{CaseRecord, PageInput};
use crate::forms::page::{option_label, radio_items, FieldErrors, FormPage, ResponseRow, SelectionItem};

pub const OPTIONS: &[(&str, &str)] = &[
    ("licence", "Licence"),
    ("rotl", "Release on temporary licence (ROTL)"),
    ("hdc", "Home detention curfew (HDC)"),
    ("pss", "Post sentence supervision (PSS)"),
];

#[derive(Debug, Clone)]
pub struct ReleaseTypePage {
    release_type: Option<String>,
}

impl ReleaseTypePage {
    pub fn from_input(input: &PageInput, _record: &CaseRecord) -> Self {
        Self {
            release_type: input.text("releaseType"),
        }
    }
}

impl FormPage for ReleaseTypePage {
    fn title(&self) -> String {
        "What type of release will the placement support?".to_string()
    }

    fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.release_type.is_none() {
            errors.insert(
                "releaseType".to_string(),
                "You must choose a release type".to_string(),
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
        self.release_type
            .as_deref()
            .map(|selected| vec![ResponseRow::new(self.title(), option_label(OPTIONS, selected))])
            .unwrap_or_default()
    }

    fn items(&self) -> Option<Vec<SelectionItem>> {
        Some(radio_items(OPTIONS, self.release_type.as_deref()))
    }

    fn answer(&self) -> Value {
        let mut out = Map::new();
        if let Some(value) = &self.release_type {
            out.insert("releaseType".to_string(), Value::String(value.clone()));
        }
        Value::Object(out)
    }
}
