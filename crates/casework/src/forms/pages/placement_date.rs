use serde_json::{Map, Value};

use crate::forms::dates::{date_field_error, format_date, DateParts};
use crate::forms::domain::{CaseRecord, PageInput};
use crate::forms::page::{radio_items, yes_no_label, FieldErrors, FormPage, ResponseRow, SelectionItem};

const SAME_DATE_OPTIONS: &[(&str, &str)] = &[("yes", "Yes"), ("no", "No")];

#[derive(Debug, Clone)]
pub struct PlacementDatePage {
    person_name: String,
    same_as_release_date: Option<String>,
    start_date: Option<DateParts>,
}

impl PlacementDatePage {
    pub fn from_input(input: &PageInput, record: &CaseRecord) -> Self {
        Self {
            person_name: record.person.name.clone(),
            same_as_release_date: input.text("startDateSameAsReleaseDate"),
            start_date: DateParts::from_input(input, "startDate"),
        }
    }
}

impl FormPage for PlacementDatePage {
    fn title(&self) -> String {
        format!(
            "Is the start of {}'s placement the same as the release date?",
            self.person_name
        )
    }

    fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match self.same_as_release_date.as_deref() {
            None => {
                errors.insert(
                    "startDateSameAsReleaseDate".to_string(),
                    "You must specify if the placement starts on the release date".to_string(),
                );
            }
            Some("no") => {
                if let Some(message) =
                    date_field_error(self.start_date.as_ref(), "placement start date")
                {
                    errors.insert("startDate".to_string(), message);
                }
            }
            Some(_) => {}
        }
        errors
    }

    fn previous(&self) -> &'static str {
        "release-date"
    }

    fn response(&self) -> Vec<ResponseRow> {
        let mut rows = Vec::new();
        if let Some(same) = self.same_as_release_date.as_deref() {
            rows.push(ResponseRow::new(self.title(), yes_no_label(same)));
        }
        if let Some(date) = self.start_date.as_ref().and_then(DateParts::to_date) {
            rows.push(ResponseRow::new("Placement start date", format_date(date)));
        }
        rows
    }

    fn items(&self) -> Option<Vec<SelectionItem>> {
        Some(radio_items(
            SAME_DATE_OPTIONS,
            self.same_as_release_date.as_deref(),
        ))
    }

    fn answer(&self) -> Value {
        let mut out = Map::new();
        if let Some(value) = &self.same_as_release_date {
            out.insert(
                "startDateSameAsReleaseDate".to_string(),
                Value::String(value.clone()),
            );
        }
        if let Some(parts) = &self.start_date {
            parts.write_answer("startDate", &mut out);
        }
        Value::Object(out)
    }
}
