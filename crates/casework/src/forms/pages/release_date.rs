use serde_json::{Map, Value};

use crate::forms::dates::{date_field_error, format_date, DateParts};
use crate::forms::domain::{CaseRecord, PageInput, TaskId};
use crate::forms::page::{radio_items, yes_no_label, FieldErrors, FormPage, ResponseRow, SelectionItem};

const KNOW_OPTIONS: &[(&str, &str)] = &[("yes", "Yes"), ("no", "No")];

#[derive(Debug, Clone)]
pub struct ReleaseDatePage {
    person_name: String,
    // Recorded earlier in the task; decides which page the backward
    // route lands on when the forward path skipped one.
    sentence_type: Option<String>,
    know_release_date: Option<String>,
    release_date: Option<DateParts>,
}

impl ReleaseDatePage {
    pub fn from_input(input: &PageInput, record: &CaseRecord) -> Self {
        let sentence_type = record
            .data
            .page_answer(TaskId::BasicInformation.slug(), "sentence-type")
            .and_then(|answer| answer.get("sentenceType"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        Self {
            person_name: record.person.name.clone(),
            sentence_type,
            know_release_date: input.text("knowReleaseDate"),
            release_date: DateParts::from_input(input, "releaseDate"),
        }
    }
}

impl FormPage for ReleaseDatePage {
    fn title(&self) -> String {
        format!("Do you know {}'s release date?", self.person_name)
    }

    fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match self.know_release_date.as_deref() {
            None => {
                errors.insert(
                    "knowReleaseDate".to_string(),
                    "You must specify if you know the release date".to_string(),
                );
            }
            Some("yes") => {
                if let Some(message) = date_field_error(self.release_date.as_ref(), "release date")
                {
                    errors.insert("releaseDate".to_string(), message);
                }
            }
            Some(_) => {}
        }
        errors
    }

    fn next(&self) -> &'static str {
        match self.know_release_date.as_deref() {
            Some("yes") => "placement-date",
            Some("no") => "oral-hearing",
            _ => "",
        }
    }

    fn previous(&self) -> &'static str {
        match self.sentence_type.as_deref() {
            Some("communityOrder" | "bailPlacement" | "nonStatutory") => "situation",
            _ => "release-type",
        }
    }

    fn response(&self) -> Vec<ResponseRow> {
        let mut rows = Vec::new();
        if let Some(know) = self.know_release_date.as_deref() {
            rows.push(ResponseRow::new(self.title(), yes_no_label(know)));
        }
        if let Some(date) = self.release_date.as_ref().and_then(DateParts::to_date) {
            rows.push(ResponseRow::new("Release date", format_date(date)));
        }
        rows
    }

    fn items(&self) -> Option<Vec<SelectionItem>> {
        Some(radio_items(KNOW_OPTIONS, self.know_release_date.as_deref()))
    }

    fn answer(&self) -> Value {
        let mut out = Map::new();
        if let Some(value) = &self.know_release_date {
            out.insert("knowReleaseDate".to_string(), Value::String(value.clone()));
        }
        if let Some(parts) = &self.release_date {
            parts.write_answer("releaseDate", &mut out);
        }
        Value::Object(out)
    }
}
