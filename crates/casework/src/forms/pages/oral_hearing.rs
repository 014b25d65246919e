use serde_json::{Map, Value};

use crate::forms::dates::{date_field_error, format_date, DateParts};
use crate::forms::domain::{CaseRecord, PageInput};
use crate::forms::page::{radio_items, yes_no_label, FieldErrors, FormPage, ResponseRow, SelectionItem};

const KNOW_OPTIONS: &[(&str, &str)] = &[("yes", "Yes"), ("no", "No")];

#[derive(Debug, Clone)]
pub struct OralHearingPage {
    person_name: String,
    know_oral_hearing_date: Option<String>,
    oral_hearing_date: Option<DateParts>,
}

impl OralHearingPage {
    pub fn from_input(input: &PageInput, record: &CaseRecord) -> Self {
        Self {
            person_name: record.person.name.clone(),
            know_oral_hearing_date: input.text("knowOralHearingDate"),
            oral_hearing_date: DateParts::from_input(input, "oralHearingDate"),
        }
    }
}

impl FormPage for OralHearingPage {
    fn title(&self) -> String {
        format!(
            "Do you know {}'s oral hearing date?",
            self.person_name
        )
    }

    fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match self.know_oral_hearing_date.as_deref() {
            None => {
                errors.insert(
                    "knowOralHearingDate".to_string(),
                    "You must specify if you know the oral hearing date".to_string(),
                );
            }
            Some("yes") => {
                if let Some(message) =
                    date_field_error(self.oral_hearing_date.as_ref(), "oral hearing date")
                {
                    errors.insert("oralHearingDate".to_string(), message);
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
        if let Some(know) = self.know_oral_hearing_date.as_deref() {
            rows.push(ResponseRow::new(self.title(), yes_no_label(know)));
        }
        if let Some(date) = self.oral_hearing_date.as_ref().and_then(DateParts::to_date) {
            rows.push(ResponseRow::new("Oral hearing date", format_date(date)));
        }
        rows
    }

    fn items(&self) -> Option<Vec<SelectionItem>> {
        Some(radio_items(
            KNOW_OPTIONS,
            self.know_oral_hearing_date.as_deref(),
        ))
    }

    fn answer(&self) -> Value {
        let mut out = Map::new();
        if let Some(value) = &self.know_oral_hearing_date {
            out.insert(
                "knowOralHearingDate".to_string(),
                Value::String(value.clone()),
            );
        }
        if let Some(parts) = &self.oral_hearing_date {
            parts.write_answer("oralHearingDate", &mut out);
        }
        Value::Object(out)
    }
}
