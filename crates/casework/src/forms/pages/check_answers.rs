use serde_json::{Map, Value};

use crate::forms::domain::{CaseRecord, PageInput};
use crate::forms::page::{FieldErrors, FormPage, ResponseRow};

#[derive(Debug, Clone)]
pub struct CheckAnswersPage {
    reviewed: Option<String>,
}

impl CheckAnswersPage {
    pub fn from_input(input: &PageInput, _record: &CaseRecord) -> Self {
        Self {
            reviewed: input.text("reviewed"),
        }
    }

    pub fn confirmed(&self) -> bool {
        self.reviewed.as_deref() == Some("1")
    }
}

impl FormPage for CheckAnswersPage {
    fn title(&self) -> String {
        "Check your answers".to_string()
    }

    fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if !self.confirmed() {
            errors.insert(
                "reviewed".to_string(),
                "You must review the information provided before submitting".to_string(),
            );
        }
        errors
    }

    fn response(&self) -> Vec<ResponseRow> {
        Vec::new()
    }

    fn answer(&self) -> Value {
        let mut out = Map::new();
        if let Some(value) = &self.reviewed {
            out.insert("reviewed".to_string(), Value::String(value.clone()));
        }
        Value::Object(out)
    }
}
