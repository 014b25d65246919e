use serde_json::{Map, Value};

use crate::forms::domain::{CaseRecord, PageInput};
use crate::forms::page::{option_label, radio_items, FieldErrors, FormPage, ResponseRow, SelectionItem};

pub const OPTIONS: &[(&str, &str)] = &[
    ("standard", "Standard AP"),
    ("pipe", "Psychologically Informed Planned Environment (PIPE)"),
    ("esap", "Enhanced Security AP (ESAP)"),
];

#[derive(Debug, Clone)]
pub struct ApTypePage {
    ap_type: Option<String>,
}

impl ApTypePage {
    pub fn from_input(input: &PageInput, _record: &CaseRecord) -> Self {
        Self {
            ap_type: input.text("type"),
        }
    }
}

impl FormPage for ApTypePage {
    fn title(&self) -> String {
        "Which type of AP does the person require?".to_string()
    }

    fn errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.ap_type.is_none() {
            errors.insert(
                "type".to_string(),
                "You must specify the type of AP required".to_string(),
            );
        }
        errors
    }

    fn response(&self) -> Vec<ResponseRow> {
        self.ap_type
            .as_deref()
            .map(|selected| vec![ResponseRow::new(self.title(), option_label(OPTIONS, selected))])
            .unwrap_or_default()
    }

    fn items(&self) -> Option<Vec<SelectionItem>> {
        Some(radio_items(OPTIONS, self.ap_type.as_deref()))
    }

    fn answer(&self) -> Value {
        let mut out = Map::new();
        if let Some(value) = &self.ap_type {
            out.insert("type".to_string(), Value::String(value.clone()));
        }
        Value::Object(out)
    }
}
