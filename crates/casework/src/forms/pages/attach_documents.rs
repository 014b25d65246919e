use serde_json::{Map, Value};

use crate::client::{ApiError, CaseApi};
use crate::forms::domain::{CaseRecord, DocumentMeta, PageInput};
use crate::forms::page::{FormPage, ResponseRow, SelectionItem};

/// Document picker backed by the remote document endpoint.
///
/// The only page with an `initialize` step: the person's document list
/// must be fetched before the page can hydrate, and collaborator errors
/// propagate unchanged.
#[derive(Debug, Clone)]
pub struct AttachDocumentsPage {
    available: Vec<DocumentMeta>,
    selected: Vec<DocumentMeta>,
}

impl AttachDocumentsPage {
    pub async fn initialize<C: CaseApi>(
        input: &PageInput,
        record: &CaseRecord,
        token: &str,
        api: &C,
    ) -> Result<Self, ApiError> {
        let available = api.documents(token, &record.person.crn).await?;
        let selected = selected_from_input(input, &available);
        Ok(Self {
            available,
            selected,
        })
    }

    /// Summary rows straight from a stored answer, without refetching the
    /// document list. Used by the review assembler, which treats this
    /// page as a special case.
    pub fn rows_from_answer(answer: &Value) -> Vec<ResponseRow> {
        answer
            .get("selectedDocuments")
            .and_then(Value::as_array)
            .map(|documents| {
                documents
                    .iter()
                    .filter_map(|entry| {
                        serde_json::from_value::<DocumentMeta>(entry.clone()).ok()
                    })
                    .map(|document| {
                        ResponseRow::new(
                            document.file_name,
                            document.description.unwrap_or_default(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

// A fresh submission carries plain document ids; a stored answer carries
// the full metadata entries. Both shapes resolve against the fetched
// list so stale ids drop out silently.
fn selected_from_input(input: &PageInput, available: &[DocumentMeta]) -> Vec<DocumentMeta> {
    match input.0.get("selectedDocuments") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(id) => available.iter().find(|doc| doc.id == *id).cloned(),
                other => serde_json::from_value::<DocumentMeta>(other.clone()).ok(),
            })
            .collect(),
        Some(Value::String(id)) => available
            .iter()
            .find(|doc| doc.id == *id)
            .cloned()
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

impl FormPage for AttachDocumentsPage {
    fn title(&self) -> String {
        "Select any relevant documents to support your application".to_string()
    }

    fn response(&self) -> Vec<ResponseRow> {
        self.selected
            .iter()
            .map(|document| {
                ResponseRow::new(
                    document.file_name.clone(),
                    document.description.clone().unwrap_or_default(),
                )
            })
            .collect()
    }

    fn items(&self) -> Option<Vec<SelectionItem>> {
        Some(
            self.available
                .iter()
                .map(|document| SelectionItem {
                    value: document.id.clone(),
                    label: document.file_name.clone(),
                    checked: self.selected.iter().any(|chosen| chosen.id == document.id),
                })
                .collect(),
        )
    }

    fn answer(&self) -> Value {
        let mut out = Map::new();
        let documents: Vec<Value> = self
            .selected
            .iter()
            .filter_map(|document| serde_json::to_value(document).ok())
            .collect();
        out.insert("selectedDocuments".to_string(), Value::Array(documents));
        Value::Object(out)
    }
}
