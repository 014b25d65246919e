use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Bytes;
use chrono::Utc;
use futures::StreamExt;
use serde_json::{json, Value};

use crate::client::{ApiError, CaseApi, ClientError, PipedResponse};
use crate::forms::domain::{CaseId, CaseRecord, DocumentMeta, PageInput, PersonDetails};
use crate::forms::flash::InMemoryFlashStore;
use crate::forms::FormService;

pub(super) const TOKEN: &str = "token-abc";

pub(super) fn person() -> PersonDetails {
    PersonDetails {
        crn: "X320741".to_string(),
        name: "Robert Brown".to_string(),
    }
}

pub(super) fn case_record() -> CaseRecord {
    CaseRecord {
        id: CaseId("case-0001".to_string()),
        person: person(),
        data: Default::default(),
        created_at: Utc::now(),
        submitted_at: None,
    }
}

pub(super) fn sample_documents() -> Vec<DocumentMeta> {
    vec![
        DocumentMeta {
            id: "doc-1".to_string(),
            file_name: "pre-sentence-report.pdf".to_string(),
            description: Some("Pre-sentence report".to_string()),
        },
        DocumentMeta {
            id: "doc-2".to_string(),
            file_name: "licence-conditions.pdf".to_string(),
            description: Some("Licence conditions".to_string()),
        },
    ]
}

pub(super) fn input(value: Value) -> PageInput {
    PageInput::from_value(&value)
}

/// In-memory double of the remote case-management API so the engine can
/// be exercised without a network.
pub(super) struct StubCaseApi {
    pub(super) records: Mutex<HashMap<String, CaseRecord>>,
    pub(super) documents: Vec<DocumentMeta>,
    pub(super) known_person: PersonDetails,
    sequence: AtomicU64,
}

impl Default for StubCaseApi {
    fn default() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            documents: sample_documents(),
            known_person: person(),
            sequence: AtomicU64::new(1),
        }
    }
}

impl StubCaseApi {
    pub(super) fn with_record(record: CaseRecord) -> Self {
        let stub = Self::default();
        stub.records
            .lock()
            .expect("records mutex poisoned")
            .insert(record.id.0.clone(), record);
        stub
    }

    pub(super) fn stored(&self, case_id: &str) -> Option<CaseRecord> {
        self.records
            .lock()
            .expect("records mutex poisoned")
            .get(case_id)
            .cloned()
    }

    fn missing(case_id: &CaseId) -> ApiError {
        ApiError::Client(ClientError::UpstreamStatus {
            method: "GET",
            path: format!("/applications/{case_id}"),
            status: 404,
        })
    }
}

#[async_trait]
impl CaseApi for StubCaseApi {
    async fn find_person(&self, _token: &str, crn: &str) -> Result<PersonDetails, ApiError> {
        if crn == self.known_person.crn {
            Ok(self.known_person.clone())
        } else {
            Err(ApiError::PersonNotFound {
                crn: crn.to_string(),
            })
        }
    }

    async fn create_application(&self, _token: &str, crn: &str) -> Result<CaseRecord, ApiError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        let record = CaseRecord {
            id: CaseId(format!("case-{id:04}")),
            person: PersonDetails {
                crn: crn.to_string(),
                name: self.known_person.name.clone(),
            },
            data: Default::default(),
            created_at: Utc::now(),
            submitted_at: None,
        };
        self.records
            .lock()
            .expect("records mutex poisoned")
            .insert(record.id.0.clone(), record.clone());
        Ok(record)
    }

    async fn application(&self, _token: &str, case_id: &CaseId) -> Result<CaseRecord, ApiError> {
        self.stored(&case_id.0).ok_or_else(|| Self::missing(case_id))
    }

    async fn update_application(
        &self,
        _token: &str,
        record: &CaseRecord,
    ) -> Result<CaseRecord, ApiError> {
        self.records
            .lock()
            .expect("records mutex poisoned")
            .insert(record.id.0.clone(), record.clone());
        Ok(record.clone())
    }

    async fn submit_application(&self, _token: &str, case_id: &CaseId) -> Result<(), ApiError> {
        let mut guard = self.records.lock().expect("records mutex poisoned");
        let record = guard
            .get_mut(&case_id.0)
            .ok_or_else(|| Self::missing(case_id))?;
        record.submitted_at = Some(Utc::now());
        Ok(())
    }

    async fn documents(&self, _token: &str, _crn: &str) -> Result<Vec<DocumentMeta>, ApiError> {
        Ok(self.documents.clone())
    }

    async fn document_stream(
        &self,
        _token: &str,
        _crn: &str,
        document_id: &str,
    ) -> Result<PipedResponse, ApiError> {
        if !self.documents.iter().any(|doc| doc.id == document_id) {
            return Err(ApiError::Client(ClientError::UpstreamStatus {
                method: "GET",
                path: format!("/documents/{}/{document_id}", self.known_person.crn),
                status: 404,
            }));
        }

        let chunks = vec![
            Ok(Bytes::from_static(b"%PDF-1.4 ")),
            Ok(Bytes::from_static(b"stub document body")),
        ];
        Ok(PipedResponse {
            content_type: Some("application/pdf".to_string()),
            body: futures::stream::iter(chunks).boxed(),
        })
    }
}

pub(super) fn build_service() -> (
    Arc<FormService<StubCaseApi, InMemoryFlashStore>>,
    Arc<StubCaseApi>,
    Arc<InMemoryFlashStore>,
) {
    build_service_with(StubCaseApi::with_record(case_record()))
}

pub(super) fn build_service_with(
    api: StubCaseApi,
) -> (
    Arc<FormService<StubCaseApi, InMemoryFlashStore>>,
    Arc<StubCaseApi>,
    Arc<InMemoryFlashStore>,
) {
    let api = Arc::new(api);
    let flash = Arc::new(InMemoryFlashStore::default());
    let service = Arc::new(FormService::new(api.clone(), flash.clone()));
    (service, api, flash)
}

pub(super) fn sentence_type_answer(value: &str) -> Value {
    json!({ "sentenceType": value })
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
