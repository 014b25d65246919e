use async_trait::async_trait;
use serde_json::json;

use crate::config::CaseApiConfig;
use crate::forms::domain::{CaseId, CaseRecord, DocumentMeta, PersonDetails};

use super::rest::{ClientError, PipedResponse, RestClient};

/// Failures surfaced by the remote case-management API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no person found for CRN {crn}")]
    PersonNotFound { crn: String },
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("could not decode {resource} payload: {detail}")]
    Payload { resource: &'static str, detail: String },
}

impl ApiError {
    fn payload(resource: &'static str, err: serde_json::Error) -> Self {
        Self::Payload {
            resource,
            detail: err.to_string(),
        }
    }
}

/// The remote API surface this service consumes. Abstracted so the form
/// engine and its tests can run against an in-memory double.
#[async_trait]
pub trait CaseApi: Send + Sync {
    async fn find_person(&self, token: &str, crn: &str) -> Result<PersonDetails, ApiError>;

    async fn create_application(&self, token: &str, crn: &str) -> Result<CaseRecord, ApiError>;

    async fn application(&self, token: &str, case_id: &CaseId) -> Result<CaseRecord, ApiError>;

    async fn update_application(
        &self,
        token: &str,
        record: &CaseRecord,
    ) -> Result<CaseRecord, ApiError>;

    async fn submit_application(&self, token: &str, case_id: &CaseId) -> Result<(), ApiError>;

    async fn documents(&self, token: &str, crn: &str) -> Result<Vec<DocumentMeta>, ApiError>;

    async fn document_stream(
        &self,
        token: &str,
        crn: &str,
        document_id: &str,
    ) -> Result<PipedResponse, ApiError>;
}

/// HTTP implementation over [`RestClient`].
#[derive(Debug, Clone)]
pub struct HttpCaseApi {
    rest: RestClient,
}

impl HttpCaseApi {
    pub fn new(config: &CaseApiConfig) -> Result<Self, ClientError> {
        Ok(Self {
            rest: RestClient::new(config)?,
        })
    }
}

#[async_trait]
impl CaseApi for HttpCaseApi {
    async fn find_person(&self, token: &str, crn: &str) -> Result<PersonDetails, ApiError> {
        let path = format!("/people/search?crn={crn}");
        match self.rest.get(&path, token).await {
            Ok(value) => {
                serde_json::from_value(value).map_err(|err| ApiError::payload("person", err))
            }
            Err(ClientError::UpstreamStatus { status: 404, .. }) => Err(ApiError::PersonNotFound {
                crn: crn.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    async fn create_application(&self, token: &str, crn: &str) -> Result<CaseRecord, ApiError> {
        let value = self
            .rest
            .post("/applications", token, &json!({ "crn": crn }))
            .await?;
        serde_json::from_value(value).map_err(|err| ApiError::payload("application", err))
    }

    async fn application(&self, token: &str, case_id: &CaseId) -> Result<CaseRecord, ApiError> {
        let value = self
            .rest
            .get(&format!("/applications/{case_id}"), token)
            .await?;
        serde_json::from_value(value).map_err(|err| ApiError::payload("application", err))
    }

    async fn update_application(
        &self,
        token: &str,
        record: &CaseRecord,
    ) -> Result<CaseRecord, ApiError> {
        let body = json!({ "data": record.data });
        let value = self
            .rest
            .put(&format!("/applications/{}", record.id), token, &body)
            .await?;
        serde_json::from_value(value).map_err(|err| ApiError::payload("application", err))
    }

    async fn submit_application(&self, token: &str, case_id: &CaseId) -> Result<(), ApiError> {
        self.rest
            .post(
                &format!("/applications/{case_id}/submission"),
                token,
                &json!({}),
            )
            .await?;
        Ok(())
    }

    async fn documents(&self, token: &str, crn: &str) -> Result<Vec<DocumentMeta>, ApiError> {
        let value = self.rest.get(&format!("/documents/{crn}"), token).await?;
        serde_json::from_value(value).map_err(|err| ApiError::payload("documents", err))
    }

    async fn document_stream(
        &self,
        token: &str,
        crn: &str,
        document_id: &str,
    ) -> Result<PipedResponse, ApiError> {
        let piped = self
            .rest
            .pipe(&format!("/documents/{crn}/{document_id}"), token)
            .await?;
        Ok(piped)
    }
}
