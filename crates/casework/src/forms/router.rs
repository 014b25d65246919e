use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::client::{ApiError, CaseApi};
use crate::forms::domain::{CaseId, PageInput, TaskId};
use crate::forms::flash::FlashStore;
use crate::forms::service::{
    page_path, FormService, ServiceError, StartOutcome, SubmitOutcome, UpdateOutcome,
};

/// Router builder exposing the journey's HTTP surface: render (GET) and
/// submit-and-redirect (POST) routes keyed by case id, task, and page.
pub fn journey_router<C, F>(service: Arc<FormService<C, F>>) -> Router
where
    C: CaseApi + 'static,
    F: FlashStore + 'static,
{
    Router::new()
        .route("/applications/new", get(search_handler::<C, F>))
        .route("/applications", post(start_handler::<C, F>))
        .route("/applications/:case_id/tasks", get(task_list_handler::<C, F>))
        .route(
            "/applications/:case_id/tasks/:task/pages/:page",
            get(show_page_handler::<C, F>).post(update_page_handler::<C, F>),
        )
        .route(
            "/applications/:case_id/check-your-answers",
            get(summary_handler::<C, F>),
        )
        .route(
            "/applications/:case_id/submission",
            post(submit_handler::<C, F>),
        )
        .route(
            "/applications/:case_id/documents/:document_id",
            get(document_handler::<C, F>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlashParams {
    flash: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartRequest {
    crn: String,
}

pub(crate) async fn search_handler<C, F>(
    State(service): State<Arc<FormService<C, F>>>,
    Query(params): Query<FlashParams>,
) -> Response
where
    C: CaseApi + 'static,
    F: FlashStore + 'static,
{
    Json(service.search_view(params.flash.as_deref())).into_response()
}

pub(crate) async fn start_handler<C, F>(
    State(service): State<Arc<FormService<C, F>>>,
    headers: HeaderMap,
    Json(request): Json<StartRequest>,
) -> Response
where
    C: CaseApi + 'static,
    F: FlashStore + 'static,
{
    let Some(token) = bearer_token(&headers) else {
        return missing_token();
    };

    match service.start_application(&token, &request.crn).await {
        Ok(StartOutcome::Created { case_id }) => {
            Redirect::to(&format!("/applications/{case_id}/tasks")).into_response()
        }
        Ok(StartOutcome::PersonNotFound { flash_token }) => {
            Redirect::to(&format!("/applications/new?flash={flash_token}")).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn task_list_handler<C, F>(
    State(service): State<Arc<FormService<C, F>>>,
    headers: HeaderMap,
    Path(case_id): Path<String>,
) -> Response
where
    C: CaseApi + 'static,
    F: FlashStore + 'static,
{
    let Some(token) = bearer_token(&headers) else {
        return missing_token();
    };

    match service.task_list(&token, &CaseId(case_id)).await {
        Ok(view) => Json(view).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn show_page_handler<C, F>(
    State(service): State<Arc<FormService<C, F>>>,
    headers: HeaderMap,
    Path((case_id, task, page)): Path<(String, String, String)>,
    Query(params): Query<FlashParams>,
) -> Response
where
    C: CaseApi + 'static,
    F: FlashStore + 'static,
{
    let Some(token) = bearer_token(&headers) else {
        return missing_token();
    };

    match service
        .show_page(
            &token,
            &CaseId(case_id),
            &task,
            &page,
            params.flash.as_deref(),
        )
        .await
    {
        Ok(view) => Json(view).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_page_handler<C, F>(
    State(service): State<Arc<FormService<C, F>>>,
    headers: HeaderMap,
    Path((case_id, task, page)): Path<(String, String, String)>,
    Json(input): Json<PageInput>,
) -> Response
where
    C: CaseApi + 'static,
    F: FlashStore + 'static,
{
    let Some(token) = bearer_token(&headers) else {
        return missing_token();
    };

    let case_id = CaseId(case_id);
    match service
        .update_page(&token, &case_id, &task, &page, input)
        .await
    {
        Ok(UpdateOutcome::Saved { next_page }) => {
            let target = match next_page {
                Some(next) => format!("/applications/{case_id}/tasks/{task}/pages/{next}"),
                None => format!("/applications/{case_id}/tasks"),
            };
            Redirect::to(&target).into_response()
        }
        Ok(UpdateOutcome::Invalid { flash_token }) => Redirect::to(&format!(
            "/applications/{case_id}/tasks/{task}/pages/{page}?flash={flash_token}"
        ))
        .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn summary_handler<C, F>(
    State(service): State<Arc<FormService<C, F>>>,
    headers: HeaderMap,
    Path(case_id): Path<String>,
) -> Response
where
    C: CaseApi + 'static,
    F: FlashStore + 'static,
{
    let Some(token) = bearer_token(&headers) else {
        return missing_token();
    };

    match service.summary(&token, &CaseId(case_id)).await {
        Ok(view) => Json(view).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_handler<C, F>(
    State(service): State<Arc<FormService<C, F>>>,
    headers: HeaderMap,
    Path(case_id): Path<String>,
) -> Response
where
    C: CaseApi + 'static,
    F: FlashStore + 'static,
{
    let Some(token) = bearer_token(&headers) else {
        return missing_token();
    };

    let case_id = CaseId(case_id);
    match service.submit(&token, &case_id).await {
        Ok(SubmitOutcome::Submitted) => {
            Redirect::to(&format!("/applications/{case_id}/tasks")).into_response()
        }
        Ok(SubmitOutcome::NotConfirmed { flash_token }) => {
            let review = page_path(&case_id, TaskId::CheckYourAnswers, "review");
            Redirect::to(&format!("{review}?flash={flash_token}")).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn document_handler<C, F>(
    State(service): State<Arc<FormService<C, F>>>,
    headers: HeaderMap,
    Path((case_id, document_id)): Path<(String, String)>,
) -> Response
where
    C: CaseApi + 'static,
    F: FlashStore + 'static,
{
    let Some(token) = bearer_token(&headers) else {
        return missing_token();
    };

    match service
        .document(&token, &CaseId(case_id), &document_id)
        .await
    {
        Ok(piped) => {
            let content_type = piped
                .content_type
                .as_deref()
                .and_then(|value| HeaderValue::from_str(value).ok())
                .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));

            let mut response = Body::from_stream(piped.body).into_response();
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, content_type);
            response
        }
        Err(err) => error_response(err),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

fn missing_token() -> Response {
    let payload = json!({ "error": "missing bearer token" });
    (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Flow(_) => StatusCode::NOT_FOUND,
        ServiceError::AlreadySubmitted(_) => StatusCode::CONFLICT,
        ServiceError::Api(ApiError::PersonNotFound { .. }) => StatusCode::NOT_FOUND,
        ServiceError::Api(_) => StatusCode::BAD_GATEWAY,
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
