use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{InspectionId, InspectionSubmission};
use super::export::ExportFormat;
use super::repository::InspectionRepository;
use super::service::{InspectionServiceError, InspectionService};

/// `?id=` selector shared by the read and export endpoints. An empty value is
/// treated as absent.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct InspectionQuery {
    #[serde(default)]
    pub(crate) id: Option<String>,
}

impl InspectionQuery {
    fn inspection_id(&self) -> Option<InspectionId> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| InspectionId(id.to_string()))
    }
}

/// Router builder exposing the inspection and export endpoints.
pub fn inspection_router<R>(service: Arc<InspectionService<R>>) -> Router
where
    R: InspectionRepository + 'static,
{
    Router::new()
        .route(
            "/inspections",
            get(fetch_handler::<R>).post(submit_handler::<R>),
        )
        .route("/export/sheets", get(export_csv_handler::<R>))
        .route("/export/pdf", get(export_report_handler::<R>))
        .with_state(service)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Accepts the body regardless of its declared content type. Anything that is
/// not a readable submission is an unexpected failure, not a validation error.
pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<InspectionService<R>>>,
    body: Bytes,
) -> Response
where
    R: InspectionRepository + 'static,
{
    let submission: InspectionSubmission = match serde_json::from_slice(&body) {
        Ok(submission) => submission,
        Err(err) => {
            error!(error = %err, "error reading inspection payload");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save inspection");
        }
    };

    let message = if submission.requests_draft() {
        "Draft saved successfully"
    } else {
        "Inspection completed successfully"
    };

    match service.submit(submission) {
        Ok(record) => {
            let payload = json!({
                "success": true,
                "id": record.id,
                "message": message,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(InspectionServiceError::Validation(err)) => {
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(other) => {
            error!(error = %other, "error saving inspection");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save inspection")
        }
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<InspectionService<R>>>,
    Query(query): Query<InspectionQuery>,
) -> Response
where
    R: InspectionRepository + 'static,
{
    let Some(id) = query.inspection_id() else {
        return match service.list() {
            Ok(summaries) => (StatusCode::OK, Json(summaries)).into_response(),
            Err(err) => {
                error!(error = %err, "error fetching inspections");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch inspections",
                )
            }
        };
    };

    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(InspectionServiceError::NotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, "Inspection not found")
        }
        Err(err) => {
            error!(error = %err, %id, "error fetching inspection");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch inspections",
            )
        }
    }
}

pub(crate) async fn export_csv_handler<R>(
    State(service): State<Arc<InspectionService<R>>>,
    Query(query): Query<InspectionQuery>,
) -> Response
where
    R: InspectionRepository + 'static,
{
    export_response(&service, &query, ExportFormat::Csv)
}

pub(crate) async fn export_report_handler<R>(
    State(service): State<Arc<InspectionService<R>>>,
    Query(query): Query<InspectionQuery>,
) -> Response
where
    R: InspectionRepository + 'static,
{
    export_response(&service, &query, ExportFormat::Report)
}

fn export_response<R>(
    service: &InspectionService<R>,
    query: &InspectionQuery,
    format: ExportFormat,
) -> Response
where
    R: InspectionRepository + 'static,
{
    let Some(id) = query.inspection_id() else {
        return error_response(StatusCode::BAD_REQUEST, "Inspection ID is required");
    };

    match service.export(&id, format, Utc::now()) {
        Ok(document) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, document.content_type()),
                (header::CONTENT_DISPOSITION, document.content_disposition()),
            ],
            document.body,
        )
            .into_response(),
        Err(InspectionServiceError::NotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, "Inspection not found")
        }
        Err(err) => {
            error!(error = %err, %id, ?format, "error generating export");
            let message = match format {
                ExportFormat::Csv => "Failed to generate CSV",
                ExportFormat::Report => "Failed to generate report",
            };
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}
