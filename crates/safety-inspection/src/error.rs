use crate::config::ConfigError;
use crate::inspections::{InspectionServiceError, RepositoryError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Inspection(InspectionServiceError),
    Usage(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Inspection(err) => write!(f, "inspection error: {}", err),
            AppError::Usage(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Inspection(err) => Some(err),
            AppError::Usage(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Inspection(InspectionServiceError::Validation(_)) | AppError::Usage(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Inspection(InspectionServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Inspection(InspectionServiceError::Repository(_))
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<InspectionServiceError> for AppError {
    fn from(value: InspectionServiceError) -> Self {
        Self::Inspection(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Inspection(InspectionServiceError::Repository(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspections::{InspectionId, ValidationError};

    #[test]
    fn inspection_errors_map_to_http_status() {
        let missing = AppError::from(InspectionServiceError::NotFound(InspectionId(
            "missing".to_string(),
        )));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let invalid = AppError::from(InspectionServiceError::Validation(
            ValidationError::FieldsMissing {
                fields: vec!["phone"],
            },
        ));
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let storage = AppError::from(RepositoryError::Unavailable("disk full".to_string()));
        assert_eq!(
            storage.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
