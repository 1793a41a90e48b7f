use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::catalog::ChecklistCatalog;
use super::domain::{InspectionId, InspectionRecord, InspectionSubmission, InspectionSummary};
use super::export::{render_csv, render_report, ExportDocument, ExportFormat};
use super::repository::{InspectionRepository, RepositoryError};
use super::validation::{InspectionValidator, ValidationError};

/// Service composing the validator, the repository, and the export renderers.
pub struct InspectionService<R> {
    validator: InspectionValidator,
    repository: Arc<R>,
    catalog: Arc<ChecklistCatalog>,
}

impl<R> InspectionService<R>
where
    R: InspectionRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_catalog(repository, Arc::new(ChecklistCatalog::standard()))
    }

    pub fn with_catalog(repository: Arc<R>, catalog: Arc<ChecklistCatalog>) -> Self {
        Self {
            validator: InspectionValidator,
            repository,
            catalog,
        }
    }

    pub fn catalog(&self) -> &ChecklistCatalog {
        &self.catalog
    }

    /// Validate and persist a new inspection. Nothing is written when the
    /// header is incomplete.
    pub fn submit(
        &self,
        submission: InspectionSubmission,
    ) -> Result<InspectionRecord, InspectionServiceError> {
        let inspection = self.validator.validate(submission).map_err(|err| {
            warn!(missing = ?err.missing_fields(), "inspection rejected");
            err
        })?;

        let record = self.repository.create(inspection)?;
        info!(
            id = %record.id,
            is_draft = record.is_draft,
            is_completed = record.is_completed,
            "inspection saved"
        );
        Ok(record)
    }

    pub fn get(&self, id: &InspectionId) -> Result<InspectionRecord, InspectionServiceError> {
        self.repository
            .find_by_id(id)?
            .ok_or_else(|| InspectionServiceError::NotFound(id.clone()))
    }

    pub fn list(&self) -> Result<Vec<InspectionSummary>, InspectionServiceError> {
        Ok(self.repository.find_all()?)
    }

    /// Render a stored inspection. `generated_at` only affects the report banner.
    pub fn export(
        &self,
        id: &InspectionId,
        format: ExportFormat,
        generated_at: DateTime<Utc>,
    ) -> Result<ExportDocument, InspectionServiceError> {
        let record = self.get(id)?;
        let body = match format {
            ExportFormat::Csv => render_csv(&record, &self.catalog),
            ExportFormat::Report => render_report(&record, &self.catalog, generated_at),
        };

        Ok(ExportDocument {
            format,
            filename: format.filename(&record.id),
            body,
        })
    }
}

/// Error raised by the inspection service.
#[derive(Debug, thiserror::Error)]
pub enum InspectionServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("inspection {0} not found")]
    NotFound(InspectionId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
