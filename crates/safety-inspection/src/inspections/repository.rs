use super::domain::{InspectionId, InspectionRecord, InspectionSummary, NewInspection};

/// Storage abstraction so the service can be exercised in isolation. Records
/// are append-only: there is no update or delete.
pub trait InspectionRepository: Send + Sync {
    /// Persists the inspection, assigning its id and creation timestamp.
    fn create(&self, inspection: NewInspection) -> Result<InspectionRecord, RepositoryError>;
    fn find_by_id(&self, id: &InspectionId) -> Result<Option<InspectionRecord>, RepositoryError>;
    /// Summaries ordered by creation time, most recent first.
    fn find_all(&self) -> Result<Vec<InspectionSummary>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("stored inspections could not be read: {0}")]
    Corrupt(String),
}
