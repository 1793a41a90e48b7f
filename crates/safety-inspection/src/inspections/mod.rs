//! Inspection records: checklist catalog, header validation, storage contract,
//! and the CSV / printable report exports.

pub mod catalog;
pub mod domain;
pub mod export;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{ChecklistCatalog, ChecklistCategory};
pub use domain::{
    normalize_checklist, ChecklistItem, HeaderDraft, HeaderField, HeaderInfo, InspectionId,
    InspectionRecord, InspectionSubmission, InspectionSummary, NewInspection, ResponseOption,
};
pub use export::{render_csv, render_report, ExportDocument, ExportFormat};
pub use repository::{InspectionRepository, RepositoryError};
pub use router::inspection_router;
pub use service::{InspectionService, InspectionServiceError};
pub use validation::{InspectionValidator, ValidationError};
