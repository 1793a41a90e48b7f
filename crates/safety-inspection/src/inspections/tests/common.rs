use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::inspections::domain::{
    ChecklistItem, HeaderDraft, HeaderInfo, InspectionId, InspectionRecord, InspectionSubmission,
    InspectionSummary, NewInspection, ResponseOption,
};
use crate::inspections::repository::{InspectionRepository, RepositoryError};
use crate::inspections::{inspection_router, InspectionService};

pub(super) fn header() -> HeaderInfo {
    HeaderInfo {
        completed_by: "Dana Whitfield".to_string(),
        building: "Science Hall".to_string(),
        supervisor: "Lee Moreno".to_string(),
        department: "Chemistry".to_string(),
        date: "2025-10-01".to_string(),
        room: "B-114".to_string(),
        phone: "515-555-0142".to_string(),
    }
}

pub(super) fn submission() -> InspectionSubmission {
    InspectionSubmission {
        header_info: Some(HeaderDraft::from(header())),
        general_safety: vec![
            ChecklistItem::answered(1, ResponseOption::Yes).with_comments("Checked, OK"),
            ChecklistItem::answered(2, ResponseOption::No),
        ],
        fire_safety: vec![ChecklistItem::answered(5, ResponseOption::Na)],
        is_completed: Some(true),
        is_draft: Some(false),
    }
}

pub(super) fn draft_submission() -> InspectionSubmission {
    InspectionSubmission {
        header_info: Some(HeaderDraft::from(header())),
        general_safety: Vec::new(),
        fire_safety: Vec::new(),
        is_completed: Some(false),
        is_draft: Some(true),
    }
}

pub(super) fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 15, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn record_with(
    general_safety: Vec<ChecklistItem>,
    fire_safety: Vec<ChecklistItem>,
) -> InspectionRecord {
    InspectionRecord {
        id: InspectionId("insp-test".to_string()),
        header: header(),
        general_safety,
        fire_safety,
        is_completed: false,
        is_draft: true,
        created_at: created_at(),
    }
}

/// Append-only store that stamps each record one minute after the previous one.
#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<InspectionRecord>>>,
}

impl InspectionRepository for MemoryRepository {
    fn create(&self, inspection: NewInspection) -> Result<InspectionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let sequence = guard.len() + 1;
        let record = inspection.into_record(
            InspectionId(format!("insp-{sequence:06}")),
            created_at() + Duration::minutes(sequence as i64),
        );
        guard.push(record.clone());
        Ok(record)
    }

    fn find_by_id(&self, id: &InspectionId) -> Result<Option<InspectionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn find_all(&self) -> Result<Vec<InspectionSummary>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut summaries: Vec<InspectionSummary> =
            guard.iter().map(InspectionRecord::summary).collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }
}

pub(super) struct UnavailableRepository;

impl InspectionRepository for UnavailableRepository {
    fn create(&self, _inspection: NewInspection) -> Result<InspectionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_id(&self, _id: &InspectionId) -> Result<Option<InspectionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_all(&self) -> Result<Vec<InspectionSummary>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (InspectionService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = InspectionService::new(repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(service: InspectionService<MemoryRepository>) -> axum::Router {
    inspection_router(Arc::new(service))
}

pub(super) async fn read_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_str(&read_body(response).await).expect("json payload")
}
