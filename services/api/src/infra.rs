use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use safety_inspection::inspections::{
    InspectionId, InspectionRecord, InspectionRepository, InspectionSummary, NewInspection,
    RepositoryError,
};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn next_inspection_id() -> InspectionId {
    InspectionId(Uuid::new_v4().simple().to_string())
}

/// Newest first. Records are kept in insertion order, so walking them in
/// reverse before the stable sort breaks timestamp ties in favor of the later
/// insert.
fn summaries_newest_first(records: &[InspectionRecord]) -> Vec<InspectionSummary> {
    let mut summaries: Vec<InspectionSummary> =
        records.iter().rev().map(InspectionRecord::summary).collect();
    summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    summaries
}

fn lock_records(
    records: &Mutex<Vec<InspectionRecord>>,
) -> Result<MutexGuard<'_, Vec<InspectionRecord>>, RepositoryError> {
    records
        .lock()
        .map_err(|_| RepositoryError::Unavailable("inspection store lock poisoned".to_string()))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryInspectionRepository {
    records: Arc<Mutex<Vec<InspectionRecord>>>,
}

impl InspectionRepository for InMemoryInspectionRepository {
    fn create(&self, inspection: NewInspection) -> Result<InspectionRecord, RepositoryError> {
        let mut guard = lock_records(&self.records)?;
        let record = inspection.into_record(next_inspection_id(), Utc::now());
        guard.push(record.clone());
        Ok(record)
    }

    fn find_by_id(&self, id: &InspectionId) -> Result<Option<InspectionRecord>, RepositoryError> {
        let guard = lock_records(&self.records)?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn find_all(&self) -> Result<Vec<InspectionSummary>, RepositoryError> {
        let guard = lock_records(&self.records)?;
        Ok(summaries_newest_first(&guard))
    }
}

/// JSON document on disk holding every record. The file is rewritten through a
/// temporary sibling and a rename, so a failed write leaves the previous
/// contents in place and the new record is not kept.
pub(crate) struct FileInspectionRepository {
    path: PathBuf,
    records: Mutex<Vec<InspectionRecord>>,
}

impl FileInspectionRepository {
    pub(crate) fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let records = load_records(&path)?;
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, records: &[InspectionRecord]) -> Result<(), RepositoryError> {
        let encoded = serde_json::to_vec_pretty(records)
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, encoded)
            .and_then(|_| fs::rename(&staging, &self.path))
            .map_err(|err| {
                RepositoryError::Unavailable(format!(
                    "failed to write {}: {err}",
                    self.path.display()
                ))
            })
    }
}

impl InspectionRepository for FileInspectionRepository {
    fn create(&self, inspection: NewInspection) -> Result<InspectionRecord, RepositoryError> {
        let mut guard = lock_records(&self.records)?;
        let record = inspection.into_record(next_inspection_id(), Utc::now());

        let mut next = guard.clone();
        next.push(record.clone());
        self.persist(&next)?;

        *guard = next;
        Ok(record)
    }

    fn find_by_id(&self, id: &InspectionId) -> Result<Option<InspectionRecord>, RepositoryError> {
        let guard = lock_records(&self.records)?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn find_all(&self) -> Result<Vec<InspectionSummary>, RepositoryError> {
        let guard = lock_records(&self.records)?;
        Ok(summaries_newest_first(&guard))
    }
}

fn load_records(path: &Path) -> Result<Vec<InspectionRecord>, RepositoryError> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(RepositoryError::Unavailable(format!(
                "failed to read {}: {err}",
                path.display()
            )))
        }
    };

    let rows: Vec<Value> = serde_json::from_slice(&raw)
        .map_err(|err| RepositoryError::Corrupt(format!("{}: {err}", path.display())))?;

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            serde_json::from_value(row).map_err(|err| {
                RepositoryError::Corrupt(format!("{} entry {index}: {err}", path.display()))
            })
        })
        .collect()
}
