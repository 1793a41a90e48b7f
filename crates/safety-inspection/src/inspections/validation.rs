use super::domain::{HeaderDraft, HeaderField, HeaderInfo, InspectionSubmission, NewInspection};

/// Rejections raised before anything reaches the repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("All header fields are required")]
    FieldsMissing { fields: Vec<&'static str> },
}

impl ValidationError {
    /// Wire names of the offending fields, for logging.
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::FieldsMissing { fields } => fields,
        }
    }
}

/// Header completeness check shared by drafts and completed inspections.
#[derive(Debug, Clone, Copy, Default)]
pub struct InspectionValidator;

impl InspectionValidator {
    pub fn validate_header(&self, draft: &HeaderDraft) -> Result<HeaderInfo, ValidationError> {
        let fields: Vec<&'static str> = HeaderField::ordered()
            .into_iter()
            .filter(|field| is_blank(draft.value(*field)))
            .map(HeaderField::key)
            .collect();

        if !fields.is_empty() {
            return Err(ValidationError::FieldsMissing { fields });
        }

        Ok(HeaderInfo {
            completed_by: required(&draft.completed_by),
            building: required(&draft.building),
            supervisor: required(&draft.supervisor),
            department: required(&draft.department),
            date: required(&draft.date),
            room: required(&draft.room),
            phone: required(&draft.phone),
        })
    }

    /// Turns a client submission into a record ready for persistence. Checklist
    /// coverage is not checked, so a draft or completed inspection may carry no
    /// responses at all.
    pub fn validate(&self, submission: InspectionSubmission) -> Result<NewInspection, ValidationError> {
        let InspectionSubmission {
            header_info,
            general_safety,
            fire_safety,
            is_completed,
            is_draft,
        } = submission;

        let header = self.validate_header(&header_info.unwrap_or_default())?;

        Ok(NewInspection {
            header,
            general_safety,
            fire_safety,
            is_completed: is_completed.unwrap_or(false),
            is_draft: is_draft.unwrap_or(true),
        })
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |raw| raw.trim().is_empty())
}

fn required(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
