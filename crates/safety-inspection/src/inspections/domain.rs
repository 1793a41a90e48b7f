use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::catalog::ChecklistCategory;

/// Identifier assigned by the repository when a record is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InspectionId(pub String);

impl InspectionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InspectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Answer recorded against a single checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseOption {
    Yes,
    No,
    Na,
}

impl ResponseOption {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            "na" => Some(Self::Na),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::No => "NO",
            Self::Na => "NA",
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Na => "na",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub item_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl ChecklistItem {
    pub fn answered(item_number: u32, response: ResponseOption) -> Self {
        Self {
            item_number,
            response: Some(response),
            comments: None,
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    /// Reads one stored entry. Entries without a positive `itemNumber` cannot be
    /// placed in the catalog and are dropped; unknown responses and non-string
    /// comments are treated as absent.
    fn from_value(value: &Value) -> Option<Self> {
        let entry = value.as_object()?;
        let item_number = entry
            .get("itemNumber")
            .and_then(Value::as_u64)
            .filter(|number| *number >= 1)
            .and_then(|number| u32::try_from(number).ok())?;
        let response = entry
            .get("response")
            .and_then(Value::as_str)
            .and_then(ResponseOption::parse);
        let comments = entry
            .get("comments")
            .and_then(Value::as_str)
            .map(str::to_string);

        Some(Self {
            item_number,
            response,
            comments,
        })
    }
}

/// Normalizes an untyped checklist payload into typed entries.
pub fn normalize_checklist(value: &Value) -> Vec<ChecklistItem> {
    match value {
        Value::Array(entries) => entries.iter().filter_map(ChecklistItem::from_value).collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn deserialize_checklist<'de, D>(deserializer: D) -> Result<Vec<ChecklistItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(normalize_checklist).unwrap_or_default())
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(value)) => Some(value),
        _ => None,
    })
}

/// A `headerInfo` that is not an object carries no usable fields.
fn header_or_none<'de, D>(deserializer: D) -> Result<Option<HeaderDraft>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => HeaderDraft::deserialize(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// The seven identifying fields every inspection carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    CompletedBy,
    Building,
    Supervisor,
    Department,
    Date,
    Room,
    Phone,
}

impl HeaderField {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::CompletedBy,
            Self::Building,
            Self::Supervisor,
            Self::Department,
            Self::Date,
            Self::Room,
            Self::Phone,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CompletedBy => "Completed by",
            Self::Building => "Building",
            Self::Supervisor => "Supervisor",
            Self::Department => "Department",
            Self::Date => "Date",
            Self::Room => "Room",
            Self::Phone => "Phone",
        }
    }

    /// Field name on the wire.
    pub const fn key(self) -> &'static str {
        match self {
            Self::CompletedBy => "completedBy",
            Self::Building => "building",
            Self::Supervisor => "supervisor",
            Self::Department => "department",
            Self::Date => "date",
            Self::Room => "room",
            Self::Phone => "phone",
        }
    }
}

/// Header values exactly as the client sent them, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderDraft {
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<String>,
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl HeaderDraft {
    pub fn value(&self, field: HeaderField) -> Option<&str> {
        let value = match field {
            HeaderField::CompletedBy => &self.completed_by,
            HeaderField::Building => &self.building,
            HeaderField::Supervisor => &self.supervisor,
            HeaderField::Department => &self.department,
            HeaderField::Date => &self.date,
            HeaderField::Room => &self.room,
            HeaderField::Phone => &self.phone,
        };
        value.as_deref()
    }
}

impl From<HeaderInfo> for HeaderDraft {
    fn from(header: HeaderInfo) -> Self {
        Self {
            completed_by: Some(header.completed_by),
            building: Some(header.building),
            supervisor: Some(header.supervisor),
            department: Some(header.department),
            date: Some(header.date),
            room: Some(header.room),
            phone: Some(header.phone),
        }
    }
}

/// Validated header. Values are kept verbatim, including surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderInfo {
    pub completed_by: String,
    pub building: String,
    pub supervisor: String,
    pub department: String,
    pub date: String,
    pub room: String,
    pub phone: String,
}

impl HeaderInfo {
    pub fn value(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::CompletedBy => &self.completed_by,
            HeaderField::Building => &self.building,
            HeaderField::Supervisor => &self.supervisor,
            HeaderField::Department => &self.department,
            HeaderField::Date => &self.date,
            HeaderField::Room => &self.room,
            HeaderField::Phone => &self.phone,
        }
    }
}

/// Request body accepted when an inspection is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionSubmission {
    #[serde(default, deserialize_with = "header_or_none")]
    pub header_info: Option<HeaderDraft>,
    #[serde(default, deserialize_with = "deserialize_checklist")]
    pub general_safety: Vec<ChecklistItem>,
    #[serde(default, deserialize_with = "deserialize_checklist")]
    pub fire_safety: Vec<ChecklistItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
}

impl InspectionSubmission {
    /// Whether the client asked for a draft. Only an explicit `true` counts,
    /// even though an absent flag is stored as a draft.
    pub fn requests_draft(&self) -> bool {
        self.is_draft.unwrap_or(false)
    }
}

/// A validated inspection that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInspection {
    pub header: HeaderInfo,
    pub general_safety: Vec<ChecklistItem>,
    pub fire_safety: Vec<ChecklistItem>,
    pub is_completed: bool,
    pub is_draft: bool,
}

impl NewInspection {
    pub fn into_record(self, id: InspectionId, created_at: DateTime<Utc>) -> InspectionRecord {
        InspectionRecord {
            id,
            header: self.header,
            general_safety: self.general_safety,
            fire_safety: self.fire_safety,
            is_completed: self.is_completed,
            is_draft: self.is_draft,
            created_at,
        }
    }
}

/// Persisted inspection. Records are never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRecord {
    pub id: InspectionId,
    #[serde(flatten)]
    pub header: HeaderInfo,
    #[serde(default, deserialize_with = "deserialize_checklist")]
    pub general_safety: Vec<ChecklistItem>,
    #[serde(default, deserialize_with = "deserialize_checklist")]
    pub fire_safety: Vec<ChecklistItem>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_draft: bool,
    pub created_at: DateTime<Utc>,
}

impl InspectionRecord {
    pub fn checklist(&self, category: ChecklistCategory) -> &[ChecklistItem] {
        match category {
            ChecklistCategory::General => &self.general_safety,
            ChecklistCategory::Fire => &self.fire_safety,
        }
    }

    /// Status shown on exports. Only `is_completed` is consulted.
    pub fn status_label(&self) -> &'static str {
        if self.is_completed {
            "Completed"
        } else {
            "Draft"
        }
    }

    pub fn summary(&self) -> InspectionSummary {
        InspectionSummary {
            id: self.id.clone(),
            completed_by: self.header.completed_by.clone(),
            building: self.header.building.clone(),
            department: self.header.department.clone(),
            date: self.header.date.clone(),
            is_completed: self.is_completed,
            is_draft: self.is_draft,
            created_at: self.created_at,
        }
    }
}

/// List projection returned by `find_all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionSummary {
    pub id: InspectionId,
    pub completed_by: String,
    pub building: String,
    pub department: String,
    pub date: String,
    pub is_completed: bool,
    pub is_draft: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizer_drops_unplaceable_entries() {
        let raw = json!([
            { "itemNumber": 1, "response": "yes", "comments": "ok" },
            { "itemNumber": 0, "response": "no" },
            { "itemNumber": "3", "response": "no" },
            { "response": "na" },
            "garbage",
            { "itemNumber": 4, "response": "maybe", "comments": 12 },
            { "itemNumber": 5, "response": "NA" }
        ]);

        let items = normalize_checklist(&raw);

        assert_eq!(
            items,
            vec![
                ChecklistItem::answered(1, ResponseOption::Yes).with_comments("ok"),
                ChecklistItem {
                    item_number: 4,
                    response: None,
                    comments: None,
                },
                ChecklistItem::answered(5, ResponseOption::Na),
            ]
        );
    }

    #[test]
    fn normalizer_treats_non_arrays_as_empty() {
        assert!(normalize_checklist(&json!({ "itemNumber": 1 })).is_empty());
        assert!(normalize_checklist(&Value::Null).is_empty());
    }

    #[test]
    fn submission_defaults_missing_fields() {
        let submission: InspectionSubmission = serde_json::from_value(json!({
            "headerInfo": { "completedBy": "Dana", "phone": 5551234 },
            "generalSafety": null
        }))
        .expect("lenient submission parses");

        let header = submission.header_info.expect("header present");
        assert_eq!(header.completed_by.as_deref(), Some("Dana"));
        assert_eq!(header.phone, None);
        assert!(submission.general_safety.is_empty());
        assert!(submission.fire_safety.is_empty());
        assert_eq!(submission.is_draft, None);
    }

    #[test]
    fn non_object_header_deserializes_as_absent() {
        let submission: InspectionSubmission =
            serde_json::from_value(json!({ "headerInfo": "x" })).expect("submission parses");
        assert_eq!(submission.header_info, None);

        let submission: InspectionSubmission =
            serde_json::from_value(json!({ "headerInfo": [1, 2] })).expect("submission parses");
        assert_eq!(submission.header_info, None);
    }

    #[test]
    fn only_explicit_true_requests_a_draft() {
        let mut submission = InspectionSubmission::default();
        assert!(!submission.requests_draft());
        submission.is_draft = Some(true);
        assert!(submission.requests_draft());
    }

    #[test]
    fn record_serializes_header_fields_flat() {
        let record = InspectionRecord {
            id: InspectionId("insp-1".to_string()),
            header: HeaderInfo {
                completed_by: "Dana".to_string(),
                building: "North".to_string(),
                supervisor: "Lee".to_string(),
                department: "Facilities".to_string(),
                date: "2025-10-01".to_string(),
                room: "101".to_string(),
                phone: "555-0100".to_string(),
            },
            general_safety: vec![ChecklistItem::answered(2, ResponseOption::No)],
            fire_safety: Vec::new(),
            is_completed: false,
            is_draft: true,
            created_at: DateTime::parse_from_rfc3339("2025-10-01T12:00:00Z")
                .expect("valid timestamp")
                .with_timezone(&Utc),
        };

        let value = serde_json::to_value(&record).expect("record serializes");
        assert_eq!(value["id"], json!("insp-1"));
        assert_eq!(value["completedBy"], json!("Dana"));
        assert_eq!(value["generalSafety"], json!([{ "itemNumber": 2, "response": "no" }]));
        assert_eq!(value["isDraft"], json!(true));

        let restored: InspectionRecord = serde_json::from_value(value).expect("record parses");
        assert_eq!(restored, record);
    }
}
