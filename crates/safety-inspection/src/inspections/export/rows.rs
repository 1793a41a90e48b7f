use crate::inspections::catalog::{ChecklistCatalog, ChecklistCategory};
use crate::inspections::domain::{ChecklistItem, InspectionRecord, ResponseOption};

pub const NOT_ANSWERED: &str = "Not answered";

/// One catalog position joined with whatever was stored for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistRow<'a> {
    pub item_number: u32,
    pub description: &'a str,
    pub response: Option<ResponseOption>,
    pub comments: &'a str,
}

impl ChecklistRow<'_> {
    pub fn display_response(&self) -> &'static str {
        self.response.map_or(NOT_ANSWERED, ResponseOption::label)
    }
}

/// Builds exactly `catalog.count(category)` rows. Stored entries are matched by
/// item number; the first entry wins when a number repeats.
pub fn checklist_rows<'a>(
    record: &'a InspectionRecord,
    catalog: &'a ChecklistCatalog,
    category: ChecklistCategory,
) -> Vec<ChecklistRow<'a>> {
    let stored = record.checklist(category);

    catalog
        .items_of(category)
        .iter()
        .zip(1u32..)
        .map(|(description, item_number)| {
            let entry = find_entry(stored, item_number);
            ChecklistRow {
                item_number,
                description,
                response: entry.and_then(|item| item.response),
                comments: entry
                    .and_then(|item| item.comments.as_deref())
                    .unwrap_or_default(),
            }
        })
        .collect()
}

fn find_entry(stored: &[ChecklistItem], item_number: u32) -> Option<&ChecklistItem> {
    stored.iter().find(|item| item.item_number == item_number)
}
