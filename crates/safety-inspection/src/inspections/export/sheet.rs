use std::borrow::Cow;

use super::rows::checklist_rows;
use crate::inspections::catalog::{ChecklistCatalog, ChecklistCategory};
use crate::inspections::domain::{HeaderField, InspectionRecord};

const TITLE: &str = "Workplace Safety Inspection Export";
const COLUMNS: [&str; 4] = ["Item #", "Description", "Response", "Comments"];

type Row<'a> = Vec<Cow<'a, str>>;

/// Renders the spreadsheet export. Rows are joined with `\n` and carry no
/// trailing terminator.
pub fn render_csv(record: &InspectionRecord, catalog: &ChecklistCatalog) -> String {
    let mut rows: Vec<Row<'_>> = vec![
        vec![Cow::Borrowed(TITLE)],
        blank_row(),
        vec![Cow::Borrowed("Header Information")],
    ];

    for field in HeaderField::ordered() {
        rows.push(vec![
            Cow::Borrowed(field.label()),
            Cow::Borrowed(record.header.value(field)),
        ]);
    }
    rows.push(vec![
        Cow::Borrowed("Status"),
        Cow::Borrowed(record.status_label()),
    ]);

    for category in ChecklistCategory::ordered() {
        rows.push(blank_row());
        rows.push(vec![Cow::Borrowed(category.label())]);
        rows.push(COLUMNS.iter().copied().map(Cow::Borrowed).collect());

        for row in checklist_rows(record, catalog, category) {
            rows.push(vec![
                Cow::Owned(row.item_number.to_string()),
                Cow::Borrowed(row.description),
                Cow::Borrowed(row.display_response()),
                Cow::Borrowed(row.comments),
            ]);
        }
    }

    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| escape_cell(cell))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quotes a cell, doubling inner quotes, only when it contains a comma, a
/// double quote or a newline.
pub fn escape_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

fn blank_row<'a>() -> Row<'a> {
    vec![Cow::Borrowed("")]
}
