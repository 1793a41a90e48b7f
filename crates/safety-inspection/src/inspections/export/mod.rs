//! Deterministic projections of a stored inspection into downloadable text.
//!
//! Both formats walk the catalog rather than the stored arrays, so every
//! catalog item yields exactly one row in ascending item-number order no matter
//! how sparse or shuffled the stored checklist is.

mod report;
mod rows;
mod sheet;

pub use report::render_report;
pub use rows::{checklist_rows, ChecklistRow, NOT_ANSWERED};
pub use sheet::{escape_cell, render_csv};

use super::domain::InspectionId;

/// Supported download formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Report,
}

impl ExportFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "csv" | "sheets" => Some(Self::Csv),
            "report" | "html" | "pdf" => Some(Self::Report),
            _ => None,
        }
    }

    pub fn mime(self) -> mime::Mime {
        match self {
            Self::Csv => mime::TEXT_CSV,
            Self::Report => mime::TEXT_HTML,
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Report => "html",
        }
    }

    pub fn filename(self, id: &InspectionId) -> String {
        format!("safety_inspection_{}.{}", id, self.extension())
    }
}

/// Rendered export ready to hand to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub format: ExportFormat,
    pub filename: String,
    pub body: String,
}

impl ExportDocument {
    pub fn content_type(&self) -> String {
        self.format.mime().to_string()
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}
