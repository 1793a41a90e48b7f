use crate::infra::FileInspectionRepository;
use chrono::Utc;
use clap::Args;
use safety_inspection::error::AppError;
use safety_inspection::inspections::{
    ChecklistCatalog, ChecklistCategory, ExportFormat, InspectionId, InspectionService,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// JSON store written by `serve --store`
    #[arg(long)]
    pub(crate) store: PathBuf,
    /// Identifier of the inspection to render
    #[arg(long)]
    pub(crate) id: String,
    /// Output format: csv or report
    #[arg(long, default_value = "csv", value_parser = parse_format)]
    pub(crate) format: ExportFormat,
    /// Write the document to this path instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

fn parse_format(raw: &str) -> Result<ExportFormat, String> {
    ExportFormat::parse(raw).ok_or_else(|| format!("unknown export format '{raw}' (csv, report)"))
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs {
        store,
        id,
        format,
        output,
    } = args;

    if !store.is_file() {
        return Err(AppError::Usage(format!(
            "inspection store {} does not exist",
            store.display()
        )));
    }

    let repository = Arc::new(FileInspectionRepository::open(store)?);
    let service = InspectionService::new(repository);
    let document = service.export(&InspectionId(id), format, Utc::now())?;

    match output {
        Some(path) => {
            std::fs::write(&path, &document.body)?;
            println!("Wrote {} to {}", document.filename, path.display());
        }
        None => println!("{}", document.body),
    }

    Ok(())
}

pub(crate) fn run_catalog() {
    print!("{}", render_catalog(&ChecklistCatalog::standard()));
}

fn render_catalog(catalog: &ChecklistCatalog) -> String {
    let mut out = String::new();
    for category in ChecklistCategory::ordered() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(category.label());
        out.push('\n');
        for (index, description) in catalog.items_of(category).iter().enumerate() {
            out.push_str(&format!("{:>3}. {}\n", index + 1, description));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use safety_inspection::inspections::{
        HeaderInfo, InspectionRepository, NewInspection,
    };

    #[test]
    fn catalog_listing_numbers_items() {
        let listing = render_catalog(&ChecklistCatalog::new(["Exits clear"], ["Alarm tested"]));
        assert_eq!(
            listing,
            "General Safety\n  1. Exits clear\n\nFire Safety\n  1. Alarm tested\n"
        );
    }

    #[test]
    fn export_writes_requested_document() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = dir.path().join("inspections.json");
        let repository = FileInspectionRepository::open(&store).expect("opens store");
        let record = repository
            .create(NewInspection {
                header: HeaderInfo {
                    completed_by: "Dana".to_string(),
                    building: "Science Hall".to_string(),
                    supervisor: "Lee Moreno".to_string(),
                    department: "Chemistry".to_string(),
                    date: "2025-10-01".to_string(),
                    room: "B-114".to_string(),
                    phone: "515-555-0142".to_string(),
                },
                general_safety: Vec::new(),
                fire_safety: Vec::new(),
                is_completed: true,
                is_draft: false,
            })
            .expect("record stored");

        let output = dir.path().join("out.csv");
        run_export(ExportArgs {
            store: store.clone(),
            id: record.id.to_string(),
            format: ExportFormat::Csv,
            output: Some(output.clone()),
        })
        .expect("export succeeds");

        let written = std::fs::read_to_string(&output).expect("output written");
        assert!(written.starts_with("Workplace Safety Inspection Export\n"));
        assert!(written.contains("Status,Completed"));
    }

    #[test]
    fn export_requires_existing_store() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = run_export(ExportArgs {
            store: dir.path().join("missing.json"),
            id: "abc".to_string(),
            format: ExportFormat::Report,
            output: None,
        })
        .expect_err("missing store rejected");

        assert!(matches!(err, AppError::Usage(_)));
    }
}
