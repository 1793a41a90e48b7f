use crate::export::{run_catalog, run_export, ExportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use safety_inspection::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Workplace Safety Inspections",
    about = "Record workplace safety inspections and export them as CSV or printable reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the general and fire safety checklists
    Catalog,
    /// Render a stored inspection as CSV or a printable report
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Persist inspections to this JSON file instead of memory
    #[arg(long)]
    pub(crate) store: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Catalog => {
            run_catalog();
            Ok(())
        }
        Command::Export(args) => run_export(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safety_inspection::inspections::ExportFormat;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["safety-inspection-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn export_arguments_parse() {
        let cli = Cli::try_parse_from([
            "safety-inspection-api",
            "export",
            "--store",
            "inspections.json",
            "--id",
            "abc",
            "--format",
            "report",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Export(args)) => {
                assert_eq!(args.id, "abc");
                assert_eq!(args.format, ExportFormat::Report);
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_export_format_is_rejected() {
        let result = Cli::try_parse_from([
            "safety-inspection-api",
            "export",
            "--store",
            "inspections.json",
            "--id",
            "abc",
            "--format",
            "xlsx",
        ]);
        assert!(result.is_err());
    }
}
