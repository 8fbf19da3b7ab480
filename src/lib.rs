pub mod cli;
pub mod controller;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod filter;
pub mod formatters;
pub mod generator;
pub mod models;
pub mod stats;
pub mod table;

use anyhow::{Context, Result};
use chrono::Local;
use cli::{Commands, ExportArgs, OutputFormat, ShowArgs};
use colored::Colorize;
use controller::Dashboard;
use error::DashboardError;
use generator::RecordGenerator;
use log::{debug, info};
use stats::HeatmapMode;
use std::path::{Path, PathBuf};

pub fn run(cli: cli::Cli) -> Result<()> {
    let generator = match cli.seed {
        Some(seed) => RecordGenerator::new(seed),
        None => RecordGenerator::from_entropy(),
    };
    info!("Generator seed: {}", generator.seed());

    match cli.command {
        Some(Commands::Show(args)) => show(generator, cli.heatmap, args),
        Some(Commands::Export(args)) => export(generator, cli.heatmap, args),
        Some(Commands::Dashboard { output_dir }) => {
            let dir = resolve_output_dir(output_dir.as_deref())?;
            dashboard::run_dashboard(generator, cli.heatmap, dir)
        }
        None => {
            let dir = resolve_output_dir(None)?;
            dashboard::run_dashboard(generator, cli.heatmap, dir)
        }
    }
}

/// Expand `~` in a user-supplied directory, or fall back to the user's
/// download directory, then the working directory.
pub fn resolve_output_dir(dir: Option<&str>) -> Result<PathBuf> {
    let path = match dir {
        Some(d) => PathBuf::from(shellexpand::tilde(d).into_owned()),
        None => dirs::download_dir()
            .filter(|p| p.is_dir())
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    if !path.is_dir() {
        anyhow::bail!("Output directory not found: {}", path.display());
    }
    debug!("Reports will be written to {}", path.display());
    Ok(path)
}

fn show(generator: RecordGenerator, heatmap: HeatmapMode, args: ShowArgs) -> Result<()> {
    let mut dashboard = Dashboard::new(generator, heatmap);
    dashboard.set_filters(args.filters.selection());
    dashboard.apply_filters();
    let view = dashboard.view();

    if view.kpis.is_empty() {
        println!("No students match the selected filters.");
    }

    match args.format {
        OutputFormat::Table => {
            println!("{}", formatters::format_summary_table(view, args.detailed));
        }
        OutputFormat::Json => {
            println!("{}", formatters::format_summary_json(view)?);
        }
        OutputFormat::Csv => match export::to_csv_string(dashboard.export_set()) {
            Ok(csv) => print!("{}", csv),
            Err(DashboardError::EmptyExport) => {
                eprintln!("{}", DashboardError::EmptyExport.to_string().yellow());
            }
            Err(e) => return Err(e.into()),
        },
        OutputFormat::Markdown => {
            println!("{}", formatters::format_summary_markdown(view, args.detailed));
        }
    }

    if args.summary {
        formatters::print_summary(view);
    }

    Ok(())
}

fn export(generator: RecordGenerator, heatmap: HeatmapMode, args: ExportArgs) -> Result<()> {
    let dir = resolve_output_dir(args.output_dir.as_deref())?;
    let mut dashboard = Dashboard::new(generator, heatmap);
    dashboard.set_filters(args.filters.selection());
    dashboard.apply_filters();

    write_export(&dashboard, &dir)
}

fn write_export(dashboard: &Dashboard, dir: &Path) -> Result<()> {
    match dashboard.export_to(dir, Local::now().date_naive()) {
        Ok(path) => {
            println!(
                "Exported {} records to {}",
                dashboard.export_set().len(),
                path.display()
            );
            Ok(())
        }
        Err(DashboardError::EmptyExport) => {
            eprintln!("{}", DashboardError::EmptyExport.to_string().yellow());
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to export to {}", dir.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_string_lossy().to_string();
        assert_eq!(resolve_output_dir(Some(&dir)).unwrap(), temp_dir.path());

        let missing = temp_dir.path().join("missing").to_string_lossy().to_string();
        assert!(resolve_output_dir(Some(&missing)).is_err());
    }

    #[test]
    fn test_export_command_writes_report() {
        let temp_dir = TempDir::new().unwrap();
        let mut dashboard = Dashboard::new(RecordGenerator::new(12), HeatmapMode::ClassAverage);
        dashboard.apply_filters();
        write_export(&dashboard, temp_dir.path()).unwrap();

        let files: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with(export::REPORT_PREFIX));
        assert!(files[0].ends_with(".csv"));
    }
}
