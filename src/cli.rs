use crate::filter::FilterSelection;
use crate::models::{
    AcademicYear, Choice, ClassLevel, Gender, Section, Selection, Subject, Term,
};
use crate::stats::HeatmapMode;
use clap::{Parser, Subcommand, ValueEnum};

fn parse_selection<T: Choice>(s: &str) -> Result<Selection<T>, String> {
    s.parse::<Selection<T>>().map_err(|_| {
        let options: Vec<&str> = T::VARIANTS.iter().map(|v| v.label()).collect();
        format!("expected All or one of: {}", options.join(", "))
    })
}

#[derive(Parser, Debug)]
#[command(name = "student-dashboard")]
#[command(about = "Explore synthetic student records in a terminal dashboard")]
#[command(version)]
pub struct Cli {
    /// Seed for the record generator (random when omitted)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// How heatmap cells are filled
    #[arg(long, value_enum, default_value = "class-average", global = true)]
    pub heatmap: HeatmapMode,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch interactive dashboard (default)
    #[command(visible_aliases = &["dash", "d"])]
    Dashboard {
        /// Directory export writes reports into [default: Downloads, else .]
        #[arg(short, long)]
        output_dir: Option<String>,
    },

    /// Print dashboard statistics for a filtered view
    #[command(visible_alias = "stats")]
    Show(ShowArgs),

    /// Write the filtered records to a CSV report
    Export(ExportArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct FilterArgs {
    /// Academic year, e.g. 2024-25
    #[arg(long, default_value = "All", value_parser = parse_selection::<AcademicYear>)]
    pub year: Selection<AcademicYear>,

    /// Examination term (accepted, does not narrow results)
    #[arg(long, default_value = "All", value_parser = parse_selection::<Term>)]
    pub term: Selection<Term>,

    /// Class: 10th, 11th or 12th
    #[arg(long = "class", default_value = "All", value_parser = parse_selection::<ClassLevel>)]
    pub class: Selection<ClassLevel>,

    /// Section: A to D
    #[arg(long, default_value = "All", value_parser = parse_selection::<Section>)]
    pub section: Selection<Section>,

    /// Subject (accepted, does not narrow results)
    #[arg(long, default_value = "All", value_parser = parse_selection::<Subject>)]
    pub subject: Selection<Subject>,

    /// Gender: Male or Female
    #[arg(long, default_value = "All", value_parser = parse_selection::<Gender>)]
    pub gender: Selection<Gender>,
}

impl FilterArgs {
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            year: self.year,
            term: self.term,
            class: self.class,
            section: self.section,
            subject: self.subject,
            gender: self.gender,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Include top students, fee tiers and the heatmap
    #[arg(short, long)]
    pub detailed: bool,

    /// Show summary statistics
    #[arg(long)]
    pub summary: bool,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Directory to write the report into [default: Downloads, else .]
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

#[derive(Debug, Clone, ValueEnum, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["student-dashboard"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.heatmap, HeatmapMode::ClassAverage);
        assert!(cli.seed.is_none());
    }

    #[test]
    fn test_show_filters_parse() {
        let cli = Cli::try_parse_from([
            "student-dashboard",
            "--seed",
            "5",
            "show",
            "--class",
            "10th",
            "--gender",
            "female",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(5));
        match cli.command {
            Some(Commands::Show(args)) => {
                let s = args.filters.selection();
                assert_eq!(s.class, Selection::Only(ClassLevel::Tenth));
                assert_eq!(s.gender, Selection::Only(Gender::Female));
                assert_eq!(s.year, Selection::All);
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("Expected Show, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_filter_value() {
        let result = Cli::try_parse_from(["student-dashboard", "export", "--section", "Z"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_heatmap_mode_flag() {
        let cli = Cli::try_parse_from(["student-dashboard", "--heatmap", "placeholder", "dash"]).unwrap();
        assert_eq!(cli.heatmap, HeatmapMode::Placeholder);
        assert!(matches!(cli.command, Some(Commands::Dashboard { .. })));
    }
}
