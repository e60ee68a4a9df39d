//! Command implementations for the heat-wave CLI.
//!
//! Provides subcommands that load land-surface temperature sources, run
//! heat-wave detection and write the results as CSV or JSON.

use clap::Subcommand;
use std::path::PathBuf;

pub mod detect;
pub mod history;
pub mod input;
pub mod output;
pub mod seasonality;
pub mod selection;

use output::OutputFormat;
use selection::SelectionArgs;

#[derive(Subcommand)]
pub enum Command {
    /// Detect heat waves and write one summary row per region
    Detect {
        /// Long table with a region column, or a directory of per-region CSV files
        /// (.csv or .csv.gz)
        #[arg(short, long)]
        input: PathBuf,

        /// Boundary attribute table; when given, every boundary region gets a row
        #[arg(short, long)]
        regions: Option<PathBuf>,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },

    /// Detect heat waves and write every event
    Events {
        /// Long table with a region column, or a directory of per-region CSV files
        #[arg(short, long)]
        input: PathBuf,

        /// Only write events of this region
        #[arg(long)]
        region: Option<String>,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },

    /// Detect heat waves and write the dashboard indicators
    Indicators {
        /// Long table with a region column, or a directory of per-region CSV files
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Write the mean temperature of each calendar month
    Seasonality {
        /// Long table with a region column, or a directory of per-region CSV files
        #[arg(short, long)]
        input: PathBuf,

        /// Only average readings of this region
        #[arg(long)]
        region: Option<String>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },

    /// Write the daily series of one region
    History {
        /// Long table with a region column, or a directory of per-region CSV files
        #[arg(short, long)]
        input: PathBuf,

        /// Region whose series is written
        #[arg(long)]
        region: String,

        /// First date (YYYY-MM-DD); defaults to the earliest reading
        #[arg(long)]
        start: Option<String>,

        /// Last date (YYYY-MM-DD); defaults to the latest reading
        #[arg(long)]
        end: Option<String>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    let mut sources = input::Sources::new();
    match command {
        Command::Detect {
            input,
            regions,
            selection,
            output,
            format,
        } => detect::run_detect(
            &mut sources,
            &input,
            regions.as_deref(),
            &selection,
            output.as_deref(),
            format,
        ),
        Command::Events {
            input,
            region,
            selection,
            output,
            format,
        } => detect::run_events(
            &mut sources,
            &input,
            region.as_deref(),
            &selection,
            output.as_deref(),
            format,
        ),
        Command::Indicators {
            input,
            selection,
            output,
            format,
        } => detect::run_indicators(
            &mut sources,
            &input,
            &selection,
            output.as_deref(),
            format,
        ),
        Command::Seasonality {
            input,
            region,
            output,
            format,
        } => seasonality::run_seasonality(
            &mut sources,
            &input,
            region.as_deref(),
            output.as_deref(),
            format,
        ),
        Command::History {
            input,
            region,
            start,
            end,
            output,
            format,
        } => history::run_history(
            &mut sources,
            &input,
            &region,
            start.as_deref(),
            end.as_deref(),
            output.as_deref(),
            format,
        ),
    }
}
