use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "a11y-report")]
#[command(about = "Aggregate accessibility test results into a consolidated report", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the consolidated report from page results and test runs
    Generate {
        /// Page-result documents (JSON array or JSON Lines)
        #[arg(long)]
        pages: PathBuf,

        /// Test-run documents carrying documentation (JSON array or JSON Lines)
        #[arg(long)]
        runs: Option<PathBuf>,

        /// Only include pages and runs with this id (repeatable)
        #[arg(long = "run-id")]
        run_id: Vec<String>,

        /// Output format (defaults to the config file's, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file (defaults to searching for .a11y-report.toml)
        #[arg(short, long, env = "A11Y_REPORT_CONFIG")]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Print the field paths observed for each test
    Schema {
        /// Page-result documents (JSON array or JSON Lines)
        #[arg(long)]
        pages: PathBuf,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Generate { verbosity, .. } | Commands::Schema { verbosity, .. } => *verbosity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::output::OutputFormat::Terminal,
        }
    }
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
