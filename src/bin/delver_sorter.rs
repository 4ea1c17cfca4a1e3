//! Delver Sorter CLI
//!
//! Reads a Delver Lens collection database and writes a report of the cards
//! on incoming lists, sorted by color identity with neighboring owned cards
//! for context.
//!
//! Usage: cargo run --bin delver-sorter -- <db> [--output report.html]

use anyhow::Result;
use clap::Parser;
use delver_sorter::pipeline::{build_report, OutputFormat, ReportConfig, ReportSummary};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "delver-sorter")]
#[command(about = "Sort a Delver Lens collection and report incoming cards")]
struct Cli {
    /// Delver Lens collection database (SQLite)
    db: PathBuf,

    /// Output file (default: output.html or output.csv depending on format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Name of the list holding the owned collection
    #[arg(long, default_value = "Owned", env = "DELVER_OWNED_LIST")]
    owned_list: String,

    /// Show every card instead of only incoming cards and their neighbors
    #[arg(long)]
    all: bool,

    /// Include the primary sort key in the report
    #[arg(long)]
    show_scores: bool,
}

impl Cli {
    fn into_config(self) -> ReportConfig {
        let output = self.output.unwrap_or_else(|| match self.format {
            OutputFormat::Html => PathBuf::from("output.html"),
            OutputFormat::Csv => PathBuf::from("output.csv"),
        });

        let mut config = ReportConfig::new(self.db)
            .with_output(output, self.format)
            .with_owned_list(self.owned_list);
        if self.all {
            config = config.untrimmed();
        }
        if self.show_scores {
            config = config.with_scores();
        }
        config
    }
}

fn run(config: &ReportConfig) -> Result<ReportSummary> {
    log::debug!("Report configuration: {:?}", config);
    build_report(config, |stage| log::info!("{}", stage))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Cli::parse().into_config();

    match run(&config) {
        Ok(summary) => {
            log::debug!("Read {} rows from {}", summary.rows_read, config.db.display());
            log::info!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
