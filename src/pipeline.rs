//! Report pipeline used by the CLI.
//!
//! Reads the collection, builds cards, sorts them, trims to the changed
//! cards and writes the report. Progress is reported through a callback
//! so callers decide how (or whether) to log it.

use crate::card::{Card, CardRow};
use crate::collection::{open_collection, read_collection, CollectionQuery, DEFAULT_OWNED_LIST};
use crate::report::{render_html, write_csv, ReportMeta};
use crate::sort::sort_cards;
use crate::trim::trim_unchanged_cards;
use anyhow::{Context, Result};
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Output document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Html,
    Csv,
}

/// Configuration for a report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Collection database exported from Delver Lens
    pub db: PathBuf,
    /// Report destination
    pub output: PathBuf,
    /// Report format
    pub format: OutputFormat,
    /// Name of the list holding owned cards
    pub owned_list: String,
    /// Drop unchanged cards that are not next to a changed card
    pub trim: bool,
    /// Include the primary sort key in the output
    pub show_scores: bool,
}

impl Default for ReportConfig {
    /// Trimmed HTML to `output.html`; `db` is left empty.
    fn default() -> Self {
        Self {
            db: PathBuf::new(),
            output: PathBuf::from("output.html"),
            format: OutputFormat::Html,
            owned_list: DEFAULT_OWNED_LIST.to_string(),
            trim: true,
            show_scores: false,
        }
    }
}

impl ReportConfig {
    /// Default configuration for a database.
    pub fn new(db: impl Into<PathBuf>) -> Self {
        Self {
            db: db.into(),
            ..Self::default()
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>, format: OutputFormat) -> Self {
        self.output = output.into();
        self.format = format;
        self
    }

    pub fn with_owned_list(mut self, owned_list: impl Into<String>) -> Self {
        self.owned_list = owned_list.into();
        self
    }

    /// Keep every card instead of trimming to the changed ones.
    pub fn untrimmed(mut self) -> Self {
        self.trim = false;
        self
    }

    pub fn with_scores(mut self) -> Self {
        self.show_scores = true;
        self
    }
}

/// Pipeline stage about to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Reading,
    Coloring,
    Sorting,
    Trimming,
    Writing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Stage::Reading => "Reading collection",
            Stage::Coloring => "Converting color identities",
            Stage::Sorting => "Sorting cards",
            Stage::Trimming => "Trimming unchanged cards",
            Stage::Writing => "Writing report",
        };
        f.write_str(text)
    }
}

/// What a report run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// Rows returned by the collection query
    pub rows_read: usize,
    /// Rows rejected at validation
    pub rows_skipped: usize,
    /// Cards in the full sorted list
    pub cards_sorted: usize,
    /// Cards written to the report (context cards may repeat)
    pub cards_written: usize,
    /// Cards with an incoming quantity
    pub cards_changed: usize,
    pub output: PathBuf,
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} of {} cards ({} incoming, {} rows skipped) to {}",
            self.cards_written,
            self.cards_sorted,
            self.cards_changed,
            self.rows_skipped,
            self.output.display()
        )
    }
}

/// Validate aggregated rows, skipping the ones that cannot become cards.
///
/// Returns the cards and the number of rows skipped.
pub fn cards_from_rows(rows: Vec<CardRow>) -> (Vec<Card>, usize) {
    let mut cards = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    for row in rows {
        match Card::try_from(row) {
            Ok(card) => cards.push(card),
            Err(e) => {
                log::warn!("Skipping row: {}", e);
                skipped += 1;
            }
        }
    }

    (cards, skipped)
}

/// Run the whole pipeline for `config`.
///
/// `on_progress` is called once before each stage that runs.
pub fn build_report(
    config: &ReportConfig,
    mut on_progress: impl FnMut(Stage),
) -> Result<ReportSummary> {
    on_progress(Stage::Reading);
    let conn = open_collection(&config.db)?;
    let query = CollectionQuery::default().with_owned_list(config.owned_list.clone());
    let rows = read_collection(&conn, &query)?;
    let rows_read = rows.len();

    on_progress(Stage::Coloring);
    let (cards, rows_skipped) = cards_from_rows(rows);

    on_progress(Stage::Sorting);
    let sorted = sort_cards(cards);

    let shown: Vec<&Card> = if config.trim {
        on_progress(Stage::Trimming);
        trim_unchanged_cards(&sorted)
    } else {
        sorted.iter().collect()
    };

    on_progress(Stage::Writing);
    match config.format {
        OutputFormat::Html => {
            let title = if config.trim { "Incoming Cards" } else { "Collection" };
            let meta = ReportMeta::new(title, sorted.len()).with_scores(config.show_scores);
            let html = render_html(&shown, &meta)?;
            std::fs::write(&config.output, html)
                .with_context(|| format!("Failed to write {}", config.output.display()))?;
        }
        OutputFormat::Csv => {
            let file = File::create(&config.output)
                .with_context(|| format!("Failed to create {}", config.output.display()))?;
            write_csv(&shown, BufWriter::new(file), config.show_scores)?;
        }
    }

    Ok(ReportSummary {
        rows_read,
        rows_skipped,
        cards_sorted: sorted.len(),
        cards_written: shown.len(),
        cards_changed: sorted.iter().filter(|c| c.is_changed()).count(),
        output: config.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, mana_cost: &str, owned: Option<i64>, incoming: Option<i64>) -> CardRow {
        CardRow {
            card_name: name.to_string(),
            cmc: 1,
            mana_cost: Some(mana_cost.to_string()),
            owned,
            incoming,
        }
    }

    #[test]
    fn test_cards_from_rows_skips_invalid() {
        let rows = vec![
            row("Llanowar Elves", "{G}", Some(1), None),
            row("Nothing", "{U}", None, None),
            row("Negative", "{B}", Some(-3), None),
            row("Opt", "{U}", None, Some(2)),
        ];
        let (cards, skipped) = cards_from_rows(rows);
        assert_eq!(skipped, 2);
        let names: Vec<&str> = cards.iter().map(|c| c.card_name.as_str()).collect();
        assert_eq!(names, vec!["Llanowar Elves", "Opt"]);
        assert_eq!(cards[0].color, "G");
    }

    #[test]
    fn test_config_builders() {
        let config = ReportConfig::new("collection.sqlite");
        assert!(config.trim);
        assert!(!config.show_scores);
        assert_eq!(config.format, OutputFormat::Html);
        assert_eq!(config.output, PathBuf::from("output.html"));
        assert_eq!(config.owned_list, "Owned");

        let config = ReportConfig::new("collection.sqlite")
            .with_output("out.csv", OutputFormat::Csv)
            .with_owned_list("Binder")
            .untrimmed()
            .with_scores();
        assert!(!config.trim);
        assert!(config.show_scores);
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.owned_list, "Binder");
    }

    #[test]
    fn test_config_default() {
        let config = ReportConfig::default();
        assert_eq!(config.db, PathBuf::new());
        assert_eq!(config.output, PathBuf::from("output.html"));
        assert_eq!(config.format, OutputFormat::Html);
        assert_eq!(config.owned_list, "Owned");
        assert!(config.trim);
        assert!(!config.show_scores);

        let config = ReportConfig::new("collection.sqlite");
        assert_eq!(config.db, PathBuf::from("collection.sqlite"));
        assert_eq!(config.output, ReportConfig::default().output);
    }

    #[test]
    fn test_build_report_missing_db() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::new(dir.path().join("nope.sqlite"))
            .with_output(dir.path().join("out.html"), OutputFormat::Html);

        let mut stages = Vec::new();
        let err = build_report(&config, |s| stages.push(s)).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert_eq!(stages, vec![Stage::Reading]);
        assert!(!dir.path().join("out.html").exists());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Trimming.to_string(), "Trimming unchanged cards");
    }
}
