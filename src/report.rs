//! Report output: a standalone HTML page or a CSV export.

use crate::card::Card;
use crate::sort::color_weight;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;

/// Header and summary details shown above the card table.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub title: String,
    /// Preformatted generation time
    pub generated_at: String,
    /// Number of cards in the full sorted collection
    pub total_cards: usize,
    /// Add a column with the primary sort key
    pub show_scores: bool,
}

impl ReportMeta {
    pub fn new(title: impl Into<String>, total_cards: usize) -> Self {
        Self {
            title: title.into(),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_cards,
            show_scores: false,
        }
    }

    pub fn with_scores(mut self, show_scores: bool) -> Self {
        self.show_scores = show_scores;
        self
    }
}

const STYLE: &str = "
body { font-family: sans-serif; margin: 2em; }
table { border-collapse: collapse; }
th, td { border: 1px solid #ccc; padding: 0.25em 0.75em; text-align: left; }
td.num { text-align: right; }
tr.incoming { background: #fff4c2; font-weight: bold; }
tr.context { color: #666; }
";

/// Escape text for use in HTML element content and attribute values.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn quantity(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Render cards as a complete HTML document.
pub fn render_html(cards: &[&Card], meta: &ReportMeta) -> Result<String> {
    let changed = cards.iter().filter(|c| c.is_changed()).count();
    let title = escape_html(&meta.title);

    let mut out = String::new();
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{}</title>", title)?;
    writeln!(out, "<style>{}</style>", STYLE)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>{}</h1>", title)?;
    writeln!(
        out,
        "<p class=\"summary\">Generated {}. Showing {} of {} cards, {} incoming.</p>",
        escape_html(&meta.generated_at),
        cards.len(),
        meta.total_cards,
        changed
    )?;

    writeln!(out, "<table>")?;
    write!(
        out,
        "<thead><tr><th>Name</th><th>Mana Cost</th><th>CMC</th><th>Color</th><th>Owned</th><th>Incoming</th>"
    )?;
    if meta.show_scores {
        write!(out, "<th>Sort Score</th>")?;
    }
    writeln!(out, "</tr></thead>")?;

    writeln!(out, "<tbody>")?;
    for card in cards {
        let class = if card.is_changed() { "incoming" } else { "context" };
        write!(
            out,
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td class=\"num\">{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td>",
            class,
            escape_html(&card.card_name),
            escape_html(&card.mana_cost),
            card.cmc,
            escape_html(&card.color),
            quantity(card.owned),
            quantity(card.incoming),
        )?;
        if meta.show_scores {
            write!(out, "<td class=\"num\">{}</td>", color_weight(&card.color))?;
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</tbody>")?;
    writeln!(out, "</table>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;

    Ok(out)
}

const CSV_HEADER: [&str; 6] = ["card_name", "cmc", "mana_cost", "color", "owned", "incoming"];

#[derive(Serialize)]
struct ScoredRecord<'a> {
    card_name: &'a str,
    cmc: u32,
    mana_cost: &'a str,
    color: &'a str,
    owned: Option<u32>,
    incoming: Option<u32>,
    sort_primary: u64,
}

/// Write cards as CSV. Missing quantities become empty fields.
pub fn write_csv<W: std::io::Write>(cards: &[&Card], writer: W, show_scores: bool) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    let mut header: Vec<&str> = CSV_HEADER.to_vec();
    if show_scores {
        header.push("sort_primary");
    }
    writer.write_record(&header)?;

    for card in cards {
        if show_scores {
            writer.serialize(ScoredRecord {
                card_name: &card.card_name,
                cmc: card.cmc,
                mana_cost: &card.mana_cost,
                color: &card.color,
                owned: card.owned,
                incoming: card.incoming,
                sort_primary: color_weight(&card.color),
            })?;
        } else {
            writer.serialize(card)?;
        }
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}
