//! Delver Sorter
//!
//! Builds a review report of a Delver Lens card collection: owned cards are
//! joined against cards on other lists ("incoming"), sorted by color
//! identity, and trimmed to the incoming cards plus neighboring context.
//!
//! This library provides:
//! - `color`: color identity parsing from mana costs
//! - `sort`: the default collection ordering
//! - `trim`: trimming to changed cards with context
//! - `collection`: reading the Delver Lens SQLite export
//! - `report`: HTML and CSV output
//! - `pipeline`: the end-to-end run used by the CLI
//!
//! Binaries:
//! - `delver-sorter`: generate a report from a collection database

pub mod card;
pub mod collection;
pub mod color;
pub mod pipeline;
pub mod report;
pub mod sort;
pub mod trim;

pub use card::{Card, CardError, CardRow};
pub use color::{parse_color, sort_by_priority};
pub use sort::{sort_cards, sort_score, SortScore};
pub use trim::trim_unchanged_cards;
