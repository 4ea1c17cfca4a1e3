//! Card records and the aggregated-row boundary
//!
//! `CardRow` is what the collection query hands back: loosely typed and
//! straight from SQLite. `Card` is the validated value the sorter and the
//! trimmer work on. Conversion is the only place a card's color is assigned.

use crate::color::parse_color;
use serde::Serialize;
use thiserror::Error;

/// A single aggregated card entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Card name as printed
    pub card_name: String,
    /// Converted mana cost
    pub cmc: u32,
    /// Raw mana cost encoding (e.g. `{1}{B}{G}`)
    pub mana_cost: String,
    /// Color identity in WUBRG order, derived from `mana_cost`
    pub color: String,
    /// Quantity already in the collection
    pub owned: Option<u32>,
    /// Quantity pending acquisition
    pub incoming: Option<u32>,
}

impl Card {
    /// Build a card, deriving its color identity from the mana cost.
    pub fn new(
        card_name: impl Into<String>,
        cmc: u32,
        mana_cost: impl Into<String>,
        owned: Option<u32>,
        incoming: Option<u32>,
    ) -> Self {
        let mana_cost = mana_cost.into();
        Self {
            card_name: card_name.into(),
            cmc,
            color: parse_color(&mana_cost),
            mana_cost,
            owned,
            incoming,
        }
    }

    /// True if the card has an incoming quantity.
    pub fn is_changed(&self) -> bool {
        self.incoming.is_some()
    }
}

/// One row of the aggregation query, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRow {
    pub card_name: String,
    pub cmc: i64,
    pub mana_cost: Option<String>,
    pub owned: Option<i64>,
    pub incoming: Option<i64>,
}

/// Reasons an aggregated row cannot become a `Card`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// The card name is empty or whitespace
    #[error("card name is empty")]
    EmptyName,
    /// A numeric column held a negative or out-of-range value
    #[error("{field} must be a non-negative integer, got {value}")]
    Negative { field: &'static str, value: i64 },
    /// Neither an owned nor an incoming quantity is present
    #[error("'{card_name}' has neither an owned nor an incoming quantity")]
    NoQuantities { card_name: String },
}

fn non_negative(field: &'static str, value: i64) -> Result<u32, CardError> {
    u32::try_from(value).map_err(|_| CardError::Negative { field, value })
}

fn optional_quantity(field: &'static str, value: Option<i64>) -> Result<Option<u32>, CardError> {
    value.map(|v| non_negative(field, v)).transpose()
}

impl TryFrom<CardRow> for Card {
    type Error = CardError;

    fn try_from(row: CardRow) -> Result<Self, Self::Error> {
        if row.card_name.trim().is_empty() {
            return Err(CardError::EmptyName);
        }
        if row.owned.is_none() && row.incoming.is_none() {
            return Err(CardError::NoQuantities {
                card_name: row.card_name,
            });
        }

        let cmc = non_negative("cmc", row.cmc)?;
        let owned = optional_quantity("owned", row.owned)?;
        let incoming = optional_quantity("incoming", row.incoming)?;

        Ok(Card::new(
            row.card_name,
            cmc,
            row.mana_cost.unwrap_or_default(),
            owned,
            incoming,
        ))
    }
}
