//! Default card ordering
//!
//! Cards are grouped by how many colors they have, then by which colors,
//! then by converted mana cost and finally by name.

use crate::card::Card;
use crate::color::priority;
use std::collections::BTreeSet;

/// Exponent applied to the color count so that every k-color card sorts
/// after every card with fewer colors.
const COLOR_COUNT_EXPONENT: u32 = 10;

/// Ordering key for a card. Compared field by field, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortScore<'a> {
    /// Sum of squared WUBRG ranks scaled by `count^10`
    pub primary: u64,
    pub cmc: u32,
    pub name: &'a str,
}

/// Primary component of the sort score for a color identity string.
///
/// Symbols outside WUBRG do not contribute and repeated symbols count once,
/// so at most five ranks are weighed.
pub fn color_weight(color: &str) -> u64 {
    let ranks: BTreeSet<u64> = color.chars().filter_map(priority).map(u64::from).collect();
    let squares: u64 = ranks.iter().map(|r| r * r).sum();
    squares * (ranks.len() as u64).pow(COLOR_COUNT_EXPONENT)
}

/// Compute the sort key for a card. Recomputed on every call.
pub fn sort_score(card: &Card) -> SortScore<'_> {
    SortScore {
        primary: color_weight(&card.color),
        cmc: card.cmc,
        name: &card.card_name,
    }
}

/// Sort cards by their default score.
///
/// The sort is stable: cards with identical scores keep their input order.
pub fn sort_cards(mut cards: Vec<Card>) -> Vec<Card> {
    cards.sort_by(|a, b| sort_score(a).cmp(&sort_score(b)));
    cards
}
