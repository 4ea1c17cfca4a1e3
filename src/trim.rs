//! Trimming a sorted card list down to the changed cards
//!
//! Each changed card (one with an incoming quantity) is kept together with
//! its unchanged neighbors so a reader can find it in the full list. A
//! neighbor that is itself changed is not shown as context; it is emitted
//! when its own turn comes.
//!
//! An unchanged card sitting between two changed cards is context for both
//! and is therefore emitted twice.

use crate::card::Card;

/// Positions of the cards to keep, in output order.
///
/// Indices never decrease; an index may repeat when an unchanged card is
/// shared context between two changed cards.
pub fn trim_unchanged_indices(cards: &[Card]) -> Vec<usize> {
    let unchanged = |j: &usize| !cards[*j].is_changed();
    let mut keep = Vec::new();

    for (i, card) in cards.iter().enumerate() {
        if !card.is_changed() {
            continue;
        }

        let prev = i.checked_sub(1).filter(unchanged);
        let next = Some(i + 1).filter(|&j| j < cards.len()).filter(unchanged);

        keep.extend(prev);
        keep.push(i);
        keep.extend(next);
    }

    keep
}

/// Keep only changed cards and their unchanged neighbors.
pub fn trim_unchanged_cards(cards: &[Card]) -> Vec<&Card> {
    trim_unchanged_indices(cards)
        .into_iter()
        .map(|i| &cards[i])
        .collect()
}
