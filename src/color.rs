//! Color identity parsing
//!
//! Turns a mana cost encoding such as `{2}{G}{W/P}` into the canonical
//! color identity string (`"WG"`), ordered by the WUBRG wheel.

use std::collections::HashSet;

/// The five color symbols in canonical order.
pub const WUBRG: [char; 5] = ['W', 'U', 'B', 'R', 'G'];

/// Rank given to symbols outside the WUBRG alphabet so they sort last.
const UNKNOWN_PRIORITY: u32 = 999;

/// Priority rank of a color symbol (W=1 .. G=5), `None` for anything else.
pub fn priority(symbol: char) -> Option<u32> {
    match symbol {
        'W' => Some(1),
        'U' => Some(2),
        'B' => Some(3),
        'R' => Some(4),
        'G' => Some(5),
        _ => None,
    }
}

/// Reorder color symbols into WUBRG order.
///
/// Unknown symbols are moved to the end and keep their relative order.
pub fn sort_by_priority<I>(symbols: I) -> String
where
    I: IntoIterator<Item = char>,
{
    let mut symbols: Vec<char> = symbols.into_iter().collect();
    symbols.sort_by_key(|&c| priority(c).unwrap_or(UNKNOWN_PRIORITY));
    symbols.into_iter().collect()
}

/// Extract the color identity from a mana cost.
///
/// Matching is case-insensitive and each color appears at most once.
/// Numerals, braces and hybrid/Phyrexian punctuation are ignored.
pub fn parse_color(mana_cost: &str) -> String {
    let found: HashSet<char> = mana_cost
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| WUBRG.contains(c))
        .collect();

    sort_by_priority(found)
}
