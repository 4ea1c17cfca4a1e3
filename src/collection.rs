//! Reading a Delver Lens collection database
//!
//! The export keeps every list (the collection itself, wishlists, decks
//! being built) in one `cards` table. Cards in the owned list are matched
//! against cards in every other list and the quantities are summed per
//! (name, cmc, mana cost).

use crate::card::CardRow;
use anyhow::{bail, Context, Result};
use rusqlite::{named_params, Connection, OpenFlags};
use std::collections::HashSet;
use std::path::Path;

/// Name of the list holding the collection in a default Delver Lens export.
pub const DEFAULT_OWNED_LIST: &str = "Owned";

/// `lists.category` value for plain lists (decks use 2).
pub const LIST_CATEGORY: i64 = 1;

// FULL OUTER JOIN needs SQLite 3.39+, provided by the bundled library.
const AGGREGATE_SQL: &str = "
    WITH all_cards AS (
        SELECT
            dn.name AS card_name
            , c._id AS card_id
            , dn.cmana AS cmc
            , dn.mana AS mana_cost
            , c.quantity
            , l.name AS list_name
        FROM lists l
        JOIN cards c ON c.list = l._id
        JOIN data_cards dc ON dc._id = c.card
        JOIN data_names dn ON dn._id = dc.name
        WHERE l.category = :category
    )
    , collection AS (
        SELECT * FROM all_cards WHERE list_name = :owned_list
    )
    , incoming AS (
        SELECT * FROM all_cards WHERE list_name <> :owned_list
    )
    , out_list AS (
        SELECT
            COALESCE(c.card_name, i.card_name) AS card_name
            , COALESCE(c.cmc, i.cmc) AS cmc
            , COALESCE(c.mana_cost, i.mana_cost) AS mana_cost
            , c.quantity AS owned
            , i.quantity AS incoming
        FROM collection c
        FULL OUTER JOIN incoming i
            ON c.card_name = i.card_name AND c.card_id = i.card_id
    )
    SELECT
        card_name
        , CAST(cmc AS INTEGER) AS cmc
        , mana_cost
        , SUM(owned) AS owned
        , SUM(incoming) AS incoming
    FROM out_list
    GROUP BY card_name, cmc, mana_cost
    ORDER BY card_name, cmc, mana_cost
";

/// Parameters for the aggregation query.
#[derive(Debug, Clone)]
pub struct CollectionQuery {
    /// List treated as the owned collection; every other list is incoming
    pub owned_list: String,
    /// `lists.category` to read from
    pub list_category: i64,
}

impl Default for CollectionQuery {
    fn default() -> Self {
        Self {
            owned_list: DEFAULT_OWNED_LIST.to_string(),
            list_category: LIST_CATEGORY,
        }
    }
}

impl CollectionQuery {
    /// Query using a differently named owned list.
    pub fn with_owned_list(mut self, owned_list: impl Into<String>) -> Self {
        self.owned_list = owned_list.into();
        self
    }
}

/// Open a collection database read-only.
pub fn open_collection(path: &Path) -> Result<Connection> {
    if !path.exists() {
        bail!("Database file does not exist: {}", path.display());
    }

    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("Failed to open database {}", path.display()))
}

/// Reject result sets where two columns share a name.
fn ensure_unique_columns(names: &[&str]) -> Result<()> {
    let unique: HashSet<&str> = names.iter().copied().collect();
    if unique.len() != names.len() {
        let mut sorted = names.to_vec();
        sorted.sort_unstable();
        bail!("Duplicate fields in query result: {:?}", sorted);
    }
    Ok(())
}

/// Run the aggregation query and return one row per distinct card.
pub fn read_collection(conn: &Connection, query: &CollectionQuery) -> Result<Vec<CardRow>> {
    log::debug!(
        "Querying collection: owned list '{}', category {}",
        query.owned_list,
        query.list_category
    );

    let mut stmt = conn
        .prepare(AGGREGATE_SQL)
        .context("Failed to prepare collection query")?;
    ensure_unique_columns(&stmt.column_names())?;

    let rows = stmt
        .query_map(
            named_params! {
                ":category": query.list_category,
                ":owned_list": query.owned_list,
            },
            |row| {
                Ok(CardRow {
                    card_name: row.get("card_name")?,
                    cmc: row.get("cmc")?,
                    mana_cost: row.get("mana_cost")?,
                    owned: row.get("owned")?,
                    incoming: row.get("incoming")?,
                })
            },
        )
        .context("Failed to run collection query")?;

    let rows = rows
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read collection row")?;

    log::debug!("Collection query returned {} rows", rows.len());
    Ok(rows)
}
