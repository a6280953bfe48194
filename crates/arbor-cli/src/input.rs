//! Reading item lists from TOML.
//!
//! ```toml
//! [[item]]
//! label = "app"
//!
//! [[item]]
//! label = "db"
//! depends_on = ["app"]
//! ```

use serde::Deserialize;

use arbor::{ArborError, Item};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ItemFile {
    #[serde(default, rename = "item")]
    items: Vec<ItemEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ItemEntry {
    label: String,
    #[serde(default)]
    depends_on: Vec<String>,
}

/// Parses an item list.
///
/// Each item carries its 1-based position in the file as payload, so the
/// output can refer back to it. The synthetic root gets `None`.
pub fn parse_items(source: &str) -> Result<Vec<Item<Option<usize>>>, ArborError> {
    let file: ItemFile =
        toml::from_str(source).map_err(|err| ArborError::Input(err.message().to_string()))?;

    Ok(file
        .items
        .into_iter()
        .enumerate()
        .map(|(index, entry)| Item::new(entry.label, Some(index + 1)).depends_on(entry.depends_on))
        .collect())
}
