//! Item catalog loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::{ItemTemplate, KeyItem};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::tables::ItemCatalog;

/// Item catalog structure for RON files.
#[derive(Debug, Deserialize)]
struct ItemCatalogRon {
    #[serde(default)]
    items: Vec<ItemTemplate>,
    #[serde(default)]
    key_items: Vec<KeyItem>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let catalog: ItemCatalogRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for id in catalog.items.iter().map(|item| item.id.as_str()) {
            if !seen.insert(id) {
                anyhow::bail!("Duplicate item id '{}'", id);
            }
        }
        let mut seen = HashSet::new();
        for id in catalog.key_items.iter().map(|item| item.id.as_str()) {
            if !seen.insert(id) {
                anyhow::bail!("Duplicate key item id '{}'", id);
            }
        }

        Ok(ItemCatalog {
            items: catalog.items,
            key_items: catalog.key_items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::MoveType;

    #[test]
    fn sparse_bonuses_default_to_zero() {
        let catalog = ItemLoader::parse(
            r#"(
                items: [
                    (id: "edge", name: "Edge", attack: {scissors: 4}),
                ],
                key_items: [
                    (id: "pass", name: "Pass"),
                ],
            )"#,
        )
        .expect("catalog");

        let edge = &catalog.items[0];
        assert_eq!(edge.attack.get(MoveType::Scissors), 4);
        assert_eq!(edge.attack.get(MoveType::Rock), 0);
        assert!(edge.defense.is_empty());
        assert_eq!(catalog.key_items[0].name, "Pass");
    }

    #[test]
    fn rejects_duplicate_items() {
        let result = ItemLoader::parse(
            r#"(items: [(id: "a", name: "A"), (id: "a", name: "B")])"#,
        );
        assert!(result.is_err());
    }
}
