//! Equipment and key items implementing [`game_core::ItemOracle`].
use std::collections::HashMap;

use game_content::ItemCatalog;
use game_core::{ItemId, ItemOracle, ItemTemplate, KeyItem, KeyItemId};

/// ItemOracle backed by the loaded item catalog.
///
/// Items keep their catalog order for [`ItemOracle::items`]; lookups go
/// through an id index.
pub struct ItemOracleImpl {
    catalog: ItemCatalog,
    items_by_id: HashMap<ItemId, usize>,
    key_items_by_id: HashMap<KeyItemId, usize>,
}

impl ItemOracleImpl {
    pub fn new(catalog: ItemCatalog) -> Self {
        let items_by_id = catalog
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| (item.id.clone(), index))
            .collect();
        let key_items_by_id = catalog
            .key_items
            .iter()
            .enumerate()
            .map(|(index, key)| (key.id.clone(), index))
            .collect();
        Self {
            catalog,
            items_by_id,
            key_items_by_id,
        }
    }
}

impl ItemOracle for ItemOracleImpl {
    fn item(&self, id: &ItemId) -> Option<&ItemTemplate> {
        self.items_by_id
            .get(id)
            .and_then(|&index| self.catalog.items.get(index))
    }

    fn key_item(&self, id: &KeyItemId) -> Option<&KeyItem> {
        self.key_items_by_id
            .get(id)
            .and_then(|&index| self.catalog.key_items.get(index))
    }

    fn items(&self) -> &[ItemTemplate] {
        &self.catalog.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_content::ContentFactory;

    #[test]
    fn lookups_follow_the_catalog() {
        let content = ContentFactory::builtin().expect("builtin content");
        let oracle = ItemOracleImpl::new(content.items);

        let band = oracle.item(&ItemId::from("trinity-band")).expect("band");
        assert_eq!(band.id, ItemId::from("trinity-band"));
        assert!(oracle.item(&ItemId::from("missing")).is_none());

        let pass = oracle
            .key_item(&KeyItemId::from("harborPass"))
            .expect("pass");
        assert_eq!(pass.name, "Harbor Pass");
        assert_eq!(oracle.items().len(), 5);
    }
}
