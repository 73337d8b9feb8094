use crate::state::{ItemId, KeyItemId, PartialTriple};

/// Equipment and key item tables.
pub trait ItemOracle: Send + Sync {
    fn item(&self, id: &ItemId) -> Option<&ItemTemplate>;

    fn key_item(&self, id: &KeyItemId) -> Option<&KeyItem>;

    /// Every equippable item, in display order.
    fn items(&self) -> &[ItemTemplate];
}

/// Equippable item. Bonuses are sparse: an item may boost only some move types.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack: PartialTriple,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: PartialTriple,
}

/// Non-equippable story item that unlocks gates and seals.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyItem {
    pub id: KeyItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}
