//! Equipment changes. Only allowed while exploring.

use crate::config::GameConfig;
use crate::engine::CommandError;
use crate::env::ItemOracle;
use crate::state::{ItemId, Mode, SessionState};

/// What an equip command changed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipChange {
    Equipped(ItemId),
    Unequipped(ItemId),
    Unchanged,
}

/// Equips an item, or unequips it when already worn.
pub fn toggle_equip(
    state: &mut SessionState,
    items: &dyn ItemOracle,
    id: &ItemId,
) -> Result<EquipChange, CommandError> {
    if state.mode != Mode::Exploring {
        return Err(CommandError::NotExploring);
    }
    let item = items
        .item(id)
        .ok_or_else(|| CommandError::UnknownItem(id.clone()))?;

    if state.player.equipped.remove(id) {
        state.set_message(format!("Unequipped {}.", item.name));
        return Ok(EquipChange::Unequipped(id.clone()));
    }
    if !state.player.equipped.insert(id.clone()) {
        return Err(CommandError::EquipSlotsFull {
            max: GameConfig::MAX_EQUIPPED,
        });
    }
    state.set_message(format!("Equipped {}.", item.name));
    Ok(EquipChange::Equipped(id.clone()))
}

/// Removes an item. Absent ids are a no-op.
pub fn unequip(
    state: &mut SessionState,
    items: &dyn ItemOracle,
    id: &ItemId,
) -> Result<EquipChange, CommandError> {
    if state.mode != Mode::Exploring {
        return Err(CommandError::NotExploring);
    }
    if !state.player.equipped.remove(id) {
        return Ok(EquipChange::Unchanged);
    }
    let name = items.item(id).map_or(id.as_str(), |item| item.name.as_str());
    state.set_message(format!("Unequipped {name}."));
    Ok(EquipChange::Unequipped(id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn toggle_adds_then_removes() {
        let world = fixtures::world();
        let mut state = world.session();
        let bracer = ItemId::from("gu-bracer");

        let change = toggle_equip(&mut state, &world.items, &bracer).expect("equip");
        assert_eq!(change, EquipChange::Equipped(bracer.clone()));
        assert_eq!(state.message, "Equipped Gu Bracer.");

        let change = toggle_equip(&mut state, &world.items, &bracer).expect("unequip");
        assert_eq!(change, EquipChange::Unequipped(bracer));
        assert!(state.player.equipped.is_empty());
    }

    #[test]
    fn fourth_item_is_rejected_without_change() {
        let world = fixtures::world();
        let mut state = world.session();
        for id in ["gu-bracer", "choki-edge", "pa-barrier"] {
            toggle_equip(&mut state, &world.items, &ItemId::from(id)).expect("equip");
        }
        let before = state.player.equipped.clone();

        let result = toggle_equip(&mut state, &world.items, &ItemId::from("guard-core"));
        assert_eq!(result, Err(CommandError::EquipSlotsFull { max: 3 }));
        assert_eq!(state.player.equipped, before);
    }

    #[test]
    fn unequip_absent_is_noop() {
        let world = fixtures::world();
        let mut state = world.session();
        let before = state.clone();
        let change = unequip(&mut state, &world.items, &ItemId::from("gu-bracer")).expect("noop");
        assert_eq!(change, EquipChange::Unchanged);
        assert_eq!(state, before);
    }

    #[test]
    fn equipping_in_combat_is_refused() {
        let world = fixtures::world();
        let mut state = world.session();
        state.mode = Mode::InCombat;
        let result = toggle_equip(&mut state, &world.items, &ItemId::from("gu-bracer"));
        assert_eq!(result, Err(CommandError::NotExploring));
        assert!(state.player.equipped.is_empty());
    }
}
