use arrayvec::ArrayVec;

use crate::config::GameConfig;

use super::common::{ItemId, Position};
use super::moves::StatTriple;

/// Equipped item ids. Ordered, unique, at most [`GameConfig::MAX_EQUIPPED`].
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipSlots(ArrayVec<ItemId, { GameConfig::MAX_EQUIPPED }>);

impl EquipSlots {
    pub fn empty() -> Self {
        Self(ArrayVec::new())
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.0.iter().any(|equipped| equipped == id)
    }

    pub fn is_full(&self) -> bool {
        self.0.is_full()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.0.iter()
    }

    /// Appends an id. Returns `false` when the id is already present or no slot is free.
    pub fn insert(&mut self, id: ItemId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.0.try_push(id).is_ok()
    }

    /// Removes an id, preserving the order of the rest. Returns `false` if absent.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        match self.0.iter().position(|equipped| equipped == id) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Player-owned progression and overworld data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub position: Position,
    pub hp: u32,
    pub max_hp: u32,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next_level: u32,
    /// Attack accumulated from level-ups.
    pub bonus_attack: StatTriple,
    /// Defense accumulated from level-ups.
    pub bonus_defense: StatTriple,
    pub equipped: EquipSlots,
}

impl PlayerState {
    pub fn new(position: Position, max_hp: u32, exp_to_next_level: u32) -> Self {
        Self {
            position,
            hp: max_hp,
            max_hp,
            level: 1,
            exp: 0,
            exp_to_next_level,
            bonus_attack: StatTriple::ZERO,
            bonus_defense: StatTriple::ZERO,
            equipped: EquipSlots::empty(),
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Sets HP, clamped into `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.set_hp(self.hp.saturating_sub(amount));
    }

    pub fn heal(&mut self, amount: u32) {
        self.set_hp(self.hp.saturating_add(amount));
    }

    pub fn heal_full(&mut self) {
        self.hp = self.max_hp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equip_slots_reject_duplicates_and_overflow() {
        let mut slots = EquipSlots::empty();
        assert!(slots.insert(ItemId::from("a")));
        assert!(!slots.insert(ItemId::from("a")));
        assert!(slots.insert(ItemId::from("b")));
        assert!(slots.insert(ItemId::from("c")));
        assert!(slots.is_full());
        assert!(!slots.insert(ItemId::from("d")));
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn removing_keeps_order() {
        let mut slots = EquipSlots::empty();
        for id in ["a", "b", "c"] {
            slots.insert(ItemId::from(id));
        }
        assert!(slots.remove(&ItemId::from("b")));
        assert!(!slots.remove(&ItemId::from("b")));
        let ids: Vec<&str> = slots.iter().map(ItemId::as_str).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn hp_is_clamped_on_every_mutation() {
        let mut player = PlayerState::new(Position::ORIGIN, 100, 50);
        player.take_damage(250);
        assert_eq!(player.hp, 0);
        player.heal(500);
        assert_eq!(player.hp, 100);
        player.set_hp(101);
        assert_eq!(player.hp, 100);
    }
}
