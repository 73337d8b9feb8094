//! Combatant templates and the oracle serving them.
//!
//! Enemies are addressed by their index in the roster. Lookups clamp the index
//! into range so a stale or corrupt index never fails.

use crate::state::{Difficulty, EnemyId, MoveType, StatTriple};

pub trait RosterOracle: Send + Sync {
    /// All enemy templates, in encounter-index order.
    fn enemies(&self) -> &[EnemyTemplate];

    /// The character the player controls.
    fn player_character(&self) -> &CharacterTemplate;

    fn enemy_count(&self) -> usize {
        self.enemies().len()
    }

    /// Template at `index`, clamped into the valid range. `None` only for an empty roster.
    fn enemy(&self, index: usize) -> Option<&EnemyTemplate> {
        let enemies = self.enemies();
        let last = enemies.len().checked_sub(1)?;
        enemies.get(index.min(last))
    }

    fn enemy_index(&self, id: &EnemyId) -> Option<usize> {
        self.enemies().iter().position(|enemy| &enemy.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: EnemyId,
    pub name: String,
    /// Move type the enemy is themed around. Display only.
    pub anima: MoveType,
    pub base_hp: u32,
    pub difficulty: Difficulty,
    pub attack: StatTriple,
    pub defense: StatTriple,
    pub exp_reward: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blurb: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTemplate {
    pub id: String,
    pub name: String,
    pub base_hp: u32,
    pub attack: StatTriple,
    pub defense: StatTriple,
}
