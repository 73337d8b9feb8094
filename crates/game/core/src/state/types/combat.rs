use super::moves::{MoveType, Outcome};

/// Top-level session mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    #[default]
    Exploring,
    InCombat,
}

/// Phase of a combat turn. Only meaningful while [`Mode::InCombat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatPhase {
    #[default]
    AwaitingCommand,
    Resolving,
    ShowingResult,
}

/// Terminal result of a battle, recorded when the final result is settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    Victory,
    Defeat,
}

/// Upper bound of the burst gauge.
pub const BURST_MAX: u32 = 100;

/// Combat-local fields. Reset when an encounter starts, stale (not cleared) after it ends.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub enemy_index: usize,
    pub enemy_hp: u32,
    pub enemy_max_hp: u32,
    /// Multiplier applied to the enemy template when the encounter was created.
    pub enemy_scale: f64,
    pub player_move: Option<MoveType>,
    pub enemy_move: Option<MoveType>,
    pub last_outcome: Option<Outcome>,
    /// Move hinted for the enemy's next action.
    pub telegraph: Option<MoveType>,
    pub burst: u32,
    pub burst_armed: bool,
    /// Set for the single turn in which a burst fired.
    pub burst_used: bool,
    pub verdict: Option<Verdict>,
}

impl CombatState {
    /// Fresh combat-local state for an enemy with the given scaled max HP.
    pub fn for_encounter(enemy_index: usize, enemy_max_hp: u32, enemy_scale: f64) -> Self {
        Self {
            enemy_index,
            enemy_hp: enemy_max_hp,
            enemy_max_hp,
            enemy_scale,
            ..Self::default()
        }
    }

    pub fn set_enemy_hp(&mut self, hp: u32) {
        self.enemy_hp = hp.min(self.enemy_max_hp);
    }

    pub fn damage_enemy(&mut self, amount: u32) {
        self.set_enemy_hp(self.enemy_hp.saturating_sub(amount));
    }

    pub fn is_enemy_defeated(&self) -> bool {
        self.enemy_hp == 0
    }

    /// Adds to the burst gauge, clamped to [`BURST_MAX`].
    pub fn charge_burst(&mut self, amount: u32) {
        self.burst = self.burst.saturating_add(amount).min(BURST_MAX);
    }

    pub fn is_burst_full(&self) -> bool {
        self.burst >= BURST_MAX
    }

    /// Clears the per-turn fields between commands.
    pub fn clear_turn(&mut self) {
        self.player_move = None;
        self.enemy_move = None;
        self.last_outcome = None;
        self.burst_used = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_never_exceeds_max() {
        let mut combat = CombatState::default();
        combat.charge_burst(70);
        combat.charge_burst(70);
        assert_eq!(combat.burst, BURST_MAX);
        assert!(combat.is_burst_full());
    }

    #[test]
    fn enemy_hp_is_clamped() {
        let mut combat = CombatState::for_encounter(0, 120, 1.2);
        combat.damage_enemy(500);
        assert_eq!(combat.enemy_hp, 0);
        combat.set_enemy_hp(999);
        assert_eq!(combat.enemy_hp, 120);
    }
}
