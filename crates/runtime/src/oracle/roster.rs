//! Combatant templates implementing [`game_core::RosterOracle`].
use game_content::Roster;
use game_core::{CharacterTemplate, EnemyTemplate, RosterOracle};

/// RosterOracle backed by the loaded roster table.
pub struct RosterOracleImpl {
    roster: Roster,
}

impl RosterOracleImpl {
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }
}

impl RosterOracle for RosterOracleImpl {
    fn enemies(&self) -> &[EnemyTemplate] {
        &self.roster.enemies
    }

    fn player_character(&self) -> &CharacterTemplate {
        &self.roster.player
    }
}
