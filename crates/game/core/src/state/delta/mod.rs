//! Change tracking between two session snapshots.
//!
//! A [`SessionDelta`] stores only bitmasks describing which fields changed.
//! The values themselves stay in the before/after [`SessionState`]; the
//! runtime publishes the delta with every event so subscribers know what to
//! re-read.
mod bitmask;

use crate::state::{CombatState, PlayerState, RunState, SessionState};

pub use bitmask::{CombatFields, PlayerFields, RunFields, SessionFields};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionDelta {
    pub session: SessionFields,
    pub player: PlayerFields,
    pub combat: CombatFields,
    pub run: RunFields,
}

impl SessionDelta {
    /// Field-by-field comparison of two snapshots.
    pub fn from_states(before: &SessionState, after: &SessionState) -> Self {
        let mut session = SessionFields::empty();
        if before.mode != after.mode {
            session |= SessionFields::MODE;
        }
        if before.phase != after.phase {
            session |= SessionFields::PHASE;
        }
        if before.zone != after.zone {
            session |= SessionFields::ZONE;
        }
        if before.message != after.message {
            session |= SessionFields::MESSAGE;
        }
        if before.turn_token != after.turn_token {
            session |= SessionFields::TURN_TOKEN;
        }
        if before.nonce != after.nonce {
            session |= SessionFields::NONCE;
        }

        Self {
            session,
            player: player_fields(&before.player, &after.player),
            combat: combat_fields(&before.combat, &after.combat),
            run: run_fields(&before.run, &after.run),
        }
    }

    /// True when nothing observable changed. Nonce movement alone does not count.
    pub fn is_empty(&self) -> bool {
        self.session.difference(SessionFields::NONCE).is_empty()
            && self.player.is_empty()
            && self.combat.is_empty()
            && self.run.is_empty()
    }
}

fn player_fields(before: &PlayerState, after: &PlayerState) -> PlayerFields {
    let mut fields = PlayerFields::empty();
    if before.position != after.position {
        fields |= PlayerFields::POSITION;
    }
    if before.hp != after.hp {
        fields |= PlayerFields::HP;
    }
    if before.max_hp != after.max_hp {
        fields |= PlayerFields::MAX_HP;
    }
    if before.level != after.level {
        fields |= PlayerFields::LEVEL;
    }
    if before.exp != after.exp || before.exp_to_next_level != after.exp_to_next_level {
        fields |= PlayerFields::EXP;
    }
    if before.bonus_attack != after.bonus_attack || before.bonus_defense != after.bonus_defense {
        fields |= PlayerFields::BONUSES;
    }
    if before.equipped != after.equipped {
        fields |= PlayerFields::EQUIPMENT;
    }
    fields
}

fn combat_fields(before: &CombatState, after: &CombatState) -> CombatFields {
    let mut fields = CombatFields::empty();
    if before.enemy_index != after.enemy_index
        || before.enemy_max_hp != after.enemy_max_hp
        || before.enemy_scale != after.enemy_scale
    {
        fields |= CombatFields::ENEMY;
    }
    if before.enemy_hp != after.enemy_hp {
        fields |= CombatFields::ENEMY_HP;
    }
    if before.player_move != after.player_move || before.enemy_move != after.enemy_move {
        fields |= CombatFields::MOVES;
    }
    if before.last_outcome != after.last_outcome {
        fields |= CombatFields::OUTCOME;
    }
    if before.telegraph != after.telegraph {
        fields |= CombatFields::TELEGRAPH;
    }
    if before.burst != after.burst
        || before.burst_armed != after.burst_armed
        || before.burst_used != after.burst_used
    {
        fields |= CombatFields::BURST;
    }
    if before.verdict != after.verdict {
        fields |= CombatFields::VERDICT;
    }
    fields
}

fn run_fields(before: &RunState, after: &RunState) -> RunFields {
    let mut fields = RunFields::empty();
    if before.defeated != after.defeated {
        fields |= RunFields::DEFEATED;
    }
    if before.key_items != after.key_items {
        fields |= RunFields::KEY_ITEMS;
    }
    if before.flags != after.flags {
        fields |= RunFields::FLAGS;
    }
    if before.story_stage != after.story_stage || before.quest != after.quest {
        fields |= RunFields::STORY;
    }
    if before.encounters_enabled != after.encounters_enabled {
        fields |= RunFields::ENCOUNTERS;
    }
    if before.field_return != after.field_return {
        fields |= RunFields::FIELD_RETURN;
    }
    if before.dialogue != after.dialogue {
        fields |= RunFields::DIALOGUE;
    }
    if before.field_burst != after.field_burst {
        fields |= RunFields::FIELD_BURST;
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::RosterOracle;
    use crate::testing::fixtures;

    #[test]
    fn identical_states_produce_empty_delta() {
        let roster = fixtures::roster();
        let state = SessionState::new(0, &GameConfig::default(), roster.player_character());
        assert!(SessionDelta::from_states(&state, &state).is_empty());
    }

    #[test]
    fn hp_and_message_changes_are_flagged() {
        let roster = fixtures::roster();
        let before = SessionState::new(0, &GameConfig::default(), roster.player_character());
        let mut after = before.clone();
        after.player.take_damage(10);
        after.message = "Impact taken.".into();

        let delta = SessionDelta::from_states(&before, &after);
        assert_eq!(delta.player, PlayerFields::HP);
        assert_eq!(delta.session, SessionFields::MESSAGE);
        assert!(delta.combat.is_empty());
    }
}
