//! Random encounters on the overworld.

use crate::combat::roll_telegraph;
use crate::env::{Oracles, RosterOracle};
use crate::state::{CombatPhase, CombatState, EnemyId, Mode, SessionState};
use crate::stats::{encounter_scale, scale_enemy};

/// Roster indices of enemies not yet defeated.
pub fn available_enemies(roster: &dyn RosterOracle, state: &SessionState) -> Vec<usize> {
    roster
        .enemies()
        .iter()
        .enumerate()
        .filter(|(_, enemy)| !state.run.defeated.contains(&enemy.id))
        .map(|(index, _)| index)
        .collect()
}

/// Whether a plain step here may roll an encounter at all.
pub fn encounters_possible(state: &SessionState, oracles: &Oracles<'_>) -> bool {
    state.zone.is_overworld()
        && state.run.encounters_enabled
        && !available_enemies(oracles.roster, state).is_empty()
}

/// Rolls the per-step encounter chance and picks an opponent uniformly from
/// the remaining enemies. Draws nothing when no encounter is possible.
pub fn roll_encounter(state: &mut SessionState, oracles: &Oracles<'_>) -> Option<usize> {
    if !encounters_possible(state, oracles) {
        return None;
    }
    let remaining = available_enemies(oracles.roster, state);
    let mut roller = state.roller(oracles.rng);
    if !roller.chance(oracles.config.encounter_chance) {
        return None;
    }
    let pick = roller.index(remaining.len());
    remaining.get(pick).copied()
}

/// Switches into combat against the enemy at `index`.
///
/// Scale is fixed here from the distance to spawn. Every combat-local field
/// is reset. The gauge starts from what shrines banked, plus the previous
/// battle's gauge when `carry_burst_into_battle` is set.
pub fn start_encounter(
    state: &mut SessionState,
    oracles: &Oracles<'_>,
    index: usize,
) -> Option<(EnemyId, f64)> {
    let last = oracles.roster.enemy_count().checked_sub(1)?;
    let index = index.min(last);
    let enemy = oracles.roster.enemy(index)?;

    let config = oracles.config;
    let scale = encounter_scale(state.player.position, config.spawn, &config.scaling);
    let scaled = scale_enemy(enemy, scale);

    let carried = if config.carry_burst_into_battle {
        state.combat.burst
    } else {
        0
    };
    let banked = state.run.take_field_burst();
    state.combat = CombatState::for_encounter(index, scaled.max_hp, scale);
    state.combat.charge_burst(carried);
    state.combat.charge_burst(banked);
    state.combat.telegraph = Some(roll_telegraph(&mut state.roller(oracles.rng)));

    state.mode = Mode::InCombat;
    state.phase = CombatPhase::AwaitingCommand;
    state.set_message(format!("Encountered {}!", enemy.name));
    Some((enemy.id.clone(), scale))
}
