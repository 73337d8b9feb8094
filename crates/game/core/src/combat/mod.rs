//! Combat resolver.
//!
//! A turn runs in three stages:
//!
//! ```text
//! submit_move   AwaitingCommand → Resolving       enemy move picked, "Clash!"
//! resolve_turn  Resolving       → ShowingResult   damage, burst, experience if still standing
//! settle_turn   ShowingResult   → AwaitingCommand next turn, telegraph re-rolled
//!                               → ShowingResult   verdict recorded, battle over
//! ```
//!
//! The stage functions re-read the live session each time they run. Checking
//! that a deferred stage still belongs to the current turn is the engine's job.
pub mod ai;
pub mod damage;
pub mod outcome;

pub use ai::{move_weights, pick_enemy_move, roll_telegraph};
pub use damage::elemental_damage;
pub use outcome::resolve;

use crate::engine::CommandError;
use crate::env::{EnemyTemplate, Oracles};
use crate::state::{CombatPhase, Mode, MoveType, Outcome, SessionState, Verdict};
use crate::stats::{self, LevelUp, Loadout};

pub const CLASH_MESSAGE: &str = "Clash!";
pub const COMMAND_PROMPT: &str = "Choose your command.";
pub const VICTORY_MESSAGE: &str = "Victory. Return?";
pub const DEFEAT_MESSAGE: &str = "Defeated. Reset run?";
pub const RETURN_MESSAGE: &str = "Back to the field.";

/// What [`resolve_turn`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub outcome: Outcome,
    pub damage_to_enemy: u32,
    pub damage_to_player: u32,
    pub burst_fired: bool,
    pub enemy_defeated: bool,
    pub levels_gained: u32,
}

/// Accepts the player's command and picks the enemy's answer.
pub fn submit_move(
    state: &mut SessionState,
    oracles: &Oracles<'_>,
    player_move: MoveType,
) -> Result<MoveType, CommandError> {
    ensure_phase(state, CombatPhase::AwaitingCommand)?;

    let enemy = current_enemy(state, oracles)?;
    let weight = oracles.config.tuning.get(enemy.difficulty).telegraph_weight;
    let telegraph = state.combat.telegraph;
    let enemy_move = pick_enemy_move(&mut state.roller(oracles.rng), telegraph, weight);

    state.phase = CombatPhase::Resolving;
    state.turn_token = state.turn_token.wrapping_add(1);
    state.combat.player_move = Some(player_move);
    state.combat.enemy_move = Some(enemy_move);
    state.combat.last_outcome = None;
    state.combat.burst_used = false;
    state.set_message(CLASH_MESSAGE);

    Ok(enemy_move)
}

/// Computes the clash recorded by [`submit_move`].
pub fn resolve_turn(
    state: &mut SessionState,
    oracles: &Oracles<'_>,
) -> Result<TurnReport, CommandError> {
    ensure_phase(state, CombatPhase::Resolving)?;
    let (Some(player_move), Some(enemy_move)) = (state.combat.player_move, state.combat.enemy_move)
    else {
        return Err(CommandError::PhaseMismatch {
            expected: CombatPhase::AwaitingCommand,
            actual: state.phase,
        });
    };

    let config = oracles.config;
    let enemy = current_enemy(state, oracles)?;
    let tuning = config.tuning.get(enemy.difficulty);
    let player_side = stats::player_loadout(
        oracles.roster.player_character(),
        &state.player,
        oracles.items,
    );
    let enemy_side = stats::scale_enemy(enemy, state.combat.enemy_scale).loadout;

    let outcome = resolve(player_move, enemy_move);
    let mut report = TurnReport {
        outcome,
        damage_to_enemy: 0,
        damage_to_player: 0,
        burst_fired: false,
        enemy_defeated: false,
        levels_gained: 0,
    };

    let message = match outcome {
        Outcome::Win => {
            let fired = state.combat.burst_armed;
            let bonus = if fired { config.burst_bonus_damage } else { 0 };
            report.damage_to_enemy = strike(
                tuning.damage_to_enemy + bonus,
                &player_side,
                &enemy_side,
                player_move,
                config.elemental_factor,
            );
            state.combat.damage_enemy(report.damage_to_enemy);
            state.combat.charge_burst(tuning.burst_win);
            if fired {
                state.combat.burst = 0;
                state.combat.burst_armed = false;
                state.combat.burst_used = true;
                report.burst_fired = true;
                "TRINITY BURST!"
            } else {
                "Direct hit!"
            }
        }
        Outcome::Lose => {
            report.damage_to_player = strike(
                tuning.damage_to_player,
                &enemy_side,
                &player_side,
                enemy_move,
                config.elemental_factor,
            );
            state.player.take_damage(report.damage_to_player);
            state.combat.charge_burst(tuning.burst_lose);
            "Impact taken."
        }
        Outcome::Draw => {
            report.damage_to_enemy = strike(
                tuning.draw_damage,
                &player_side,
                &enemy_side,
                player_move,
                config.elemental_factor,
            );
            report.damage_to_player = strike(
                tuning.draw_damage,
                &enemy_side,
                &player_side,
                enemy_move,
                config.elemental_factor,
            );
            state.combat.damage_enemy(report.damage_to_enemy);
            state.player.take_damage(report.damage_to_player);
            state.combat.charge_burst(tuning.burst_draw);
            "PARRY!"
        }
    };

    let mut message = message.to_owned();
    report.enemy_defeated = state.combat.is_enemy_defeated();
    // A knocked-out player earns nothing, so a level-up heal cannot undo the defeat.
    if report.enemy_defeated && !state.player.is_defeated() {
        let LevelUp {
            levels_gained,
            new_level,
        } = stats::award_experience(&mut state.player, enemy.exp_reward, &config.level_curve);
        report.levels_gained = levels_gained;
        message.push_str(&format!(" +{} EXP.", enemy.exp_reward));
        if levels_gained > 0 {
            message.push_str(&format!(" Level up! Lv {new_level}."));
        }
    }

    state.combat.last_outcome = Some(outcome);
    state.phase = CombatPhase::ShowingResult;
    state.set_message(message);

    Ok(report)
}

/// Ends the turn: either the battle is decided or the next command is awaited.
///
/// Returns the verdict when the battle ended.
pub fn settle_turn(
    state: &mut SessionState,
    oracles: &Oracles<'_>,
) -> Result<Option<Verdict>, CommandError> {
    ensure_phase(state, CombatPhase::ShowingResult)?;
    if state.combat.verdict.is_some() {
        return Err(CommandError::PhaseMismatch {
            expected: CombatPhase::ShowingResult,
            actual: state.phase,
        });
    }

    let enemy_down = state.combat.is_enemy_defeated();
    if state.player.is_defeated() || enemy_down {
        if enemy_down {
            let enemy = current_enemy(state, oracles)?;
            state.run.defeated.insert(enemy.id.clone());
        }
        let verdict = if state.player.is_defeated() {
            state.set_message(DEFEAT_MESSAGE);
            Verdict::Defeat
        } else {
            state.set_message(VICTORY_MESSAGE);
            Verdict::Victory
        };
        state.combat.verdict = Some(verdict);
        return Ok(Some(verdict));
    }

    state.phase = CombatPhase::AwaitingCommand;
    state.combat.clear_turn();
    state.combat.telegraph = Some(roll_telegraph(&mut state.roller(oracles.rng)));
    state.set_message(COMMAND_PROMPT);
    Ok(None)
}

/// Arms or disarms the burst. Arming needs a full gauge.
pub fn toggle_burst(state: &mut SessionState) -> Result<bool, CommandError> {
    if state.mode != Mode::InCombat {
        return Err(CommandError::NotInCombat);
    }
    if !state.combat.burst_armed && !state.combat.is_burst_full() {
        return Err(CommandError::BurstNotCharged {
            burst: state.combat.burst,
        });
    }
    state.combat.burst_armed = !state.combat.burst_armed;
    Ok(state.combat.burst_armed)
}

/// Leaves a won battle.
pub fn return_to_exploration(state: &mut SessionState) -> Result<(), CommandError> {
    if state.mode != Mode::InCombat {
        return Err(CommandError::NotInCombat);
    }
    if state.combat.verdict != Some(Verdict::Victory) {
        return Err(CommandError::BattleNotWon);
    }

    state.mode = Mode::Exploring;
    state.phase = CombatPhase::AwaitingCommand;
    state.combat.clear_turn();
    state.set_message(RETURN_MESSAGE);
    Ok(())
}

fn ensure_phase(state: &SessionState, expected: CombatPhase) -> Result<(), CommandError> {
    if state.mode != Mode::InCombat {
        return Err(CommandError::NotInCombat);
    }
    if state.phase != expected {
        return Err(CommandError::PhaseMismatch {
            expected,
            actual: state.phase,
        });
    }
    Ok(())
}

fn current_enemy<'a>(
    state: &SessionState,
    oracles: &Oracles<'a>,
) -> Result<&'a EnemyTemplate, CommandError> {
    oracles
        .roster
        .enemy(state.combat.enemy_index)
        .ok_or(CommandError::Oracle(crate::env::OracleError::EmptyRoster))
}

fn strike(base: u32, attacker: &Loadout, defender: &Loadout, with: MoveType, factor: f64) -> u32 {
    elemental_damage(base, attacker.attack(with), defender.defense(with), factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FixedRng, RngOracle, SequenceRng};
    use crate::explore::start_encounter;
    use crate::state::{BURST_MAX, EnemyId, Position};
    use crate::testing::fixtures::{self, World};

    /// Puts a fresh session into combat against roster entry `index` at scale 1.
    fn battle(world: &World, rng: &dyn RngOracle, index: usize) -> SessionState {
        let env = world.env(rng);
        let oracles = env.resolve().expect("complete env");
        let mut state = world.session();
        start_encounter(&mut state, &oracles, index).expect("enemy exists");
        state
    }

    /// Runs submit → resolve and returns the report.
    fn clash(
        state: &mut SessionState,
        oracles: &Oracles<'_>,
        player_move: MoveType,
    ) -> TurnReport {
        submit_move(state, oracles, player_move).expect("awaiting command");
        resolve_turn(state, oracles).expect("resolving")
    }

    #[test]
    fn rookie_win_applies_elemental_damage() {
        let world = fixtures::world();
        // telegraph draw 0.5 → scissors; enemy pick 0.5 → telegraphed scissors
        let rng = SequenceRng::new([0.5, 0.5]);
        let mut state = battle(&world, &rng, 0);
        let oracles = world.env(&rng).resolve().expect("env");
        assert_eq!(state.combat.telegraph, Some(MoveType::Scissors));

        let token = state.turn_token;
        let enemy_move = submit_move(&mut state, &oracles, MoveType::Rock).expect("submit");
        assert_eq!(enemy_move, MoveType::Scissors);
        assert_eq!(state.phase, CombatPhase::Resolving);
        assert_eq!(state.turn_token, token + 1);
        assert_eq!(state.message, CLASH_MESSAGE);

        let report = resolve_turn(&mut state, &oracles).expect("resolve");
        assert_eq!(report.outcome, Outcome::Win);
        // max(1, round(16 + (8 - 5) * 0.6))
        assert_eq!(report.damage_to_enemy, 18);
        assert_eq!(state.combat.enemy_hp, 82);
        assert_eq!(state.combat.burst, 35);
        assert_eq!(state.phase, CombatPhase::ShowingResult);
        assert_eq!(state.message, "Direct hit!");
    }

    #[test]
    fn losing_hurts_the_player() {
        let world = fixtures::world();
        let rng = FixedRng(0); // enemy always plays the rock telegraph
        let mut state = battle(&world, &rng, 0);
        let oracles = world.env(&rng).resolve().expect("env");

        let report = clash(&mut state, &oracles, MoveType::Scissors);
        assert_eq!(report.outcome, Outcome::Lose);
        // round(10 + (5 - 6) * 0.6) = 9
        assert_eq!(report.damage_to_player, 9);
        assert_eq!(state.player.hp, 91);
        assert_eq!(state.combat.enemy_hp, 100);
        assert_eq!(state.combat.burst, 12);
        assert_eq!(state.message, "Impact taken.");
    }

    #[test]
    fn draw_hits_both_sides() {
        let world = fixtures::world();
        let rng = FixedRng(0);
        let mut state = battle(&world, &rng, 0);
        let oracles = world.env(&rng).resolve().expect("env");

        let report = clash(&mut state, &oracles, MoveType::Rock);
        assert_eq!(report.outcome, Outcome::Draw);
        assert_eq!(report.damage_to_enemy, 6);
        assert_eq!(report.damage_to_player, 3);
        assert_eq!(state.combat.enemy_hp, 94);
        assert_eq!(state.player.hp, 97);
        assert_eq!(state.combat.burst, 18);
        assert_eq!(state.message, "PARRY!");
    }

    #[test]
    fn submit_outside_awaiting_command_changes_nothing() {
        let world = fixtures::world();
        let rng = FixedRng(0);
        let mut state = battle(&world, &rng, 0);
        let oracles = world.env(&rng).resolve().expect("env");
        submit_move(&mut state, &oracles, MoveType::Paper).expect("first submit");

        let before = state.clone();
        let result = submit_move(&mut state, &oracles, MoveType::Rock);
        assert!(matches!(result, Err(CommandError::PhaseMismatch { .. })));
        assert_eq!(state, before);

        let mut exploring = world.session();
        let result = submit_move(&mut exploring, &oracles, MoveType::Rock);
        assert_eq!(result, Err(CommandError::NotInCombat));
    }

    #[test]
    fn burst_arms_only_when_full() {
        let world = fixtures::world();
        let rng = FixedRng(0);
        let mut state = battle(&world, &rng, 0);

        state.combat.burst = 99;
        assert_eq!(
            toggle_burst(&mut state),
            Err(CommandError::BurstNotCharged { burst: 99 })
        );
        assert!(!state.combat.burst_armed);

        state.combat.burst = BURST_MAX;
        assert_eq!(toggle_burst(&mut state), Ok(true));
        assert_eq!(toggle_burst(&mut state), Ok(false));
        assert_eq!(toggle_burst(&mut state), Ok(true));
    }

    #[test]
    fn armed_burst_fires_on_win_and_empties_gauge() {
        let world = fixtures::world();
        let rng = FixedRng(0);
        let mut state = battle(&world, &rng, 0);
        let oracles = world.env(&rng).resolve().expect("env");
        state.combat.burst = BURST_MAX;
        toggle_burst(&mut state).expect("arm");

        let report = clash(&mut state, &oracles, MoveType::Paper);
        assert!(report.burst_fired);
        // round(16 + 12 + (6 - 5) * 0.6) = 29
        assert_eq!(report.damage_to_enemy, 29);
        assert_eq!(state.combat.burst, 0);
        assert!(!state.combat.burst_armed);
        assert!(state.combat.burst_used);
        assert_eq!(state.message, "TRINITY BURST!");
    }

    #[test]
    fn armed_burst_waits_through_a_loss() {
        let world = fixtures::world();
        let rng = FixedRng(0);
        let mut state = battle(&world, &rng, 0);
        let oracles = world.env(&rng).resolve().expect("env");
        state.combat.burst = BURST_MAX;
        toggle_burst(&mut state).expect("arm");

        let report = clash(&mut state, &oracles, MoveType::Scissors);
        assert!(!report.burst_fired);
        assert!(state.combat.burst_armed);
        assert_eq!(state.combat.burst, BURST_MAX);
        assert!(!state.combat.burst_used);
    }

    #[test]
    fn settle_starts_next_turn() {
        let world = fixtures::world();
        let rng = FixedRng(0);
        let mut state = battle(&world, &rng, 0);
        let oracles = world.env(&rng).resolve().expect("env");
        clash(&mut state, &oracles, MoveType::Paper);
        state.combat.telegraph = None;

        let verdict = settle_turn(&mut state, &oracles).expect("settle");
        assert_eq!(verdict, None);
        assert_eq!(state.phase, CombatPhase::AwaitingCommand);
        assert_eq!(state.combat.player_move, None);
        assert_eq!(state.combat.enemy_move, None);
        assert_eq!(state.combat.last_outcome, None);
        assert!(state.combat.telegraph.is_some());
        assert_eq!(state.message, COMMAND_PROMPT);
    }

    #[test]
    fn victory_records_defeat_and_allows_return() {
        let world = fixtures::world();
        let rng = FixedRng(0);
        let mut state = battle(&world, &rng, 0);
        let oracles = world.env(&rng).resolve().expect("env");
        state.combat.enemy_hp = 1;

        let report = clash(&mut state, &oracles, MoveType::Paper);
        assert!(report.enemy_defeated);
        assert_eq!(state.player.exp, 40);
        assert_eq!(state.message, "Direct hit! +40 EXP.");

        let verdict = settle_turn(&mut state, &oracles).expect("settle");
        assert_eq!(verdict, Some(Verdict::Victory));
        assert_eq!(state.phase, CombatPhase::ShowingResult);
        assert_eq!(state.message, VICTORY_MESSAGE);
        assert!(state.run.defeated.contains(&EnemyId::from("kai")));

        return_to_exploration(&mut state).expect("return");
        assert_eq!(state.mode, Mode::Exploring);
        assert_eq!(state.message, RETURN_MESSAGE);
    }

    #[test]
    fn defeat_blocks_return() {
        let world = fixtures::world();
        let rng = FixedRng(0);
        let mut state = battle(&world, &rng, 0);
        let oracles = world.env(&rng).resolve().expect("env");
        state.player.hp = 1;

        clash(&mut state, &oracles, MoveType::Scissors);
        assert_eq!(state.player.hp, 0);
        assert_eq!(
            settle_turn(&mut state, &oracles).expect("settle"),
            Some(Verdict::Defeat)
        );
        assert_eq!(state.message, DEFEAT_MESSAGE);
        assert_eq!(return_to_exploration(&mut state), Err(CommandError::BattleNotWon));
        assert_eq!(state.mode, Mode::InCombat);
    }

    #[test]
    fn mutual_knockout_is_a_defeat_without_experience() {
        let world = fixtures::world();
        let rng = FixedRng(0);
        let mut state = battle(&world, &rng, 0);
        let oracles = world.env(&rng).resolve().expect("env");
        state.player.hp = 3;
        state.player.exp = 10;
        state.combat.enemy_hp = 6;

        let report = clash(&mut state, &oracles, MoveType::Rock);
        assert_eq!(report.outcome, Outcome::Draw);
        assert!(report.enemy_defeated);
        assert_eq!(report.levels_gained, 0);
        assert_eq!(state.player.hp, 0);
        assert_eq!(state.player.level, 1);
        assert_eq!(state.player.exp, 10);
        assert_eq!(state.message, "PARRY!");

        assert_eq!(
            settle_turn(&mut state, &oracles).expect("settle"),
            Some(Verdict::Defeat)
        );
        assert_eq!(return_to_exploration(&mut state), Err(CommandError::BattleNotWon));
    }

    #[test]
    fn return_mid_battle_is_refused() {
        let world = fixtures::world();
        let rng = FixedRng(0);
        let mut state = battle(&world, &rng, 0);
        assert_eq!(return_to_exploration(&mut state), Err(CommandError::BattleNotWon));
    }

    #[test]
    fn finishing_blow_can_level_up() {
        let world = fixtures::world();
        let rng = FixedRng(0);
        let mut state = battle(&world, &rng, 0);
        let oracles = world.env(&rng).resolve().expect("env");
        state.player.exp = 10;
        state.combat.enemy_hp = 1;

        let report = clash(&mut state, &oracles, MoveType::Paper);
        assert_eq!(report.levels_gained, 1);
        assert_eq!(state.player.level, 2);
        assert_eq!(state.player.exp, 0);
        assert!(state.message.ends_with("Level up! Lv 2."));
    }

    #[test]
    fn scaled_enemy_defends_harder() {
        let world = fixtures::world();
        let rng = SequenceRng::new([0.5, 0.5]);
        let oracles = world.env(&rng).resolve().expect("env");
        let mut state = world.session();
        // 14 tiles east of spawn: scale 1.2
        state.player.position = Position::new(27, 10);
        start_encounter(&mut state, &oracles, 0).expect("enemy");
        assert_eq!(state.combat.enemy_max_hp, 120);

        let report = clash(&mut state, &oracles, MoveType::Rock);
        // kai rock defense 5 × 1.2 = 6: round(16 + (8 - 6) * 0.6) = 17
        assert_eq!(report.damage_to_enemy, 17);
    }
}
