//! Session command pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`SessionState`]. Every
//! mutation, including the deferred combat stages, flows through
//! [`GameEngine::execute`], which reports what changed and which stage (if
//! any) must be scheduled next.

mod command;
mod errors;
mod stage;

pub use command::{Command, CommandReport};
pub use errors::CommandError;
pub use stage::{Stage, StageTicket};

use crate::combat;
use crate::env::{GameEnv, Oracles};
use crate::explore;
use crate::state::{CombatState, SessionDelta, SessionState};

/// Complete outcome of an applied command.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Which fields changed.
    pub delta: SessionDelta,

    /// Command-specific result.
    pub report: CommandReport,

    /// Deferred stage the caller must schedule, if the turn continues.
    pub next_stage: Option<StageTicket>,
}

/// Game engine applying commands to a session.
pub struct GameEngine<'a> {
    state: &'a mut SessionState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut SessionState) -> Self {
        Self { state }
    }

    /// Builds the opening state of a run.
    pub fn new_session(env: GameEnv<'_>, game_seed: u64) -> Result<SessionState, CommandError> {
        let oracles = env.resolve()?;
        Ok(fresh_session(&oracles, game_seed, 0, 0))
    }

    pub fn state(&self) -> &SessionState {
        self.state
    }

    /// Applies a command.
    ///
    /// On rejection the state is untouched, except that narrated rejections
    /// (see [`CommandError::is_narrated`]) replace the status line.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        command: &Command,
    ) -> Result<ExecutionOutcome, CommandError> {
        let oracles = env.resolve()?;
        let before = self.state.clone();

        match self.dispatch(&oracles, command) {
            Ok((report, next_stage)) => Ok(ExecutionOutcome {
                delta: SessionDelta::from_states(&before, self.state),
                report,
                next_stage,
            }),
            Err(error) => {
                if error.is_narrated() {
                    self.state.set_message(error.to_string());
                }
                Err(error)
            }
        }
    }

    fn dispatch(
        &mut self,
        oracles: &Oracles<'_>,
        command: &Command,
    ) -> Result<(CommandReport, Option<StageTicket>), CommandError> {
        let state = &mut *self.state;
        let report = match command {
            Command::SubmitMove(player_move) => {
                let enemy_move = combat::submit_move(state, oracles, *player_move)?;
                let ticket = StageTicket::new(state.turn_token, Stage::Resolve);
                return Ok((
                    CommandReport::MoveSubmitted {
                        player_move: *player_move,
                        enemy_move,
                    },
                    Some(ticket),
                ));
            }
            Command::AdvanceStage(ticket) => {
                ensure_current(state, ticket)?;
                match ticket.stage {
                    Stage::Resolve => {
                        let turn = combat::resolve_turn(state, oracles)?;
                        let next = StageTicket::new(ticket.token, Stage::Settle);
                        return Ok((CommandReport::TurnResolved(turn), Some(next)));
                    }
                    Stage::Settle => CommandReport::TurnSettled {
                        verdict: combat::settle_turn(state, oracles)?,
                    },
                }
            }
            Command::ToggleBurst => CommandReport::BurstToggled {
                armed: combat::toggle_burst(state)?,
            },
            Command::ReturnToExploration => {
                combat::return_to_exploration(state)?;
                CommandReport::ReturnedToExploration
            }
            Command::Step { dx, dy } => {
                CommandReport::Moved(explore::step(state, oracles, *dx, *dy)?)
            }
            Command::ProposeMove(proposal) => {
                CommandReport::Moved(explore::propose_move(state, oracles, proposal.clone())?)
            }
            Command::ToggleEquip(id) => {
                CommandReport::Equipment(explore::toggle_equip(state, oracles.items, id)?)
            }
            Command::Unequip(id) => {
                CommandReport::Equipment(explore::unequip(state, oracles.items, id)?)
            }
            Command::SetEncountersEnabled(enabled) => {
                state.run.encounters_enabled = *enabled;
                CommandReport::EncountersToggled { enabled: *enabled }
            }
            Command::GrantKeyItem(id) => {
                let newly = state.run.key_items.insert(id.clone());
                if newly {
                    let name = oracles
                        .items
                        .key_item(id)
                        .map_or(id.as_str(), |item| item.name.as_str());
                    state.set_message(format!("Received {name}."));
                }
                CommandReport::KeyItemGranted {
                    id: id.clone(),
                    newly,
                }
            }
            Command::SetEventFlag(name) => CommandReport::FlagSet {
                name: name.clone(),
                newly: state.run.flags.set(name.as_str()),
            },
            Command::Reset => {
                reset(state, oracles);
                CommandReport::Reset
            }
        };
        Ok((report, None))
    }
}

/// Discards stages scheduled for an earlier turn or a phase already left.
fn ensure_current(state: &SessionState, ticket: &StageTicket) -> Result<(), CommandError> {
    let current = state.in_combat()
        && state.turn_token == ticket.token
        && state.phase == ticket.stage.expected_phase()
        && state.combat.verdict.is_none();
    if current {
        Ok(())
    } else {
        Err(CommandError::StaleStage {
            stage: ticket.stage,
            token: ticket.token,
        })
    }
}

/// Restores every default. The seed and draw count carry over so a reset run
/// does not replay the same rolls; the turn token moves on so pending stages
/// of the old run go stale.
fn reset(state: &mut SessionState, oracles: &Oracles<'_>) {
    let token = state.turn_token.wrapping_add(1);
    *state = fresh_session(oracles, state.game_seed, state.nonce, token);
}

fn fresh_session(
    oracles: &Oracles<'_>,
    game_seed: u64,
    nonce: u64,
    turn_token: u64,
) -> SessionState {
    let character = oracles.roster.player_character();
    let mut fresh = SessionState::new(game_seed, oracles.config, character);
    fresh.nonce = nonce;
    fresh.turn_token = turn_token;
    if let Some(enemy) = oracles.roster.enemy(0) {
        fresh.combat = CombatState::for_encounter(0, enemy.base_hp, 1.0);
    }
    fresh.combat.telegraph = Some(combat::roll_telegraph(&mut fresh.roller(oracles.rng)));
    fresh
}
