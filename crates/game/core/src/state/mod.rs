//! Authoritative session state.
//!
//! [`SessionState`] is the single source of truth for a run. Runtime layers
//! clone or query it but mutate it exclusively through the engine.
pub mod delta;
pub mod types;

pub use delta::{CombatFields, PlayerFields, RunFields, SessionDelta, SessionFields};
pub use types::{
    BURST_MAX, CombatPhase, CombatState, Difficulty, EnemyId, EquipSlots, EventFlags, ItemId,
    KeyItemId, Mode, MoveType, NpcId, Outcome, PartialTriple, PlayerState, Position, RunState,
    StatTriple, Verdict, ZoneId,
};

use crate::config::GameConfig;
use crate::env::{CharacterTemplate, Roller, RngOracle};

/// Status line shown when a run starts or is reset.
pub const OPENING_MESSAGE: &str = "Explore the field.";

/// Canonical snapshot of one game session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    /// Seed mixed into every random draw. Survives resets.
    pub game_seed: u64,

    /// Number of random draws taken so far. Never rewinds, not even on reset.
    pub nonce: u64,

    /// Identifies the combat turn in flight.
    ///
    /// Bumped whenever a turn enters [`CombatPhase::Resolving`] and on reset.
    /// Deferred stages carry the token they were scheduled with and are
    /// discarded when it no longer matches.
    pub turn_token: u64,

    pub mode: Mode,
    /// Only meaningful while `mode == Mode::InCombat`.
    pub phase: CombatPhase,
    pub zone: ZoneId,
    pub player: PlayerState,
    /// Combat-local data. Stale (not cleared) outside of combat.
    pub combat: CombatState,
    pub run: RunState,
    /// Last user-facing status line.
    pub message: String,
}

impl SessionState {
    /// A fresh run: spawn point on the field, full HP, nothing equipped or earned.
    pub fn new(game_seed: u64, config: &GameConfig, character: &CharacterTemplate) -> Self {
        Self {
            game_seed,
            nonce: 0,
            turn_token: 0,
            mode: Mode::Exploring,
            phase: CombatPhase::AwaitingCommand,
            zone: ZoneId::Field,
            player: PlayerState::new(
                config.spawn,
                character.base_hp,
                config.level_curve.initial_threshold,
            ),
            combat: CombatState::default(),
            run: RunState::new(config.spawn, config.opening_quest.as_str()),
            message: OPENING_MESSAGE.to_owned(),
        }
    }

    pub fn in_combat(&self) -> bool {
        self.mode == Mode::InCombat
    }

    pub fn is_exploring(&self) -> bool {
        self.mode == Mode::Exploring
    }

    /// Combat phase, or `None` while exploring.
    pub fn combat_phase(&self) -> Option<CombatPhase> {
        self.in_combat().then_some(self.phase)
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Random draws seeded from this session. Each draw advances `nonce`.
    pub fn roller<'s>(&'s mut self, rng: &'s dyn RngOracle) -> Roller<'s> {
        Roller::new(rng, self.game_seed, &mut self.nonce)
    }
}
