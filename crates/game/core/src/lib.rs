//! Deterministic session rules shared by the runtime and tools.
//!
//! `game-core` defines the canonical state machine of a run: overworld
//! exploration, rock-paper-scissors combat, progression and the read-only
//! content it consults. It performs no I/O and owns no clocks. All state
//! mutation flows through [`engine::GameEngine`]; the timed combat stages are
//! scheduled by the caller and re-enter as [`Command::AdvanceStage`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod explore;
pub mod state;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

pub use combat::TurnReport;
pub use config::{DifficultyTuning, EncounterScaling, GameConfig, LevelCurve, TuningTable};
pub use engine::{
    Command, CommandError, CommandReport, ExecutionOutcome, GameEngine, Stage, StageTicket,
};
pub use env::{
    CharacterTemplate, EnemyTemplate, FixedRng, GameEnv, GateSpec, ItemOracle, ItemTemplate,
    KeyItem, MapDimensions, NpcOracle, NpcTemplate, OracleError, Oracles, PcgRng, RngOracle,
    RosterOracle, SealSpec, SequenceRng, TileKind, ZoneOracle, clamp, pick_weighted,
};
pub use error::{ErrorSeverity, GameError};
pub use explore::{EquipChange, MoveProposal, MoveReport};
pub use state::{
    BURST_MAX, CombatPhase, CombatState, Difficulty, EnemyId, EquipSlots, EventFlags, ItemId,
    KeyItemId, Mode, MoveType, NpcId, Outcome, PartialTriple, PlayerState, Position, RunState,
    SessionDelta, SessionState, StatTriple, Verdict, ZoneId,
};
