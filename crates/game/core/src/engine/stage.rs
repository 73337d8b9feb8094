use crate::state::CombatPhase;

/// Deferred steps of a combat turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    /// Compute the clash. Runs after the resolve delay.
    Resolve,
    /// Finish the turn or declare the battle over. Runs after the settle delay.
    Settle,
}

impl Stage {
    /// Phase the session must still be in for the stage to apply.
    pub const fn expected_phase(self) -> CombatPhase {
        match self {
            Stage::Resolve => CombatPhase::Resolving,
            Stage::Settle => CombatPhase::ShowingResult,
        }
    }
}

/// Handle for a scheduled stage.
///
/// The scheduler hands it back through [`Command::AdvanceStage`](super::Command::AdvanceStage)
/// once the delay elapses. The engine applies it only if the session is still
/// on the same turn and in the expected phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageTicket {
    pub token: u64,
    pub stage: Stage,
}

impl StageTicket {
    pub const fn new(token: u64, stage: Stage) -> Self {
        Self { token, stage }
    }
}
