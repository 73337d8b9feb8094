use crate::combat::TurnReport;
use crate::explore::{EquipChange, MoveProposal, MoveReport};
use crate::state::{ItemId, KeyItemId, MoveType, Verdict};

use super::stage::StageTicket;

/// Every operation a presentation layer (or the stage scheduler) can request.
#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Command {
    SubmitMove(MoveType),
    /// Issued by the scheduler once a stage delay has elapsed.
    AdvanceStage(StageTicket),
    ToggleBurst,
    /// Move with tile and NPC lookups done by the session.
    Step { dx: i32, dy: i32 },
    /// Move with lookups already done by the caller.
    ProposeMove(MoveProposal),
    ReturnToExploration,
    ToggleEquip(ItemId),
    Unequip(ItemId),
    SetEncountersEnabled(bool),
    GrantKeyItem(KeyItemId),
    SetEventFlag(String),
    Reset,
}

impl Command {
    /// Stage advances come from the scheduler, not from the player.
    pub fn is_stage(&self) -> bool {
        matches!(self, Command::AdvanceStage(_))
    }
}

/// Command-specific result of [`GameEngine::execute`](super::GameEngine::execute).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CommandReport {
    MoveSubmitted {
        player_move: MoveType,
        enemy_move: MoveType,
    },
    TurnResolved(TurnReport),
    /// `verdict` is set when the battle ended on this turn.
    TurnSettled { verdict: Option<Verdict> },
    BurstToggled { armed: bool },
    ReturnedToExploration,
    Moved(MoveReport),
    Equipment(EquipChange),
    EncountersToggled { enabled: bool },
    KeyItemGranted { id: KeyItemId, newly: bool },
    FlagSet { name: String, newly: bool },
    Reset,
}
