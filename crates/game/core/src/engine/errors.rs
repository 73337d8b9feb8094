//! Rejected commands.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CombatPhase, ItemId};

use super::stage::Stage;

/// Why a command was not applied.
///
/// Rejections are values, never faults. Narrated variants (see
/// [`CommandError::is_narrated`]) become the session's status line through
/// their `Display` text; the engine writes nothing else for them. Silent
/// variants leave the state untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("Path ends here.")]
    OutOfBounds,

    #[error("Blocked.")]
    Blocked,

    /// Someone stands on the destination tile.
    #[error("{line}")]
    NpcBlocking { line: String },

    #[error("{message}")]
    GateLocked { message: String },

    #[error("{message}")]
    SealLocked { message: String },

    #[error("Equip slots are full ({max} max).")]
    EquipSlotsFull { max: usize },

    #[error("Unknown item: {0}.")]
    UnknownItem(ItemId),

    #[error("not in combat")]
    NotInCombat,

    #[error("not exploring")]
    NotExploring,

    #[error("expected phase {expected}, found {actual}")]
    PhaseMismatch {
        expected: CombatPhase,
        actual: CombatPhase,
    },

    #[error("burst gauge not full ({burst}/100)")]
    BurstNotCharged { burst: u32 },

    #[error("battle is not won")]
    BattleNotWon,

    #[error("no movement")]
    NoMovement,

    /// A deferred stage outlived the turn it was scheduled for.
    #[error("stale {stage} stage for turn {token}")]
    StaleStage { stage: Stage, token: u64 },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl CommandError {
    /// True when the rejection is reported to the player as the status line.
    pub fn is_narrated(&self) -> bool {
        matches!(
            self,
            CommandError::OutOfBounds
                | CommandError::Blocked
                | CommandError::NpcBlocking { .. }
                | CommandError::GateLocked { .. }
                | CommandError::SealLocked { .. }
                | CommandError::EquipSlotsFull { .. }
                | CommandError::UnknownItem(_)
        )
    }
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CommandError::Oracle(error) => error.severity(),
            error if error.is_narrated() => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            OutOfBounds => "COMMAND_OUT_OF_BOUNDS",
            Blocked => "COMMAND_BLOCKED",
            NpcBlocking { .. } => "COMMAND_NPC_BLOCKING",
            GateLocked { .. } => "COMMAND_GATE_LOCKED",
            SealLocked { .. } => "COMMAND_SEAL_LOCKED",
            EquipSlotsFull { .. } => "COMMAND_EQUIP_SLOTS_FULL",
            UnknownItem(_) => "COMMAND_UNKNOWN_ITEM",
            NotInCombat => "COMMAND_NOT_IN_COMBAT",
            NotExploring => "COMMAND_NOT_EXPLORING",
            PhaseMismatch { .. } => "COMMAND_PHASE_MISMATCH",
            BurstNotCharged { .. } => "COMMAND_BURST_NOT_CHARGED",
            BattleNotWon => "COMMAND_BATTLE_NOT_WON",
            NoMovement => "COMMAND_NO_MOVEMENT",
            StaleStage { .. } => "COMMAND_STALE_STAGE",
            Oracle(error) => error.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrated_rejections_render_status_lines() {
        assert_eq!(CommandError::OutOfBounds.to_string(), "Path ends here.");
        assert_eq!(
            CommandError::EquipSlotsFull { max: 3 }.to_string(),
            "Equip slots are full (3 max)."
        );
        assert!(CommandError::Blocked.is_narrated());
        assert!(!CommandError::NotInCombat.is_narrated());
    }

    #[test]
    fn severities_follow_narration() {
        assert_eq!(CommandError::Blocked.severity(), ErrorSeverity::Recoverable);
        assert_eq!(CommandError::BattleNotWon.severity(), ErrorSeverity::Validation);
        assert_eq!(
            CommandError::Oracle(OracleError::EmptyRoster).severity(),
            ErrorSeverity::Validation
        );
        assert_eq!(
            CommandError::Oracle(OracleError::RngNotAvailable).severity(),
            ErrorSeverity::Fatal
        );
    }
}
