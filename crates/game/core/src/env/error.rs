//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Required static data is missing or inconsistent.
///
/// These only surface while assembling an environment. Once a session runs,
/// lookups clamp or fall back instead of failing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("ZoneOracle not available")]
    ZonesNotAvailable,

    #[error("RosterOracle not available")]
    RosterNotAvailable,

    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    #[error("NpcOracle not available")]
    NpcsNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    #[error("GameConfig not available")]
    ConfigNotAvailable,

    #[error("enemy roster is empty")]
    EmptyRoster,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            ZonesNotAvailable | RosterNotAvailable | ItemsNotAvailable | NpcsNotAvailable
            | RngNotAvailable | ConfigNotAvailable => ErrorSeverity::Fatal,
            EmptyRoster => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ZonesNotAvailable => "ORACLE_ZONES_NOT_AVAILABLE",
            RosterNotAvailable => "ORACLE_ROSTER_NOT_AVAILABLE",
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            NpcsNotAvailable => "ORACLE_NPCS_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            EmptyRoster => "ORACLE_EMPTY_ROSTER",
        }
    }
}
