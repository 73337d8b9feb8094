//! Common error infrastructure for game-core.
//!
//! Domain errors ([`crate::engine::CommandError`], [`crate::env::OracleError`])
//! live next to the code that raises them and share the classification below.

/// Severity level of an error, used for categorization and logging.
///
/// - **Recoverable**: the command was refused in the current situation and may
///   succeed later (walking into a wall, a locked gate, a full equip set)
/// - **Validation**: the command makes no sense in the current mode or phase
/// - **Fatal**: static data is missing and no session can run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }
}

/// Common trait for all game-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for the `Display` impl
/// - Classify severity by recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
