//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, configuration and rejected
//! commands so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{CommandError, ErrorSeverity, GameError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("failed to initialize session state from oracles")]
    InitialState(#[source] CommandError),

    #[error("combat stages are scheduled by the runtime")]
    StageFromClient,

    #[error("invalid value {value:?} for {name}")]
    InvalidEnv { name: &'static str, value: String },

    /// The session refused the command. Its text is the status line when narrated.
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Command(error) => error.severity(),
            RuntimeError::StageFromClient | RuntimeError::InvalidEnv { .. } => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Fatal,
        }
    }
}
