//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers one async helper per
//! session command, plus event streaming for specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{
    Command as SessionCommand, ExecutionOutcome, ItemId, KeyItemId, MoveProposal, MoveType,
    SessionState,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Runs any client command against the session.
    ///
    /// Rejections come back as [`RuntimeError::Command`]. Stage advances are
    /// owned by the runtime's scheduler and refused here.
    pub async fn execute(&self, command: SessionCommand) -> Result<ExecutionOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Execute {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Commits the player's move. The turn then resolves and settles on its own.
    pub async fn submit_move(&self, player_move: MoveType) -> Result<ExecutionOutcome> {
        self.execute(SessionCommand::SubmitMove(player_move)).await
    }

    pub async fn toggle_burst(&self) -> Result<ExecutionOutcome> {
        self.execute(SessionCommand::ToggleBurst).await
    }

    /// Moves one tile, letting the session look up the destination.
    pub async fn step(&self, dx: i32, dy: i32) -> Result<ExecutionOutcome> {
        self.execute(SessionCommand::Step { dx, dy }).await
    }

    /// Moves one tile using the caller's own lookup of the destination.
    pub async fn propose_move(&self, proposal: MoveProposal) -> Result<ExecutionOutcome> {
        self.execute(SessionCommand::ProposeMove(proposal)).await
    }

    pub async fn return_to_exploration(&self) -> Result<ExecutionOutcome> {
        self.execute(SessionCommand::ReturnToExploration).await
    }

    pub async fn toggle_equip(&self, item: impl Into<ItemId>) -> Result<ExecutionOutcome> {
        self.execute(SessionCommand::ToggleEquip(item.into())).await
    }

    pub async fn unequip(&self, item: impl Into<ItemId>) -> Result<ExecutionOutcome> {
        self.execute(SessionCommand::Unequip(item.into())).await
    }

    pub async fn set_encounters_enabled(&self, enabled: bool) -> Result<ExecutionOutcome> {
        self.execute(SessionCommand::SetEncountersEnabled(enabled)).await
    }

    pub async fn grant_key_item(&self, key: impl Into<KeyItemId>) -> Result<ExecutionOutcome> {
        self.execute(SessionCommand::GrantKeyItem(key.into())).await
    }

    pub async fn set_event_flag(&self, name: impl Into<String>) -> Result<ExecutionOutcome> {
        self.execute(SessionCommand::SetEventFlag(name.into())).await
    }

    /// Starts a new run. Stages still pending from the old one are discarded.
    pub async fn reset(&self) -> Result<ExecutionOutcome> {
        self.execute(SessionCommand::Reset).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Session` - Applied and rejected commands
    /// - `Topic::Combat` - Encounters, turn stages and verdicts
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat_rx.recv().await {
    ///     // Handle combat events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Query the current session state (read-only snapshot)
    pub async fn query_state(&self) -> Result<SessionState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
