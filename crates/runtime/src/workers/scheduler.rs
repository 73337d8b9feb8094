//! Timer tasks for the deferred combat stages.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use game_core::{Stage, StageTicket};

use super::simulation::Command;

/// How long each stage waits after the previous step of the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct StageDelays {
    pub resolve: Duration,
    pub settle: Duration,
}

impl StageDelays {
    pub fn for_stage(&self, stage: Stage) -> Duration {
        match stage {
            Stage::Resolve => self.resolve,
            Stage::Settle => self.settle,
        }
    }
}

/// Sleeps on each ticket, then hands it back to the worker.
///
/// Holds only a weak sender so pending timers never keep the worker alive.
/// Tickets are not cancelled when the turn moves on; the engine discards
/// them as stale when they arrive.
pub(crate) struct StageScheduler {
    command_tx: mpsc::WeakSender<Command>,
    delays: StageDelays,
}

impl StageScheduler {
    pub fn new(command_tx: mpsc::WeakSender<Command>, delays: StageDelays) -> Self {
        Self { command_tx, delays }
    }

    pub fn schedule(&self, ticket: StageTicket) {
        let delay = self.delays.for_stage(ticket.stage);
        let command_tx = self.command_tx.clone();
        trace!(
            target: "runtime::scheduler",
            stage = %ticket.stage,
            token = ticket.token,
            delay_ms = delay.as_millis() as u64,
            "stage scheduled"
        );

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(command_tx) = command_tx.upgrade() else {
                debug!(target: "runtime::scheduler", stage = %ticket.stage, "runtime gone, dropping stage");
                return;
            };
            if command_tx.send(Command::AdvanceStage { ticket }).await.is_err() {
                debug!(target: "runtime::scheduler", stage = %ticket.stage, "worker stopped, dropping stage");
            }
        });
    }
}
