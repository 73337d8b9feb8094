//! Simulation worker that owns the authoritative [`SessionState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), executes
//! them via [`GameEngine`], schedules the deferred combat stages and
//! publishes events to the EventBus.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace, warn};

use game_core::{
    Command as SessionCommand, CommandError, CommandReport, ErrorSeverity, ExecutionOutcome,
    GameEngine, GameError, MoveReport, SessionState, StageTicket, Verdict,
};

use super::scheduler::StageScheduler;
use crate::api::{Result, RuntimeError};
use crate::events::{CombatEvent, EventBus, SessionEvent};
use crate::oracle::OracleManager;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Run a session command on behalf of a client.
    Execute {
        command: SessionCommand,
        reply: oneshot::Sender<Result<ExecutionOutcome>>,
    },
    /// A stage delay elapsed. Sent by the scheduler only.
    AdvanceStage { ticket: StageTicket },
    /// Query the current session state (read-only).
    QueryState { reply: oneshot::Sender<SessionState> },
}

/// Background task that processes session commands.
pub struct SimulationWorker {
    state: SessionState,
    oracles: OracleManager,
    command_rx: mpsc::Receiver<Command>,
    shutdown_rx: oneshot::Receiver<()>,
    event_bus: EventBus,
    scheduler: StageScheduler,
}

impl SimulationWorker {
    pub fn new(
        state: SessionState,
        oracles: OracleManager,
        command_rx: mpsc::Receiver<Command>,
        shutdown_rx: oneshot::Receiver<()>,
        event_bus: EventBus,
        scheduler: StageScheduler,
    ) -> Self {
        info!(
            target: "runtime::worker",
            seed = state.game_seed,
            zone = %state.zone,
            "SimulationWorker initialized at {}",
            state.player.position
        );

        Self {
            state,
            oracles,
            command_rx,
            shutdown_rx,
            event_bus,
            scheduler,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                _ = &mut self.shutdown_rx => break,
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        debug!(target: "runtime::worker", "SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Execute { command, reply } => {
                let result = if command.is_stage() {
                    Err(RuntimeError::StageFromClient)
                } else {
                    self.execute(command).map_err(RuntimeError::from)
                };
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Execute reply channel closed (caller dropped)");
                }
            }
            Command::AdvanceStage { ticket } => self.advance_stage(ticket),
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!(target: "runtime::worker", "QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Applies a scheduler ticket. Stale tickets are dropped quietly.
    fn advance_stage(&mut self, ticket: StageTicket) {
        match self.execute(SessionCommand::AdvanceStage(ticket)) {
            Ok(_) => {}
            Err(CommandError::StaleStage { stage, token }) => {
                trace!(
                    target: "runtime::scheduler",
                    %stage,
                    token,
                    current = self.state.turn_token,
                    "discarding stale stage"
                );
                self.event_bus
                    .publish(CombatEvent::StageDiscarded { ticket });
            }
            Err(error) => {
                warn!(target: "runtime::scheduler", stage = %ticket.stage, %error, "stage failed");
            }
        }
    }

    /// The single place the engine runs. Every outcome is published.
    fn execute(
        &mut self,
        command: SessionCommand,
    ) -> std::result::Result<ExecutionOutcome, CommandError> {
        let env = self.oracles.as_game_env();
        let result = GameEngine::new(&mut self.state).execute(env, &command);

        match result {
            Ok(outcome) => {
                self.log_applied(&command, &outcome);
                if let Some(ticket) = outcome.next_stage {
                    self.scheduler.schedule(ticket);
                }
                self.event_bus.publish(SessionEvent::CommandApplied {
                    command,
                    delta: outcome.delta,
                    report: outcome.report.clone(),
                });
                for event in CombatEvent::from_report(&outcome.report) {
                    self.event_bus.publish(event);
                }
                Ok(outcome)
            }
            Err(error) => {
                if !matches!(error, CommandError::StaleStage { .. }) {
                    self.log_rejected(&command, &error);
                    self.event_bus.publish(SessionEvent::CommandRejected {
                        command,
                        reason: error.clone(),
                    });
                }
                Err(error)
            }
        }
    }

    fn log_applied(&self, command: &SessionCommand, outcome: &ExecutionOutcome) {
        match &outcome.report {
            CommandReport::Moved(MoveReport::Encounter { enemy, scale }) => {
                info!(target: "runtime::worker", %enemy, scale, "encounter started");
            }
            CommandReport::TurnResolved(turn) => {
                debug!(
                    target: "runtime::worker",
                    outcome = ?turn.outcome,
                    to_enemy = turn.damage_to_enemy,
                    to_player = turn.damage_to_player,
                    burst = turn.burst_fired,
                    "turn resolved"
                );
            }
            CommandReport::TurnSettled { verdict } => match verdict {
                Some(Verdict::Victory) => {
                    info!(target: "runtime::worker", level = self.state.player.level, "battle won");
                }
                Some(Verdict::Defeat) => {
                    info!(target: "runtime::worker", "battle lost");
                }
                None => debug!(target: "runtime::worker", "turn settled"),
            },
            CommandReport::Moved(MoveReport::ZoneChanged { zone, .. }) => {
                info!(target: "runtime::worker", %zone, "entered zone");
            }
            _ => trace!(
                target: "runtime::worker",
                command = command.as_ref(),
                nonce = self.state.nonce,
                "command applied"
            ),
        }
    }

    fn log_rejected(&self, command: &SessionCommand, error: &CommandError) {
        match error.severity() {
            ErrorSeverity::Fatal => warn!(
                target: "runtime::worker",
                command = command.as_ref(),
                code = error.error_code(),
                %error,
                "command failed"
            ),
            _ => debug!(
                target: "runtime::worker",
                command = command.as_ref(),
                code = error.error_code(),
                %error,
                "command rejected"
            ),
        }
    }
}
