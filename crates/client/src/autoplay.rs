//! A bounded, rule-driven player.
//!
//! Each iteration reads the session, picks one [`Plan`] and performs it
//! through the [`RuntimeHandle`]. Exploration walks an expanding square
//! around the current spot; combat counters the telegraph, arms the burst as
//! soon as it is full, returns to the field after a victory and resets after
//! a defeat.

use std::time::Duration;

use anyhow::{Result, bail};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use game_core::{
    CombatPhase, CommandReport, Mode, MoveReport, MoveType, Position, SessionState, Verdict,
    ZoneId,
};
use runtime::{CombatEvent, Event, RuntimeError, RuntimeHandle, Topic};

use crate::config::ClientConfig;

/// Longest wait for a scheduled turn to settle before giving up.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

/// The next thing the autoplay does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plan {
    Step { dx: i32, dy: i32 },
    ArmBurst,
    Submit(MoveType),
    /// A turn is in flight.
    AwaitSettle,
    Return,
    Reset,
}

/// Chooses the next action for `state`.
pub fn plan(state: &SessionState, wanderer: &Wanderer) -> Plan {
    if state.is_exploring() {
        let (dx, dy) = wanderer.heading();
        return Plan::Step { dx, dy };
    }

    match state.combat.verdict {
        Some(Verdict::Victory) => return Plan::Return,
        Some(Verdict::Defeat) => return Plan::Reset,
        None => {}
    }
    if state.phase != CombatPhase::AwaitingCommand {
        return Plan::AwaitSettle;
    }
    if state.combat.is_burst_full() && !state.combat.burst_armed {
        return Plan::ArmBurst;
    }
    let counter = state
        .combat
        .telegraph
        .map_or(MoveType::Rock, MoveType::beaten_by);
    Plan::Submit(counter)
}

const HEADINGS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
const LONGEST_LEG: u32 = 8;

/// Walks legs of growing length, turning clockwise after each leg or wall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wanderer {
    heading: usize,
    leg: u32,
    remaining: u32,
}

impl Default for Wanderer {
    fn default() -> Self {
        Self {
            heading: 0,
            leg: 1,
            remaining: 1,
        }
    }
}

impl Wanderer {
    pub fn heading(&self) -> (i32, i32) {
        HEADINGS[self.heading]
    }

    /// Records an accepted step.
    pub fn advance(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.heading = (self.heading + 1) % HEADINGS.len();
            self.leg = if self.leg >= LONGEST_LEG { 1 } else { self.leg + 1 };
            self.remaining = self.leg;
        }
    }

    /// Records a refused step.
    pub fn blocked(&mut self) {
        self.heading = (self.heading + 1) % HEADINGS.len();
        self.remaining = self.leg;
    }
}

/// Tallies of what the autoplay did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AutoplayReport {
    pub actions: usize,
    pub steps: usize,
    pub rejections: usize,
    pub encounters: usize,
    pub victories: usize,
    pub defeats: usize,
}

#[derive(Serialize)]
struct Summary<'a> {
    mode: Mode,
    zone: ZoneId,
    position: Position,
    hp: u32,
    max_hp: u32,
    level: u32,
    exp: u32,
    story_stage: u32,
    quest: &'a str,
    defeated: usize,
    key_items: usize,
    message: &'a str,
}

impl<'a> From<&'a SessionState> for Summary<'a> {
    fn from(state: &'a SessionState) -> Self {
        Self {
            mode: state.mode,
            zone: state.zone,
            position: state.player.position,
            hp: state.player.hp,
            max_hp: state.player.max_hp,
            level: state.player.level,
            exp: state.player.exp,
            story_stage: state.run.story_stage,
            quest: &state.run.quest,
            defeated: state.run.defeated.len(),
            key_items: state.run.key_items.len(),
            message: &state.message,
        }
    }
}

fn log_summary(state: &SessionState) -> Result<()> {
    let summary = serde_json::to_string(&Summary::from(state))?;
    info!(target: "client::autoplay", %summary, "session");
    Ok(())
}

/// Drives a session through a [`RuntimeHandle`] until the action budget runs out.
pub struct Autoplay {
    handle: RuntimeHandle,
    config: ClientConfig,
    wanderer: Wanderer,
    combat_rx: broadcast::Receiver<Event>,
}

impl Autoplay {
    pub fn new(handle: RuntimeHandle, config: ClientConfig) -> Self {
        let combat_rx = handle.subscribe(Topic::Combat);
        Self {
            handle,
            config,
            wanderer: Wanderer::default(),
            combat_rx,
        }
    }

    pub async fn run(mut self) -> Result<AutoplayReport> {
        let mut report = AutoplayReport::default();
        let every = self.config.summary_every.max(1);

        while report.actions < self.config.max_actions {
            let state = self.handle.query_state().await?;
            if report.actions % every == 0 {
                log_summary(&state)?;
            }
            let plan = plan(&state, &self.wanderer);
            debug!(target: "client::autoplay", ?plan, "next");
            self.perform(plan, &mut report).await?;
        }

        log_summary(&self.handle.query_state().await?)?;
        Ok(report)
    }

    async fn perform(&mut self, plan: Plan, report: &mut AutoplayReport) -> Result<()> {
        if plan != Plan::AwaitSettle {
            report.actions += 1;
        }
        match plan {
            Plan::Step { dx, dy } => match self.handle.step(dx, dy).await {
                Ok(outcome) => {
                    report.steps += 1;
                    self.wanderer.advance();
                    if let CommandReport::Moved(MoveReport::Encounter { .. }) = outcome.report {
                        report.encounters += 1;
                    }
                }
                Err(RuntimeError::Command(error)) => {
                    report.rejections += 1;
                    debug!(target: "client::autoplay", %error, "step refused");
                    self.wanderer.blocked();
                }
                Err(error) => return Err(error.into()),
            },
            Plan::ArmBurst => {
                self.handle.toggle_burst().await?;
            }
            Plan::Submit(player_move) => {
                self.handle.submit_move(player_move).await?;
                self.await_settle(report).await?;
            }
            Plan::AwaitSettle => self.await_settle(report).await?,
            Plan::Return => {
                self.handle.return_to_exploration().await?;
            }
            Plan::Reset => {
                self.handle.reset().await?;
                self.wanderer = Wanderer::default();
            }
        }
        Ok(())
    }

    /// Consumes combat events until the in-flight turn settles.
    async fn await_settle(&mut self, report: &mut AutoplayReport) -> Result<()> {
        loop {
            let received = tokio::time::timeout(SETTLE_TIMEOUT, self.combat_rx.recv()).await;
            let event = match received {
                Ok(Ok(event)) => event,
                Ok(Err(RecvError::Lagged(missed))) => {
                    // The next state query shows where the turn ended up.
                    warn!(target: "client::autoplay", missed, "combat events lagged");
                    return Ok(());
                }
                Ok(Err(RecvError::Closed)) => bail!("combat event stream closed"),
                Err(_) => bail!("turn did not settle within {:?}", SETTLE_TIMEOUT),
            };

            debug!(target: "client::autoplay", event = %serde_json::to_string(&event)?, "combat");
            if let Event::Combat(CombatEvent::TurnSettled { verdict }) = event {
                match verdict {
                    Some(Verdict::Victory) => report.victories += 1,
                    Some(Verdict::Defeat) => report.defeats += 1,
                    None => {}
                }
                return Ok(());
            }
        }
    }
}
