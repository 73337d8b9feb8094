//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive a session.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::info;

use game_content::Content;
use game_core::{GameEngine, SessionState};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::workers::{Command, SimulationWorker, StageDelays, StageScheduler};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Fixed session seed. `None` draws a fresh one per runtime.
    pub seed: Option<u64>,
    /// Overrides the content's resolve delay.
    pub resolve_delay: Option<Duration>,
    /// Overrides the content's settle delay.
    pub settle_delay: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
            resolve_delay: None,
            settle_delay: None,
        }
    }
}

impl RuntimeConfig {
    pub const ENV_SEED: &'static str = "TRINITY_SEED";
    pub const ENV_RESOLVE_DELAY_MS: &'static str = "TRINITY_RESOLVE_DELAY_MS";
    pub const ENV_SETTLE_DELAY_MS: &'static str = "TRINITY_SETTLE_DELAY_MS";
    pub const ENV_EVENT_BUFFER: &'static str = "TRINITY_EVENT_BUFFER";
    pub const ENV_COMMAND_BUFFER: &'static str = "TRINITY_COMMAND_BUFFER";

    /// Reads `TRINITY_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source. Unset variables keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let parse = |name: &'static str| -> Result<Option<u64>> {
            match lookup(name) {
                None => Ok(None),
                Some(value) => value
                    .trim()
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|_| RuntimeError::InvalidEnv { name, value }),
            }
        };

        let defaults = Self::default();
        Ok(Self {
            event_buffer_size: parse(Self::ENV_EVENT_BUFFER)?
                .map_or(defaults.event_buffer_size, |size| size.max(1) as usize),
            command_buffer_size: parse(Self::ENV_COMMAND_BUFFER)?
                .map_or(defaults.command_buffer_size, |size| size.max(1) as usize),
            seed: parse(Self::ENV_SEED)?,
            resolve_delay: parse(Self::ENV_RESOLVE_DELAY_MS)?.map(Duration::from_millis),
            settle_delay: parse(Self::ENV_SETTLE_DELAY_MS)?.map(Duration::from_millis),
        })
    }
}

/// Main runtime that owns a live session.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients. Dropping the
/// runtime stops the worker.
pub struct Runtime {
    handle: RuntimeHandle,
    shutdown_tx: oneshot::Sender<()>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Starts a session over loaded content.
    pub async fn start(content: Content, config: RuntimeConfig) -> Result<Self> {
        Self::builder()
            .config(config)
            .oracles(OracleManager::from_content(content))
            .build()
            .await
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Stops the worker and waits for it to finish.
    ///
    /// Handles still held elsewhere fail with
    /// [`RuntimeError::CommandChannelClosed`] afterwards.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        // The worker may already be gone; joining reports that.
        let _ = self.shutdown_tx.send(());

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<SessionState>,
    oracles: Option<OracleManager>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            oracles: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Resume from an existing session instead of starting a new one.
    pub fn initial_state(mut self, state: SessionState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;

        let initial_state = match self.state {
            Some(state) => state,
            None => {
                let seed = self.config.seed.unwrap_or_else(rand::random);
                GameEngine::new_session(oracles.as_game_env(), seed)
                    .map_err(RuntimeError::InitialState)?
            }
        };

        let game_config = oracles.config();
        let delays = StageDelays {
            resolve: self
                .config
                .resolve_delay
                .unwrap_or(Duration::from_millis(game_config.resolve_delay_ms)),
            settle: self
                .config
                .settle_delay
                .unwrap_or(Duration::from_millis(game_config.settle_delay_ms)),
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let scheduler = StageScheduler::new(command_tx.downgrade(), delays);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        info!(
            target: "runtime",
            seed = initial_state.game_seed,
            resolve_ms = delays.resolve.as_millis() as u64,
            settle_ms = delays.settle.as_millis() as u64,
            "runtime starting"
        );

        let sim_worker = SimulationWorker::new(
            initial_state,
            oracles,
            command_rx,
            shutdown_rx,
            event_bus,
            scheduler,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            shutdown_tx,
            sim_worker_handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn unset_environment_keeps_defaults() {
        let config = RuntimeConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn environment_overrides_seed_and_delays() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("TRINITY_SEED", "42"),
            ("TRINITY_RESOLVE_DELAY_MS", " 5 "),
            ("TRINITY_SETTLE_DELAY_MS", "0"),
            ("TRINITY_COMMAND_BUFFER", "0"),
        ]))
        .expect("config");

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.resolve_delay, Some(Duration::from_millis(5)));
        assert_eq!(config.settle_delay, Some(Duration::ZERO));
        assert_eq!(config.command_buffer_size, 1);
        assert_eq!(config.event_buffer_size, 100);
    }

    #[test]
    fn malformed_variable_is_reported() {
        let error = RuntimeConfig::from_lookup(lookup(&[("TRINITY_SEED", "lucky")]))
            .expect_err("bad seed");
        assert!(matches!(
            error,
            RuntimeError::InvalidEnv { name: "TRINITY_SEED", ref value } if value == "lucky"
        ));
    }
}
