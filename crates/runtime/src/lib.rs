//! Runtime orchestration for a live game session.
//!
//! This crate wires the static content, the session engine and the timed
//! combat stages into a cohesive async API. Consumers embed [`Runtime`] to
//! issue commands and subscribe to events through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, its builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`oracle`] adapts content tables to the engine's oracle traits
//! - `workers` keeps the simulation task and stage scheduler internal
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{CombatEvent, Event, EventBus, SessionEvent, Topic};
pub use oracle::{ItemOracleImpl, NpcOracleImpl, OracleManager, RosterOracleImpl, ZoneOracleImpl};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
