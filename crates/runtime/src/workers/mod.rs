//! Background tasks owned by the runtime.
//!
//! The simulation worker owns the session; the stage scheduler feeds timed
//! combat stages back into it through the same command channel.
mod scheduler;
mod simulation;

pub(crate) use scheduler::{StageDelays, StageScheduler};
pub(crate) use simulation::{Command, SimulationWorker};
