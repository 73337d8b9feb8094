//! Headless client for a Trinity session.
//!
//! The `trinity` binary is the composition root: it loads configuration and
//! content, starts a [`runtime::Runtime`] and hands its handle to the
//! [`Autoplay`] driver, which plays the session the way a simple player would.

pub mod autoplay;
pub mod config;
pub mod logging;

pub use autoplay::{Autoplay, AutoplayReport, Plan, Wanderer, plan};
pub use config::ClientConfig;
