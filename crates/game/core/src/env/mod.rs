//! Traits describing read-only content.
//!
//! Oracles expose zone grids, the enemy roster, item tables, NPC placements
//! and the random source. [`GameEnv`] bundles them with the [`GameConfig`] so
//! the engine can reach everything it needs without coupling to concrete
//! implementations.
mod error;
mod items;
mod npc;
mod rng;
mod roster;
mod zones;

pub use error::OracleError;
pub use items::{ItemOracle, ItemTemplate, KeyItem};
pub use npc::{NpcOracle, NpcTemplate};
pub use rng::{FixedRng, PcgRng, RngOracle, Roller, SequenceRng, clamp, compute_seed, pick_weighted};
pub use roster::{CharacterTemplate, EnemyTemplate, RosterOracle};
pub use zones::{GateSpec, MapDimensions, SealSpec, TileKind, ZoneOracle};

use crate::config::GameConfig;

/// Aggregates the read-only oracles required by the engine.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    zones: Option<&'a dyn ZoneOracle>,
    roster: Option<&'a dyn RosterOracle>,
    items: Option<&'a dyn ItemOracle>,
    npcs: Option<&'a dyn NpcOracle>,
    rng: Option<&'a dyn RngOracle>,
    config: Option<&'a GameConfig>,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        zones: Option<&'a dyn ZoneOracle>,
        roster: Option<&'a dyn RosterOracle>,
        items: Option<&'a dyn ItemOracle>,
        npcs: Option<&'a dyn NpcOracle>,
        rng: Option<&'a dyn RngOracle>,
        config: Option<&'a GameConfig>,
    ) -> Self {
        Self {
            zones,
            roster,
            items,
            npcs,
            rng,
            config,
        }
    }

    pub fn with_all(
        zones: &'a dyn ZoneOracle,
        roster: &'a dyn RosterOracle,
        items: &'a dyn ItemOracle,
        npcs: &'a dyn NpcOracle,
        rng: &'a dyn RngOracle,
        config: &'a GameConfig,
    ) -> Self {
        Self::new(
            Some(zones),
            Some(roster),
            Some(items),
            Some(npcs),
            Some(rng),
            Some(config),
        )
    }

    pub fn empty() -> Self {
        Self {
            zones: None,
            roster: None,
            items: None,
            npcs: None,
            rng: None,
            config: None,
        }
    }

    /// Returns a copy that draws from `rng` instead.
    pub fn with_rng(mut self, rng: &'a dyn RngOracle) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn zones(&self) -> Result<&'a dyn ZoneOracle, OracleError> {
        self.zones.ok_or(OracleError::ZonesNotAvailable)
    }

    pub fn roster(&self) -> Result<&'a dyn RosterOracle, OracleError> {
        self.roster.ok_or(OracleError::RosterNotAvailable)
    }

    pub fn items(&self) -> Result<&'a dyn ItemOracle, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    pub fn npcs(&self) -> Result<&'a dyn NpcOracle, OracleError> {
        self.npcs.ok_or(OracleError::NpcsNotAvailable)
    }

    pub fn rng(&self) -> Result<&'a dyn RngOracle, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    pub fn config(&self) -> Result<&'a GameConfig, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Resolves every oracle at once.
    ///
    /// The engine resolves once per command so the rules below it work with a
    /// complete [`Oracles`] bundle instead of optional lookups.
    pub fn resolve(&self) -> Result<Oracles<'a>, OracleError> {
        let roster = self.roster()?;
        if roster.enemy_count() == 0 {
            return Err(OracleError::EmptyRoster);
        }
        Ok(Oracles {
            zones: self.zones()?,
            roster,
            items: self.items()?,
            npcs: self.npcs()?,
            rng: self.rng()?,
            config: self.config()?,
        })
    }
}

/// A fully populated environment. Produced by [`GameEnv::resolve`].
#[derive(Clone, Copy)]
pub struct Oracles<'a> {
    pub zones: &'a dyn ZoneOracle,
    pub roster: &'a dyn RosterOracle,
    pub items: &'a dyn ItemOracle,
    pub npcs: &'a dyn NpcOracle,
    pub rng: &'a dyn RngOracle,
    pub config: &'a GameConfig,
}
