//! Runtime wrappers around static game content.
//!
//! These implementations expose `game-core` oracle traits over the tables
//! produced by `game-content` and bundle them into an [`OracleManager`] so the
//! runtime can build [`GameEnv`] snapshots on demand. The data never changes
//! at runtime; session state lives in the simulation worker.
mod items;
mod npc;
mod roster;
mod zones;

use std::sync::Arc;

use game_content::Content;
use game_core::{GameConfig, GameEnv, PcgRng, RngOracle};

pub use items::ItemOracleImpl;
pub use npc::NpcOracleImpl;
pub use roster::RosterOracleImpl;
pub use zones::ZoneOracleImpl;

/// Manages all oracle implementations and provides unified access.
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) zones: Arc<ZoneOracleImpl>,
    pub(crate) roster: Arc<RosterOracleImpl>,
    pub(crate) items: Arc<ItemOracleImpl>,
    pub(crate) npcs: Arc<NpcOracleImpl>,
    pub(crate) config: Arc<GameConfig>,
    pub(crate) rng: Arc<dyn RngOracle>,
}

impl OracleManager {
    pub fn new(
        zones: Arc<ZoneOracleImpl>,
        roster: Arc<RosterOracleImpl>,
        items: Arc<ItemOracleImpl>,
        npcs: Arc<NpcOracleImpl>,
        config: Arc<GameConfig>,
    ) -> Self {
        Self {
            zones,
            roster,
            items,
            npcs,
            config,
            rng: Arc::new(PcgRng),
        }
    }

    /// Splits loaded content into one oracle per table.
    pub fn from_content(content: Content) -> Self {
        let Content {
            config,
            roster,
            items,
            npcs,
            zones,
        } = content;
        Self::new(
            Arc::new(ZoneOracleImpl::new(zones)),
            Arc::new(RosterOracleImpl::new(roster)),
            Arc::new(ItemOracleImpl::new(items)),
            Arc::new(NpcOracleImpl::new(npcs)),
            Arc::new(config),
        )
    }

    /// Replaces the random source. Tests use this to script rolls.
    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    /// Converts the oracle manager into a [`GameEnv`] for game-core.
    pub fn as_game_env(&self) -> GameEnv<'_> {
        GameEnv::with_all(
            self.zones.as_ref(),
            self.roster.as_ref(),
            self.items.as_ref(),
            self.npcs.as_ref(),
            self.rng.as_ref(),
            self.config.as_ref(),
        )
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_content::ContentFactory;
    use game_core::{Position, TileKind, ZoneId};

    #[test]
    fn builtin_content_resolves_completely() {
        let content = ContentFactory::builtin().expect("builtin content");
        let oracles = OracleManager::from_content(content);
        let env = oracles.as_game_env();
        let resolved = env.resolve().expect("complete env");

        assert_eq!(resolved.roster.enemy_count(), 3);
        assert_eq!(resolved.config, oracles.config());
        assert_eq!(
            resolved.zones.tile(ZoneId::Field, Position::new(12, 1)),
            Some(TileKind::Gate(ZoneId::Town))
        );
    }
}
