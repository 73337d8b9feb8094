//! NPC placements implementing [`game_core::NpcOracle`].
use std::collections::HashMap;

use game_core::{NpcOracle, NpcTemplate, Position, ZoneId};

/// NpcOracle backed by the loaded NPC table, indexed by spot.
pub struct NpcOracleImpl {
    npcs: Vec<NpcTemplate>,
    by_spot: HashMap<(ZoneId, Position), usize>,
}

impl NpcOracleImpl {
    pub fn new(npcs: Vec<NpcTemplate>) -> Self {
        let by_spot = npcs
            .iter()
            .enumerate()
            .map(|(index, npc)| ((npc.zone, npc.position), index))
            .collect();
        Self { npcs, by_spot }
    }
}

impl NpcOracle for NpcOracleImpl {
    fn npc_at(&self, zone: ZoneId, position: Position) -> Option<&NpcTemplate> {
        self.by_spot
            .get(&(zone, position))
            .and_then(|&index| self.npcs.get(index))
    }

    fn npcs(&self) -> &[NpcTemplate] {
        &self.npcs
    }
}
