//! In-memory content tables.
//!
//! These are the shapes the loaders produce and the runtime oracles serve.
//! They hold no session state and never change after loading.

use std::collections::BTreeMap;

use game_core::{
    CharacterTemplate, EnemyTemplate, GameConfig, GateSpec, ItemTemplate, KeyItem, MapDimensions,
    NpcTemplate, Position, SealSpec, TileKind, ZoneId,
};

/// The player character and the enemy roster, in encounter-index order.
#[derive(Clone, Debug, PartialEq)]
pub struct Roster {
    pub player: CharacterTemplate,
    pub enemies: Vec<EnemyTemplate>,
}

/// Equippable items and key items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemCatalog {
    pub items: Vec<ItemTemplate>,
    pub key_items: Vec<KeyItem>,
}

/// One zone's tile grid, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneGrid {
    zone: ZoneId,
    dimensions: MapDimensions,
    tiles: Vec<TileKind>,
}

impl ZoneGrid {
    /// Returns `None` when `tiles` does not cover `dimensions` exactly.
    pub fn new(zone: ZoneId, dimensions: MapDimensions, tiles: Vec<TileKind>) -> Option<Self> {
        let expected = dimensions.width as usize * dimensions.height as usize;
        (tiles.len() == expected).then_some(Self {
            zone,
            dimensions,
            tiles,
        })
    }

    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn tile(&self, position: Position) -> Option<TileKind> {
        if !self.dimensions.contains(position) {
            return None;
        }
        let index = position.y as usize * self.dimensions.width as usize + position.x as usize;
        self.tiles.get(index).copied()
    }

    /// Positions of every tile matching `kind`.
    pub fn find(&self, kind: TileKind) -> impl Iterator<Item = Position> + '_ {
        let width = self.dimensions.width as usize;
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, tile)| **tile == kind)
            .map(move |(index, _)| Position::new((index % width) as i32, (index / width) as i32))
    }
}

/// Every zone grid plus the gate and seal rules placed on them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZoneAtlas {
    pub grids: BTreeMap<ZoneId, ZoneGrid>,
    pub gates: Vec<GateSpec>,
    pub seals: Vec<SealSpec>,
}

impl ZoneAtlas {
    pub fn grid(&self, zone: ZoneId) -> Option<&ZoneGrid> {
        self.grids.get(&zone)
    }

    pub fn gate(&self, destination: ZoneId) -> Option<&GateSpec> {
        self.gates.iter().find(|gate| gate.destination == destination)
    }

    pub fn seal(&self, zone: ZoneId, position: Position) -> Option<&SealSpec> {
        self.seals
            .iter()
            .find(|seal| seal.zone == zone && seal.position == position)
    }
}

/// Everything a session needs, loaded in one piece.
#[derive(Clone, Debug, PartialEq)]
pub struct Content {
    pub config: GameConfig,
    pub roster: Roster,
    pub items: ItemCatalog,
    pub npcs: Vec<NpcTemplate>,
    pub zones: ZoneAtlas,
}
