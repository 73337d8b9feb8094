//! Zone grid loader.
//!
//! Each zone is written as rows of single-character tile codes, top row first.
//! Gate and seal rules live in the same file so their coordinates can be
//! checked against the grids they refer to.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{GateSpec, MapDimensions, Position, SealSpec, TileKind, ZoneId};
use serde::Deserialize;
use strum::IntoEnumIterator;

use crate::loaders::{LoadResult, read_file};
use crate::tables::{ZoneAtlas, ZoneGrid};

#[derive(Debug, Deserialize)]
struct ZoneRon {
    id: ZoneId,
    rows: Vec<String>,
}

/// Zone file structure for RON files.
#[derive(Debug, Deserialize)]
struct ZoneAtlasRon {
    zones: Vec<ZoneRon>,
    #[serde(default)]
    gates: Vec<GateSpec>,
    #[serde(default)]
    seals: Vec<SealSpec>,
}

/// Loader for zone grids from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<ZoneAtlas> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ZoneAtlas> {
        let data: ZoneAtlasRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse zone RON: {}", e))?;

        let mut grids = BTreeMap::new();
        for zone in data.zones {
            let grid = parse_grid(zone.id, &zone.rows)?;
            if grids.insert(zone.id, grid).is_some() {
                anyhow::bail!("Zone '{}' is defined twice", zone.id);
            }
        }
        if let Some(missing) = ZoneId::iter().find(|zone| !grids.contains_key(zone)) {
            anyhow::bail!("Zone '{}' has no grid", missing);
        }

        let atlas = ZoneAtlas {
            grids,
            gates: data.gates,
            seals: data.seals,
        };
        validate_rules(&atlas)?;
        Ok(atlas)
    }
}

/// Parses rows of tile codes. Every row must have the same width.
fn parse_grid(zone: ZoneId, rows: &[String]) -> LoadResult<ZoneGrid> {
    let width = rows.first().map_or(0, |row| row.chars().count());
    if width == 0 {
        anyhow::bail!("Zone '{}' has an empty grid", zone);
    }

    let mut tiles = Vec::with_capacity(width * rows.len());
    for (y, row) in rows.iter().enumerate() {
        if row.chars().count() != width {
            anyhow::bail!(
                "Zone '{}' row {} has {} tiles, expected {}",
                zone,
                y,
                row.chars().count(),
                width
            );
        }
        for (x, code) in row.chars().enumerate() {
            let tile = TileKind::from_code(code).ok_or_else(|| {
                anyhow::anyhow!("Zone '{}' has unknown tile '{}' at ({}, {})", zone, code, x, y)
            })?;
            tiles.push(tile);
        }
    }

    let dimensions = MapDimensions::new(width as u32, rows.len() as u32);
    ZoneGrid::new(zone, dimensions, tiles)
        .ok_or_else(|| anyhow::anyhow!("Zone '{}' grid does not match its dimensions", zone))
}

fn validate_rules(atlas: &ZoneAtlas) -> LoadResult<()> {
    for gate in &atlas.gates {
        let destination = gate.destination;
        if destination.is_overworld() {
            anyhow::bail!("Gates lead into sub-zones, not the field");
        }
        if atlas.gates.iter().filter(|g| g.destination == destination).count() > 1 {
            anyhow::bail!("Zone '{}' has more than one gate rule", destination);
        }
        ensure_walkable(atlas, destination, gate.entry, "gate entry")?;
    }

    for seal in &atlas.seals {
        let tile = atlas
            .grid(seal.zone)
            .and_then(|grid| grid.tile(seal.position));
        if tile != Some(TileKind::Seal) {
            anyhow::bail!(
                "Seal rule at {} in '{}' does not sit on a seal tile",
                seal.position,
                seal.zone
            );
        }
    }
    Ok(())
}

fn ensure_walkable(atlas: &ZoneAtlas, zone: ZoneId, position: Position, what: &str) -> LoadResult<()> {
    let tile = atlas.grid(zone).and_then(|grid| grid.tile(position));
    match tile {
        Some(tile) if tile.is_passable() => Ok(()),
        Some(tile) => anyhow::bail!(
            "{} {} in '{}' is on impassable tile '{}'",
            what,
            position,
            zone,
            tile.code().unwrap_or('?')
        ),
        None => anyhow::bail!("{} {} is outside '{}'", what, position, zone),
    }
}
