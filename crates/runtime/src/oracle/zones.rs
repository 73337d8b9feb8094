//! Zone grids implementing [`game_core::ZoneOracle`].
use game_content::ZoneAtlas;
use game_core::{GateSpec, MapDimensions, Position, SealSpec, TileKind, ZoneId, ZoneOracle};

/// ZoneOracle backed by the loaded zone atlas.
pub struct ZoneOracleImpl {
    atlas: ZoneAtlas,
}

impl ZoneOracleImpl {
    pub fn new(atlas: ZoneAtlas) -> Self {
        Self { atlas }
    }
}

impl ZoneOracle for ZoneOracleImpl {
    fn dimensions(&self, zone: ZoneId) -> MapDimensions {
        self.atlas
            .grid(zone)
            .map(|grid| grid.dimensions())
            .unwrap_or(MapDimensions::new(0, 0))
    }

    fn tile(&self, zone: ZoneId, position: Position) -> Option<TileKind> {
        self.atlas.grid(zone)?.tile(position)
    }

    fn gate(&self, destination: ZoneId) -> Option<&GateSpec> {
        self.atlas.gate(destination)
    }

    fn seal(&self, zone: ZoneId, position: Position) -> Option<&SealSpec> {
        self.atlas.seal(zone, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_grid_reads_as_sentinel() {
        let oracle = ZoneOracleImpl::new(ZoneAtlas::default());
        assert_eq!(oracle.dimensions(ZoneId::Town), MapDimensions::new(0, 0));
        assert!(!oracle.contains(ZoneId::Town, Position::new(0, 0)));
        assert_eq!(
            oracle.tile_or_sentinel(ZoneId::Town, Position::new(0, 0)),
            TileKind::SENTINEL
        );
    }
}
