use crate::state::{KeyItemId, Position, ZoneId};

/// Static zone layout oracle: tile grids plus the gate and seal rules placed on them.
pub trait ZoneOracle: Send + Sync {
    fn dimensions(&self, zone: ZoneId) -> MapDimensions;

    /// Returns the tile at `position`, or `None` outside the zone.
    fn tile(&self, zone: ZoneId, position: Position) -> Option<TileKind>;

    /// Passage rule for gates leading into `destination`.
    fn gate(&self, destination: ZoneId) -> Option<&GateSpec>;

    /// Passage rule for a sealed tile.
    fn seal(&self, zone: ZoneId, position: Position) -> Option<&SealSpec>;

    fn contains(&self, zone: ZoneId, position: Position) -> bool {
        self.dimensions(zone).contains(position)
    }

    /// Bounds-checked lookup. Anything outside the zone reads as [`TileKind::SENTINEL`].
    fn tile_or_sentinel(&self, zone: ZoneId, position: Position) -> TileKind {
        self.tile(zone, position).unwrap_or(TileKind::SENTINEL)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Terrain and trigger class of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    Grass,
    Road,
    Flowers,
    Water,
    Mountain,
    Building,
    Tree,
    /// Restores HP to max.
    Spring,
    /// Charges the burst gauge.
    Shrine,
    /// Returns to the remembered field coordinate.
    Exit,
    /// Transition into the given zone.
    Gate(ZoneId),
    /// Passable only while holding the seal's key item.
    Seal,
}

impl TileKind {
    /// Returned for lookups outside a zone.
    pub const SENTINEL: Self = TileKind::Mountain;

    pub fn from_code(code: char) -> Option<Self> {
        let kind = match code {
            'G' => TileKind::Grass,
            'R' => TileKind::Road,
            'F' => TileKind::Flowers,
            'W' => TileKind::Water,
            'M' => TileKind::Mountain,
            'B' => TileKind::Building,
            'C' => TileKind::Tree,
            'H' => TileKind::Spring,
            'S' => TileKind::Shrine,
            'E' => TileKind::Exit,
            'X' => TileKind::Seal,
            'T' => TileKind::Gate(ZoneId::Town),
            'N' => TileKind::Gate(ZoneId::Forest),
            'U' => TileKind::Gate(ZoneId::Harbor),
            'D' => TileKind::Gate(ZoneId::Ruins),
            _ => return None,
        };
        Some(kind)
    }

    /// Map code for this tile. A gate into the field has none: exits lead
    /// back there instead.
    pub fn code(self) -> Option<char> {
        let code = match self {
            TileKind::Grass => 'G',
            TileKind::Road => 'R',
            TileKind::Flowers => 'F',
            TileKind::Water => 'W',
            TileKind::Mountain => 'M',
            TileKind::Building => 'B',
            TileKind::Tree => 'C',
            TileKind::Spring => 'H',
            TileKind::Shrine => 'S',
            TileKind::Exit => 'E',
            TileKind::Seal => 'X',
            TileKind::Gate(ZoneId::Town) => 'T',
            TileKind::Gate(ZoneId::Forest) => 'N',
            TileKind::Gate(ZoneId::Harbor) => 'U',
            TileKind::Gate(ZoneId::Ruins) => 'D',
            TileKind::Gate(ZoneId::Field) => return None,
        };
        Some(code)
    }

    /// Terrain passability. Gates and seals are passable terrain whose
    /// key-item requirement is checked separately.
    pub fn is_passable(self) -> bool {
        !matches!(
            self,
            TileKind::Water | TileKind::Mountain | TileKind::Building | TileKind::Tree
        )
    }
}

/// Rule for entering a zone through its gate tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateSpec {
    pub destination: ZoneId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_key: Option<KeyItemId>,
    /// Where the player lands inside the destination zone.
    pub entry: Position,
    /// Story stage reached on the first pass through this gate.
    pub story_stage: u32,
    pub quest: String,
    /// Shown when the required key item is missing.
    pub rejection: String,
}

/// Rule for a sealed tile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SealSpec {
    pub zone: ZoneId,
    pub position: Position,
    pub required_key: KeyItemId,
    pub rejection: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_codes_round_trip_through_kinds() {
        for code in "GRFWMBCHSEXTNUD".chars() {
            let kind = TileKind::from_code(code).expect("known code");
            assert_eq!(kind.code(), Some(code));
        }
        assert_eq!(TileKind::from_code('?'), None);
    }

    #[test]
    fn field_gate_has_no_code() {
        assert_eq!(TileKind::Gate(ZoneId::Field).code(), None);
        assert_eq!(TileKind::from_code('E'), Some(TileKind::Exit));
    }

    #[test]
    fn blocking_tiles_match_terrain_rules() {
        let blocking: Vec<char> = "GRFWMBCHSEXTNUD"
            .chars()
            .filter(|code| !TileKind::from_code(*code).is_some_and(TileKind::is_passable))
            .collect();
        assert_eq!(blocking, vec!['W', 'M', 'B', 'C']);
    }

    #[test]
    fn dimensions_bound_positions() {
        let dims = MapDimensions::new(36, 24);
        assert!(dims.contains(Position::new(0, 0)));
        assert!(dims.contains(Position::new(35, 23)));
        assert!(!dims.contains(Position::new(36, 0)));
        assert!(!dims.contains(Position::new(0, -1)));
    }
}
