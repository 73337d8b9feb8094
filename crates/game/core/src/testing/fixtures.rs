use std::collections::HashMap;

use crate::config::GameConfig;
use crate::env::{
    CharacterTemplate, EnemyTemplate, GameEnv, GateSpec, ItemOracle, ItemTemplate, KeyItem,
    MapDimensions, NpcOracle, NpcTemplate, RngOracle, RosterOracle, SealSpec, TileKind,
    ZoneOracle,
};
use crate::state::{
    Difficulty, EnemyId, ItemId, KeyItemId, MoveType, NpcId, PartialTriple, Position,
    SessionState, StatTriple, ZoneId,
};

pub const ZONE_SIZE: MapDimensions = MapDimensions::new(36, 24);

pub struct TestRoster {
    enemies: Vec<EnemyTemplate>,
    character: CharacterTemplate,
}

impl TestRoster {
    pub fn truncated(mut self, len: usize) -> Self {
        self.enemies.truncate(len);
        self
    }
}

impl RosterOracle for TestRoster {
    fn enemies(&self) -> &[EnemyTemplate] {
        &self.enemies
    }

    fn player_character(&self) -> &CharacterTemplate {
        &self.character
    }
}

#[allow(clippy::too_many_arguments)]
fn enemy(
    id: &str,
    name: &str,
    anima: MoveType,
    base_hp: u32,
    difficulty: Difficulty,
    attack: StatTriple,
    defense: StatTriple,
    exp_reward: u32,
) -> EnemyTemplate {
    EnemyTemplate {
        id: EnemyId::from(id),
        name: name.to_owned(),
        anima,
        base_hp,
        difficulty,
        attack,
        defense,
        exp_reward,
        blurb: String::new(),
    }
}

pub fn roster() -> TestRoster {
    TestRoster {
        enemies: vec![
            enemy(
                "kai",
                "Kai",
                MoveType::Rock,
                100,
                Difficulty::Rookie,
                StatTriple::new(5, 8, 6),
                StatTriple::new(5, 6, 5),
                40,
            ),
            enemy(
                "shiro",
                "Shiro",
                MoveType::Scissors,
                112,
                Difficulty::Veteran,
                StatTriple::new(7, 6, 7),
                StatTriple::new(6, 6, 6),
                60,
            ),
            enemy(
                "noct",
                "Noct",
                MoveType::Paper,
                125,
                Difficulty::Elite,
                StatTriple::new(8, 8, 8),
                StatTriple::new(7, 7, 7),
                90,
            ),
        ],
        character: CharacterTemplate {
            id: "leo".to_owned(),
            name: "Leo".to_owned(),
            base_hp: 100,
            attack: StatTriple::new(8, 5, 6),
            defense: StatTriple::new(6, 5, 6),
        },
    }
}

pub struct TestItems {
    items: Vec<ItemTemplate>,
    key_items: Vec<KeyItem>,
}

impl ItemOracle for TestItems {
    fn item(&self, id: &ItemId) -> Option<&ItemTemplate> {
        self.items.iter().find(|item| &item.id == id)
    }

    fn key_item(&self, id: &KeyItemId) -> Option<&KeyItem> {
        self.key_items.iter().find(|item| &item.id == id)
    }

    fn items(&self) -> &[ItemTemplate] {
        &self.items
    }
}

fn item(id: &str, name: &str, attack: PartialTriple, defense: PartialTriple) -> ItemTemplate {
    ItemTemplate {
        id: ItemId::from(id),
        name: name.to_owned(),
        description: String::new(),
        attack,
        defense,
    }
}

pub fn items() -> TestItems {
    let all = |value| {
        MoveType::ALL
            .into_iter()
            .map(|kind| (kind, value))
            .collect::<PartialTriple>()
    };
    TestItems {
        items: vec![
            item(
                "gu-bracer",
                "Gu Bracer",
                PartialTriple::new().with(MoveType::Rock, 4),
                PartialTriple::new(),
            ),
            item(
                "choki-edge",
                "Choki Edge",
                PartialTriple::new().with(MoveType::Scissors, 4),
                PartialTriple::new(),
            ),
            item(
                "pa-barrier",
                "Pa Barrier",
                PartialTriple::new(),
                PartialTriple::new().with(MoveType::Paper, 4),
            ),
            item("trinity-band", "Trinity Band", all(2), all(1)),
            item("guard-core", "Guard Core", PartialTriple::new(), all(2)),
        ],
        key_items: ["forestSigil", "harborPass", "ruinsSeal"]
            .into_iter()
            .zip(["Forest Sigil", "Harbor Pass", "Ruins Seal"])
            .map(|(id, name)| KeyItem {
                id: KeyItemId::from(id),
                name: name.to_owned(),
                description: String::new(),
            })
            .collect(),
    }
}

/// Every zone is open grass unless overridden.
pub struct TestZones {
    overrides: HashMap<(ZoneId, Position), TileKind>,
    gates: Vec<GateSpec>,
    seals: Vec<SealSpec>,
}

impl TestZones {
    pub fn with_tile(mut self, zone: ZoneId, position: Position, kind: TileKind) -> Self {
        self.overrides.insert((zone, position), kind);
        self
    }
}

impl ZoneOracle for TestZones {
    fn dimensions(&self, _zone: ZoneId) -> MapDimensions {
        ZONE_SIZE
    }

    fn tile(&self, zone: ZoneId, position: Position) -> Option<TileKind> {
        if !ZONE_SIZE.contains(position) {
            return None;
        }
        Some(
            self.overrides
                .get(&(zone, position))
                .copied()
                .unwrap_or(TileKind::Grass),
        )
    }

    fn gate(&self, destination: ZoneId) -> Option<&GateSpec> {
        self.gates.iter().find(|gate| gate.destination == destination)
    }

    fn seal(&self, zone: ZoneId, position: Position) -> Option<&SealSpec> {
        self.seals
            .iter()
            .find(|seal| seal.zone == zone && seal.position == position)
    }
}

fn gate(destination: ZoneId, key: Option<&str>, entry: Position, stage: u32) -> GateSpec {
    GateSpec {
        destination,
        required_key: key.map(KeyItemId::from),
        entry,
        story_stage: stage,
        quest: format!("Explore the {destination}."),
        rejection: format!("The {destination} gate is sealed."),
    }
}

pub fn zones() -> TestZones {
    TestZones {
        overrides: HashMap::new(),
        gates: vec![
            gate(ZoneId::Town, None, Position::new(18, 21), 1),
            gate(ZoneId::Forest, Some("forestSigil"), Position::new(2, 12), 2),
            gate(ZoneId::Harbor, Some("harborPass"), Position::new(33, 12), 3),
            gate(ZoneId::Ruins, Some("ruinsSeal"), Position::new(18, 2), 4),
        ],
        seals: vec![SealSpec {
            zone: ZoneId::Forest,
            position: Position::new(10, 10),
            required_key: KeyItemId::from("ruinsSeal"),
            rejection: "A seal bars the way.".to_owned(),
        }],
    }
}

pub struct TestNpcs {
    npcs: Vec<NpcTemplate>,
}

impl NpcOracle for TestNpcs {
    fn npc_at(&self, zone: ZoneId, position: Position) -> Option<&NpcTemplate> {
        self.npcs
            .iter()
            .find(|npc| npc.zone == zone && npc.position == position)
    }

    fn npcs(&self) -> &[NpcTemplate] {
        &self.npcs
    }
}

pub fn npcs() -> TestNpcs {
    TestNpcs {
        npcs: vec![
            NpcTemplate {
                id: NpcId::from("town-archmage"),
                name: "Archmage".to_owned(),
                zone: ZoneId::Town,
                position: Position::new(18, 10),
                lines: vec!["Take this sigil.".to_owned(), "The forest awaits.".to_owned()],
                grants: Some(KeyItemId::from("forestSigil")),
                flag: Some("gotForestSigil".to_owned()),
            },
            NpcTemplate {
                id: NpcId::from("field-scout"),
                name: "Scout".to_owned(),
                zone: ZoneId::Field,
                position: Position::new(13, 8),
                lines: vec!["Foes roam the grass.".to_owned()],
                grants: None,
                flag: None,
            },
        ],
    }
}

/// All static tables of a test world.
pub struct World {
    pub zones: TestZones,
    pub roster: TestRoster,
    pub items: TestItems,
    pub npcs: TestNpcs,
    pub config: GameConfig,
}

impl World {
    pub fn env<'a>(&'a self, rng: &'a dyn RngOracle) -> GameEnv<'a> {
        GameEnv::with_all(&self.zones, &self.roster, &self.items, &self.npcs, rng, &self.config)
    }

    pub fn session(&self) -> SessionState {
        SessionState::new(1, &self.config, self.roster.player_character())
    }
}

pub fn world() -> World {
    World {
        zones: zones(),
        roster: roster(),
        items: items(),
        npcs: npcs(),
        config: GameConfig::default(),
    }
}
