use crate::state::{Difficulty, Position};

/// Game configuration constants and tunable parameters.
///
/// Every numeric knob of the session lives here so content files can retune a
/// run without touching rules code. Loaded from `config.toml` by the content
/// crate; missing keys fall back to [`GameConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Fixed spawn coordinate on the field. Encounter scaling measures distance from here.
    pub spawn: Position,
    /// Quest text shown before any gate has advanced the story.
    pub opening_quest: String,
    /// Per-step probability of a random encounter on the overworld.
    pub encounter_chance: f64,
    pub level_curve: LevelCurve,
    pub scaling: EncounterScaling,
    /// Weight of the attack/defense difference in the elemental damage formula.
    pub elemental_factor: f64,
    /// Flat base damage added to a winning clash while burst is armed.
    pub burst_bonus_damage: u32,
    /// Burst gauge granted by a shrine tile.
    pub gauge_tile_gain: u32,
    /// Keep the burst gauge when a new encounter starts instead of zeroing it.
    pub carry_burst_into_battle: bool,
    /// Delay between accepting a command and resolving the clash.
    pub resolve_delay_ms: u64,
    /// Delay between resolving the clash and settling the turn.
    pub settle_delay_ms: u64,
    pub tuning: TuningTable,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneously equipped items.
    pub const MAX_EQUIPPED: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SPAWN: Position = Position::new(13, 10);
    pub const DEFAULT_ENCOUNTER_CHANCE: f64 = 0.22;
    pub const DEFAULT_ELEMENTAL_FACTOR: f64 = 0.6;
    pub const DEFAULT_BURST_BONUS_DAMAGE: u32 = 12;
    pub const DEFAULT_GAUGE_TILE_GAIN: u32 = 25;
    pub const DEFAULT_RESOLVE_DELAY_MS: u64 = 300;
    pub const DEFAULT_SETTLE_DELAY_MS: u64 = 800;

    pub fn new() -> Self {
        Self {
            spawn: Self::DEFAULT_SPAWN,
            opening_quest: "Find the town gate north of the crossroads.".to_owned(),
            encounter_chance: Self::DEFAULT_ENCOUNTER_CHANCE,
            level_curve: LevelCurve::default(),
            scaling: EncounterScaling::default(),
            elemental_factor: Self::DEFAULT_ELEMENTAL_FACTOR,
            burst_bonus_damage: Self::DEFAULT_BURST_BONUS_DAMAGE,
            gauge_tile_gain: Self::DEFAULT_GAUGE_TILE_GAIN,
            carry_burst_into_battle: false,
            resolve_delay_ms: Self::DEFAULT_RESOLVE_DELAY_MS,
            settle_delay_ms: Self::DEFAULT_SETTLE_DELAY_MS,
            tuning: TuningTable::default(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Experience curve and per-level growth.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelCurve {
    /// Experience needed to go from level 1 to level 2.
    pub initial_threshold: u32,
    /// Multiplier applied to the threshold after each level-up (rounded).
    pub threshold_growth: f64,
    /// Max HP gained per level; current HP is healed by the same amount.
    pub hp_per_level: u32,
    /// Flat attack and defense gained per move type per level.
    pub stat_per_level: i32,
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            initial_threshold: 50,
            threshold_growth: 1.35,
            hp_per_level: 6,
            stat_per_level: 1,
        }
    }
}

/// Distance-based enemy scaling: `1 + min(distance / divisor, cap) * step`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterScaling {
    pub distance_divisor: f64,
    pub distance_cap: f64,
    pub step: f64,
}

impl Default for EncounterScaling {
    fn default() -> Self {
        Self {
            distance_divisor: 14.0,
            distance_cap: 2.0,
            step: 0.2,
        }
    }
}

/// Per-difficulty combat constants.
///
/// Kept as an explicit table: the gains are tuned by hand and do not follow a formula.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyTuning {
    /// Weight of the telegraphed move in the enemy's pick (out of 10).
    pub telegraph_weight: f64,
    pub damage_to_enemy: u32,
    pub damage_to_player: u32,
    pub draw_damage: u32,
    pub burst_win: u32,
    pub burst_lose: u32,
    pub burst_draw: u32,
}

/// Tuning rows keyed by [`Difficulty`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TuningTable {
    pub rookie: DifficultyTuning,
    pub veteran: DifficultyTuning,
    pub elite: DifficultyTuning,
}

impl TuningTable {
    pub fn get(&self, difficulty: Difficulty) -> &DifficultyTuning {
        match difficulty {
            Difficulty::Rookie => &self.rookie,
            Difficulty::Veteran => &self.veteran,
            Difficulty::Elite => &self.elite,
        }
    }
}

impl Default for TuningTable {
    fn default() -> Self {
        Self {
            rookie: DifficultyTuning {
                telegraph_weight: 7.0,
                damage_to_enemy: 16,
                damage_to_player: 10,
                draw_damage: 4,
                burst_win: 35,
                burst_lose: 12,
                burst_draw: 18,
            },
            veteran: DifficultyTuning {
                telegraph_weight: 6.0,
                damage_to_enemy: 15,
                damage_to_player: 12,
                draw_damage: 5,
                burst_win: 30,
                burst_lose: 12,
                burst_draw: 16,
            },
            elite: DifficultyTuning {
                telegraph_weight: 5.0,
                damage_to_enemy: 14,
                damage_to_player: 14,
                draw_damage: 6,
                burst_win: 26,
                burst_lose: 12,
                burst_draw: 14,
            },
        }
    }
}
