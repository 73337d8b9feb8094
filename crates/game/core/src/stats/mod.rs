//! Progression calculator.
//!
//! ```text
//! [ Character base + level bonuses + equipped items ]  → Loadout      (loadout)
//! [ Enemy template × distance scale ]                   → Loadout      (scaling)
//! [ Experience reward ]                                 → level-ups    (progression)
//! ```
//!
//! Everything here is a pure function over state and static data. Stats are
//! recomputed on demand and never stored, so the equip set and level bonuses
//! remain the only source of truth.

pub mod loadout;
pub mod progression;
pub mod scaling;

pub use loadout::{Loadout, player_loadout};
pub use progression::{LevelUp, award_experience};
pub use scaling::{ScaledEnemy, encounter_scale, scale_enemy};

/// Rounds to the nearest integer with halves going up.
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
