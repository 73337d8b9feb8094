//! Elemental damage.

use crate::stats::round_half_up;

/// `max(1, round(base + (attack - defense) * factor))`.
///
/// `attack` and `defense` are the aggregated values for the move being used.
/// Always deals at least 1.
pub fn elemental_damage(base: u32, attack: i32, defense: i32, factor: f64) -> u32 {
    let raw = f64::from(base) + f64::from(attack - defense) * factor;
    round_half_up(raw).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rookie_win_with_rock_advantage() {
        // base 16, rock attack 8 vs rock defense 5
        assert_eq!(elemental_damage(16, 8, 5, 0.6), 18);
    }

    #[test]
    fn heavy_disadvantage_still_deals_one() {
        assert_eq!(elemental_damage(4, 0, 40, 0.6), 1);
    }

    #[test]
    fn even_stats_deal_base() {
        assert_eq!(elemental_damage(14, 6, 6, 0.6), 14);
    }
}
