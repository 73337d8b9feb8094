//! Experience and levelling.

use crate::config::LevelCurve;
use crate::state::PlayerState;

use super::round_half_up;

/// Summary of an [`award_experience`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LevelUp {
    pub levels_gained: u32,
    pub new_level: u32,
}

/// Adds `reward` to the exp pool and levels up as many times as it pays for.
///
/// Each level consumes the current threshold, grows the threshold by the
/// curve's factor, raises max HP and every attack/defense bonus, and heals by
/// the HP increment. On return `exp < exp_to_next_level`.
pub fn award_experience(player: &mut PlayerState, reward: u32, curve: &LevelCurve) -> LevelUp {
    player.exp = player.exp.saturating_add(reward);
    let mut levels_gained = 0;

    while player.exp >= player.exp_to_next_level {
        player.exp -= player.exp_to_next_level;
        player.level += 1;
        levels_gained += 1;

        let grown = round_half_up(f64::from(player.exp_to_next_level) * curve.threshold_growth);
        player.exp_to_next_level = grown.clamp(1, i64::from(u32::MAX)) as u32;

        player.max_hp = player.max_hp.saturating_add(curve.hp_per_level);
        player.bonus_attack = player.bonus_attack.map(|v| v + curve.stat_per_level);
        player.bonus_defense = player.bonus_defense.map(|v| v + curve.stat_per_level);
        player.heal(curve.hp_per_level);
    }

    LevelUp {
        levels_gained,
        new_level: player.level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Position, StatTriple};

    fn fresh_player() -> PlayerState {
        PlayerState::new(Position::ORIGIN, 100, 50)
    }

    #[test]
    fn exact_threshold_levels_once_and_empties_pool() {
        let mut player = fresh_player();
        let result = award_experience(&mut player, 50, &LevelCurve::default());

        assert_eq!(result.levels_gained, 1);
        assert_eq!(player.level, 2);
        assert_eq!(player.exp, 0);
        assert_eq!(player.exp_to_next_level, 68);
        assert_eq!(player.max_hp, 106);
        assert_eq!(player.bonus_attack, StatTriple::splat(1));
        assert_eq!(player.bonus_defense, StatTriple::splat(1));
    }

    #[test]
    fn large_reward_levels_repeatedly() {
        let mut player = fresh_player();
        // 50 + 68 + 92 = 210
        let result = award_experience(&mut player, 215, &LevelCurve::default());

        assert_eq!(result.levels_gained, 3);
        assert_eq!(player.level, 4);
        assert_eq!(player.exp, 5);
        assert!(player.exp < player.exp_to_next_level);
        assert_eq!(player.max_hp, 118);
    }

    #[test]
    fn below_threshold_only_accumulates() {
        let mut player = fresh_player();
        let result = award_experience(&mut player, 49, &LevelCurve::default());
        assert_eq!(result.levels_gained, 0);
        assert_eq!(player.exp, 49);
        assert_eq!(player.level, 1);
    }

    #[test]
    fn level_heal_is_clamped_to_new_max() {
        let mut player = fresh_player();
        player.take_damage(3);
        award_experience(&mut player, 50, &LevelCurve::default());
        assert_eq!(player.hp, 103);

        let mut full = fresh_player();
        award_experience(&mut full, 50, &LevelCurve::default());
        assert_eq!(full.hp, full.max_hp);
    }
}
