//! Session tuning loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameConfig`] from TOML files.
///
/// Every key is optional; anything left out keeps its built-in default.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &GameConfig) -> LoadResult<()> {
        if !(0.0..=1.0).contains(&config.encounter_chance) {
            anyhow::bail!(
                "encounter_chance must be within [0, 1], got {}",
                config.encounter_chance
            );
        }
        if config.level_curve.initial_threshold == 0 {
            anyhow::bail!("level_curve.initial_threshold must be positive");
        }
        for (name, row) in [
            ("rookie", &config.tuning.rookie),
            ("veteran", &config.tuning.veteran),
            ("elite", &config.tuning.elite),
        ] {
            if !(0.0..=10.0).contains(&row.telegraph_weight) {
                anyhow::bail!(
                    "tuning.{name}.telegraph_weight must be within [0, 10], got {}",
                    row.telegraph_weight
                );
            }
        }
        Ok(())
    }
}
