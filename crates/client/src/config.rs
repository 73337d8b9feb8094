//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use game_content::{Content, ContentFactory};

/// Configuration for the headless client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Directory of content tables. `None` uses the built-in tables.
    pub data_dir: Option<PathBuf>,
    /// Upper bound on commands the autoplay issues.
    pub max_actions: usize,
    /// Log a state summary every this many commands.
    pub summary_every: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            max_actions: 400,
            summary_every: 25,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TRINITY_DATA_DIR` - Content directory (default: built-in tables)
    /// - `TRINITY_AUTOPLAY_ACTIONS` - Command budget for the autoplay (default: 400)
    /// - `TRINITY_SUMMARY_EVERY` - Commands between state summaries (default: 25)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("TRINITY_DATA_DIR").ok().map(PathBuf::from);

        if let Some(actions) = read_env::<usize>("TRINITY_AUTOPLAY_ACTIONS") {
            config.max_actions = actions;
        }
        if let Some(every) = read_env::<usize>("TRINITY_SUMMARY_EVERY") {
            config.summary_every = every.max(1);
        }

        config
    }

    /// Loads content from the data directory, or the built-in tables.
    pub fn load_content(&self) -> Result<Content> {
        match &self.data_dir {
            Some(dir) => ContentFactory::new(dir)
                .load_all()
                .with_context(|| format!("loading content from {}", dir.display())),
            None => ContentFactory::builtin().context("loading built-in content"),
        }
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok()?.trim().parse().ok()
}
