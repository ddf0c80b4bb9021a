//! Runtime configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::AppResult;

/// Which palette to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Follow the terminal
    #[default]
    Auto,
    /// Always light
    Light,
    /// Always dark
    Dark,
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Palette selection
    pub theme: ThemeChoice,
    /// Seed for the estimate generator; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Log destination; `None` disables logging
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the configuration from parsed arguments
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::new().with_theme(cli.theme.into());
        config.seed = cli.seed;
        config.log_file.clone_from(&cli.log_file);
        config
    }

    /// Set theme choice
    #[must_use]
    pub const fn with_theme(mut self, theme: ThemeChoice) -> Self {
        self.theme = theme;
        self
    }

    /// Set the estimate seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the log file
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Resolves the palette, consulting the terminal for [`ThemeChoice::Auto`]
    #[cfg(feature = "tui")]
    #[must_use]
    pub fn appearance(&self) -> crate::tui::Appearance {
        use crate::tui::Appearance;
        match self.theme {
            ThemeChoice::Auto => Appearance::detect(),
            ThemeChoice::Light => Appearance::Light,
            ThemeChoice::Dark => Appearance::Dark,
        }
    }

    /// Renders the configuration as pretty JSON
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
