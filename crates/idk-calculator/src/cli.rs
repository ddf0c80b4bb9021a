//! Command-line definition using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::ThemeChoice;

/// idk-calc: a terminal calculator that is never quite sure of the answer
#[derive(Parser, Debug)]
#[command(name = "idk-calc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Color scheme (auto follows COLORFGBG)
    #[arg(long, value_enum, default_value = "auto", env = "IDK_CALC_THEME")]
    pub theme: ThemeArg,

    /// Seed for reproducible estimates
    #[arg(long, env = "IDK_CALC_SEED")]
    pub seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long, value_name = "PATH", env = "IDK_CALC_LOG")]
    pub log_file: Option<PathBuf>,

    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Theme argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeArg {
    /// Detect from the terminal
    #[default]
    Auto,
    /// Light palette
    Light,
    /// Dark palette
    Dark,
}

impl From<ThemeArg> for ThemeChoice {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Auto => Self::Auto,
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["idk-calc"]).unwrap();
        assert_eq!(cli.theme, ThemeArg::Auto);
        assert!(!cli.print_config);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "idk-calc",
            "--theme",
            "light",
            "--seed",
            "42",
            "--log-file",
            "calc.log",
            "--print-config",
        ])
        .unwrap();
        assert_eq!(cli.theme, ThemeArg::Light);
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.log_file, Some(PathBuf::from("calc.log")));
        assert!(cli.print_config);
    }

    #[test]
    fn test_rejects_unknown_theme() {
        assert!(Cli::try_parse_from(["idk-calc", "--theme", "sepia"]).is_err());
    }

    #[test]
    fn test_rejects_negative_seed() {
        assert!(Cli::try_parse_from(["idk-calc", "--seed", "-1"]).is_err());
    }

    #[test]
    fn test_theme_arg_conversion() {
        assert_eq!(ThemeChoice::from(ThemeArg::Auto), ThemeChoice::Auto);
        assert_eq!(ThemeChoice::from(ThemeArg::Light), ThemeChoice::Light);
        assert_eq!(ThemeChoice::from(ThemeArg::Dark), ThemeChoice::Dark);
    }
}
