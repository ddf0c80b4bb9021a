//! Light and dark palettes
//!
//! A theme is a pure lookup from [`Appearance`]; nothing in the calculator
//! logic reads it.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// System appearance the palette is chosen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Appearance {
    /// Guesses the terminal appearance from `COLORFGBG`
    ///
    /// Falls back to light when the variable is unset.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_env_value(std::env::var("COLORFGBG").ok().as_deref())
    }

    /// Resolves an optional `COLORFGBG` value, light when absent
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        value.map_or_else(Self::default, Self::from_colorfgbg)
    }

    /// Parses a `COLORFGBG` value such as `"0;15"`
    ///
    /// Terminals that set it report `fg;bg` palette indices; a background of
    /// 7 or 15 (white) means light and any other index means dark. A value
    /// without a numeric background tells nothing, so it falls back to light.
    #[must_use]
    pub fn from_colorfgbg(value: &str) -> Self {
        let background = value.rsplit(';').next().map(str::trim);
        match background.and_then(|bg| bg.parse::<u8>().ok()) {
            Some(7 | 15) => Self::Light,
            Some(_) => Self::Dark,
            None => Self::default(),
        }
    }
}

/// Colors for every surface of the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Screen background
    pub background: Color,
    /// Display panel background
    pub display: Color,
    /// Main display text
    pub display_text: Color,
    /// Equation preview text
    pub display_secondary: Color,
    /// Digit and decimal button background
    pub number_button: Color,
    /// Digit and decimal button label
    pub number_button_text: Color,
    /// Operator and equals button background
    pub operator_button: Color,
    /// Operator and equals button label
    pub operator_button_text: Color,
    /// Clear, sign and percent button background
    pub special_button: Color,
    /// Clear, sign and percent button label
    pub special_button_text: Color,
    /// Background of the most recently pressed button
    pub pressed_button: Color,
}

impl Theme {
    /// Light palette
    pub const LIGHT: Self = Self {
        background: Color::Rgb(0xF5, 0xF5, 0xF7),
        display: Color::Rgb(0xFF, 0xFF, 0xFF),
        display_text: Color::Rgb(0x00, 0x00, 0x00),
        display_secondary: Color::Rgb(0x66, 0x66, 0x66),
        number_button: Color::Rgb(0xFF, 0xFF, 0xFF),
        number_button_text: Color::Rgb(0x00, 0x00, 0x00),
        operator_button: Color::Rgb(0xFF, 0x9F, 0x0A),
        operator_button_text: Color::Rgb(0xFF, 0xFF, 0xFF),
        special_button: Color::Rgb(0xE5, 0xE5, 0xEA),
        special_button_text: Color::Rgb(0x00, 0x00, 0x00),
        pressed_button: Color::Rgb(0xC7, 0xC7, 0xCC),
    };

    /// Dark palette
    pub const DARK: Self = Self {
        background: Color::Rgb(0x00, 0x00, 0x00),
        display: Color::Rgb(0x1C, 0x1C, 0x1E),
        display_text: Color::Rgb(0xFF, 0xFF, 0xFF),
        display_secondary: Color::Rgb(0x99, 0x99, 0x99),
        number_button: Color::Rgb(0x2C, 0x2C, 0x2E),
        number_button_text: Color::Rgb(0xFF, 0xFF, 0xFF),
        operator_button: Color::Rgb(0xFF, 0x9F, 0x0A),
        operator_button_text: Color::Rgb(0xFF, 0xFF, 0xFF),
        special_button: Color::Rgb(0x50, 0x50, 0x50),
        special_button_text: Color::Rgb(0xFF, 0xFF, 0xFF),
        pressed_button: Color::Rgb(0x63, 0x63, 0x66),
    };

    /// Returns the palette for an appearance
    #[must_use]
    pub const fn for_appearance(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Light => Self::LIGHT,
            Appearance::Dark => Self::DARK,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_appearance(Appearance::default())
    }
}
