//! TUI application state
//!
//! Wraps the calculator state machine with the bits only a terminal front
//! end needs: the keypad highlight, the active theme and the quit flag.

use rand::rngs::StdRng;
use ratatui::layout::Rect;

use super::input::KeyAction;
use super::keypad::{ButtonAction, Keypad};
use super::theme::{Appearance, Theme};
use crate::core::estimate::is_estimate;
use crate::core::number::{format_grouped, parse_leading_number};
use crate::core::{random, EstimateCalculator, RandomSource};

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp<R = StdRng> {
    /// Interaction state and estimate engine
    calculator: EstimateCalculator<R>,
    /// Button grid, tracking the highlighted button
    keypad: Keypad,
    /// Palette selected at startup
    appearance: Appearance,
    /// Whether the app should quit
    should_quit: bool,
}

impl Default for CalculatorApp<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp<StdRng> {
    /// Creates an app with an entropy-seeded generator and the light theme
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(random::from_entropy(), Appearance::default())
    }

    /// Creates an app whose decoys are reproducible from `seed`
    #[must_use]
    pub fn seeded(seed: u64, appearance: Appearance) -> Self {
        Self::with_rng(random::seeded(seed), appearance)
    }
}

impl<R: RandomSource> CalculatorApp<R> {
    /// Creates an app drawing decoys from `rng`
    #[must_use]
    pub fn with_rng(rng: R, appearance: Appearance) -> Self {
        Self {
            calculator: EstimateCalculator::new(rng),
            keypad: Keypad::new(),
            appearance,
            should_quit: false,
        }
    }

    /// Returns the calculator state machine
    #[must_use]
    pub fn calculator(&self) -> &EstimateCalculator<R> {
        &self.calculator
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the active appearance
    #[must_use]
    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    /// Returns the active palette
    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme::for_appearance(self.appearance)
    }

    /// Switches between the light and dark palettes
    pub fn toggle_appearance(&mut self) {
        self.appearance = match self.appearance {
            Appearance::Light => Appearance::Dark,
            Appearance::Dark => Appearance::Light,
        };
        tracing::debug!(appearance = ?self.appearance, "appearance toggled");
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Applies a keypad button press to the calculator
    pub fn press(&mut self, action: ButtonAction) {
        tracing::trace!(?action, "button");
        self.keypad.highlight(action);
        match action {
            ButtonAction::Digit(d) => self.calculator.press_digit(d),
            ButtonAction::Decimal => self.calculator.press_decimal(),
            ButtonAction::Operator(op) => self.calculator.press_operator(op),
            ButtonAction::Equals => self.calculator.press_equals(),
            ButtonAction::Clear => self.calculator.clear(),
            ButtonAction::ToggleSign => self.calculator.toggle_sign(),
            ButtonAction::Percent => self.calculator.percent(),
        }
    }

    /// Applies a mapped key action
    pub fn handle(&mut self, action: KeyAction) {
        match action {
            KeyAction::Button(button) => self.press(button),
            KeyAction::ToggleTheme => self.toggle_appearance(),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Presses the button under a mouse click, if any
    ///
    /// `keypad_area` is the area the keypad was last rendered into.
    pub fn click(&mut self, keypad_area: Rect, x: u16, y: u16) -> bool {
        let action = self
            .keypad
            .hit_test(keypad_area, x, y)
            .and_then(|idx| self.keypad.get_button(idx))
            .map(|btn| btn.action);

        match action {
            Some(action) => {
                self.press(action);
                true
            }
            None => false,
        }
    }

    /// Main display text, formatted for humans
    #[must_use]
    pub fn display_text(&self) -> String {
        format_display(self.calculator.display())
    }

    /// Secondary equation line above the display
    #[must_use]
    pub fn equation_line(&self) -> Option<String> {
        self.calculator.equation_preview()
    }

    /// Whether the display is showing a decoy
    #[must_use]
    pub fn showing_estimate(&self) -> bool {
        self.calculator.is_estimate()
    }
}

/// Formats the raw display value for rendering
///
/// Decoy strings and unparsable text pass through verbatim; numbers get
/// digit grouping and at most eight fraction digits.
#[must_use]
pub fn format_display(display: &str) -> String {
    if is_estimate(display) {
        return display.to_string();
    }
    match parse_leading_number(display) {
        Some(value) => format_grouped(value),
        None => display.to_string(),
    }
}
