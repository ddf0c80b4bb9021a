//! Keyboard input mapping
//!
//! Turns crossterm events into calculator actions. The mapping is pure so it
//! can be tested without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::keypad::ButtonAction;
use crate::core::Operation;

/// Actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Press a keypad button
    Button(ButtonAction),
    /// Switch between the light and dark palettes
    ToggleTheme,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        // Windows reports releases too; only act on presses
        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                KeyCode::Char('l') => KeyAction::Button(ButtonAction::Clear),
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char(c) => Self::map_char(c),
            KeyCode::Enter => KeyAction::Button(ButtonAction::Equals),
            KeyCode::Esc | KeyCode::Delete | KeyCode::Backspace => {
                KeyAction::Button(ButtonAction::Clear)
            }
            _ => KeyAction::None,
        }
    }

    /// Maps a typed character to an action
    #[must_use]
    pub fn map_char(c: char) -> KeyAction {
        if let Some(d) = c.to_digit(10) {
            return KeyAction::Button(ButtonAction::Digit(d as u8));
        }
        if let Some(op) = Operation::from_char(c) {
            return KeyAction::Button(ButtonAction::Operator(op));
        }
        match c {
            '.' | ',' => KeyAction::Button(ButtonAction::Decimal),
            '=' => KeyAction::Button(ButtonAction::Equals),
            'c' | 'C' => KeyAction::Button(ButtonAction::Clear),
            'n' | 'N' | '_' | '±' => KeyAction::Button(ButtonAction::ToggleSign),
            '%' => KeyAction::Button(ButtonAction::Percent),
            't' | 'T' => KeyAction::ToggleTheme,
            'q' | 'Q' => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}
