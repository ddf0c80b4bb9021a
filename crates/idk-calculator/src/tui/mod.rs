//! Terminal front end
//!
//! ratatui widgets and crossterm input mapping around the core calculator.

mod app;
mod input;
mod keypad;
mod theme;
mod ui;

pub use app::{format_display, CalculatorApp};
pub use input::{InputHandler, KeyAction};
pub use keypad::{ButtonAction, ButtonKind, Keypad, KeypadButton, KeypadWidget};
pub use theme::{Appearance, Theme};
pub use ui::{render, CalculatorLayout, CalculatorUI};
