//! Button grid for the TUI calculator
//!
//! The grid mirrors a phone calculator:
//!
//! ```text
//! [ C ] [ ± ] [ % ] [ ÷ ]
//! [ 7 ] [ 8 ] [ 9 ] [ × ]
//! [ 4 ] [ 5 ] [ 6 ] [ - ]
//! [ 1 ] [ 2 ] [ 3 ] [ + ]
//! [     0     ] [ . ] [ = ]
//! ```
//!
//! Buttons can be clicked with the mouse (see [`Keypad::hit_test`]) and the
//! last pressed one is highlighted.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use super::theme::Theme;
use crate::core::Operation;

/// What pressing a button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Enter a digit (0-9)
    Digit(u8),
    /// Enter a decimal point
    Decimal,
    /// Press an operator
    Operator(Operation),
    /// Resolve the pending equation
    Equals,
    /// Reset the calculator
    Clear,
    /// Flip the sign of the display
    ToggleSign,
    /// Divide the display by 100
    Percent,
}

/// Visual family of a button, used to pick theme colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Digits and the decimal point
    Number,
    /// Operators and equals
    Operator,
    /// Clear, sign flip and percent
    Special,
}

impl ButtonAction {
    /// Returns the visual family of this action
    #[must_use]
    pub const fn kind(&self) -> ButtonKind {
        match self {
            Self::Digit(_) | Self::Decimal => ButtonKind::Number,
            Self::Operator(_) | Self::Equals => ButtonKind::Operator,
            Self::Clear | Self::ToggleSign | Self::Percent => ButtonKind::Special,
        }
    }

    /// Returns the label shown on the button
    #[must_use]
    pub fn label(&self) -> char {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(*d), 10).unwrap_or('?'),
            Self::Decimal => '.',
            Self::Operator(op) => op.symbol().chars().next().unwrap_or('?'),
            Self::Equals => '=',
            Self::Clear => 'C',
            Self::ToggleSign => '±',
            Self::Percent => '%',
        }
    }
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The symbol on the button
    pub label: char,
    /// Whether the button is currently highlighted
    pub pressed: bool,
    /// The action this button performs
    pub action: ButtonAction,
    /// Number of grid columns the button covers
    pub span: usize,
}

impl KeypadButton {
    /// Creates a one-column button for an action
    #[must_use]
    pub fn new(action: ButtonAction) -> Self {
        Self {
            label: action.label(),
            pressed: false,
            action,
            span: 1,
        }
    }

    /// Creates a digit button
    #[must_use]
    pub fn digit(d: u8) -> Self {
        Self::new(ButtonAction::Digit(d))
    }

    /// Creates an operator button
    #[must_use]
    pub fn operator(op: Operation) -> Self {
        Self::new(ButtonAction::Operator(op))
    }

    /// Makes the button cover `span` columns
    #[must_use]
    pub fn wide(mut self, span: usize) -> Self {
        self.span = span.max(1);
        self
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

/// The keypad layout - a 5x4 grid where `0` spans two columns
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<KeypadButton>,
    /// Top-left (row, col) cell of each button
    positions: Vec<(usize, usize)>,
    /// Number of columns
    cols: usize,
    /// Number of rows
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Number of grid columns
    pub const COLS: usize = 4;

    /// Creates the standard calculator keypad
    #[must_use]
    pub fn new() -> Self {
        let buttons = vec![
            // Row 1: C ± % ÷
            KeypadButton::new(ButtonAction::Clear),
            KeypadButton::new(ButtonAction::ToggleSign),
            KeypadButton::new(ButtonAction::Percent),
            KeypadButton::operator(Operation::Divide),
            // Row 2: 7 8 9 ×
            KeypadButton::digit(7),
            KeypadButton::digit(8),
            KeypadButton::digit(9),
            KeypadButton::operator(Operation::Multiply),
            // Row 3: 4 5 6 -
            KeypadButton::digit(4),
            KeypadButton::digit(5),
            KeypadButton::digit(6),
            KeypadButton::operator(Operation::Subtract),
            // Row 4: 1 2 3 +
            KeypadButton::digit(1),
            KeypadButton::digit(2),
            KeypadButton::digit(3),
            KeypadButton::operator(Operation::Add),
            // Row 5: 0 (wide) . =
            KeypadButton::digit(0).wide(2),
            KeypadButton::new(ButtonAction::Decimal),
            KeypadButton::new(ButtonAction::Equals),
        ];

        Self::from_buttons(buttons, Self::COLS)
    }

    /// Lays out buttons row by row, wrapping when a row is full
    #[must_use]
    pub fn from_buttons(buttons: Vec<KeypadButton>, cols: usize) -> Self {
        let cols = cols.max(1);
        let mut positions = Vec::with_capacity(buttons.len());
        let (mut row, mut col) = (0, 0);
        for btn in &buttons {
            let span = btn.span.min(cols);
            if col + span > cols {
                row += 1;
                col = 0;
            }
            positions.push((row, col));
            col += span;
        }
        let rows = if buttons.is_empty() { 0 } else { row + 1 };

        Self {
            buttons,
            positions,
            cols,
            rows,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Returns the index of the button covering a grid cell
    #[must_use]
    pub fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        self.buttons_with_positions()
            .position(|((r, c), btn)| r == row && (c..c + btn.span).contains(&col))
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.index_at(row, col).and_then(|i| self.buttons.get(i))
    }

    /// Finds a button by its label
    #[must_use]
    pub fn find_button_by_label(&self, label: char) -> Option<usize> {
        self.buttons.iter().position(|b| b.label == label)
    }

    /// Finds the button performing an action
    #[must_use]
    pub fn find_button_by_action(&self, action: ButtonAction) -> Option<usize> {
        self.buttons.iter().position(|b| b.action == action)
    }

    /// Sets a button as pressed by index
    pub fn press_button(&mut self, index: usize) {
        if let Some(btn) = self.buttons.get_mut(index) {
            btn.set_pressed(true);
        }
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Highlights the button for an action, releasing the others
    pub fn highlight(&mut self, action: ButtonAction) {
        self.release_all();
        if let Some(idx) = self.find_button_by_action(action) {
            self.press_button(idx);
        }
    }

    /// Index of the highlighted button, if any
    #[must_use]
    pub fn pressed_index(&self) -> Option<usize> {
        self.buttons.iter().position(|b| b.pressed)
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Returns an iterator over buttons with their top-left (row, col) cells
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.positions.iter().copied().zip(self.buttons.iter())
    }

    /// Converts a click position inside the bordered keypad area to a button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Account for border (1 char on each side)
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let (btn_width, btn_height) = self.cell_size(area);
        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = ((rel_x - 1) / btn_width) as usize;
        let row = ((rel_y - 1) / btn_height) as usize;

        if row < self.rows && col < self.cols {
            self.index_at(row, col)
        } else {
            None
        }
    }

    /// Width and height of one grid cell inside the bordered area
    fn cell_size(&self, area: Rect) -> (u16, u16) {
        if self.rows == 0 {
            return (0, 0);
        }
        (
            area.width.saturating_sub(2) / self.cols as u16,
            area.height.saturating_sub(2) / self.rows as u16,
        )
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    theme: &'a Theme,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad, theme: &'a Theme) -> Self {
        Self { keypad, theme }
    }

    fn button_style(&self, btn: &KeypadButton) -> Style {
        let (bg, fg) = match btn.action.kind() {
            ButtonKind::Number => (self.theme.number_button, self.theme.number_button_text),
            ButtonKind::Operator => (self.theme.operator_button, self.theme.operator_button_text),
            ButtonKind::Special => (self.theme.special_button, self.theme.special_button_text),
        };
        if btn.pressed {
            Style::default()
                .fg(fg)
                .bg(self.theme.pressed_button)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(fg).bg(bg)
        }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.display_secondary))
            .style(Style::default().bg(self.theme.background))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let (btn_width, btn_height) = self.keypad.cell_size(area);
        if btn_width < 3 || btn_height == 0 {
            return; // Too small to render
        }

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            let x = inner.x + col as u16 * btn_width;
            let y = inner.y + row as u16 * btn_height;
            let width = btn_width * btn.span as u16;
            let style = self.button_style(btn);

            // Leave a one-column gap between buttons
            let face = Rect {
                x,
                y,
                width: width.saturating_sub(1).max(1),
                height: btn_height,
            };
            buf.set_style(face, style);

            let label = format!("{}", btn.label);
            let label_x = x + face.width.saturating_sub(1) / 2;
            let label_y = y + btn_height / 2;
            if label_y < inner.y + inner.height && label_x < inner.x + inner.width {
                buf.set_span(label_x, label_y, &Span::styled(label, style), face.width);
            }
        }
    }
}
