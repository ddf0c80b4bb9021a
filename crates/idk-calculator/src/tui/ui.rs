//! TUI rendering
//!
//! Pure function of [`CalculatorApp`]: a display panel with the equation
//! preview above the main value, the keypad, and a one-line help footer.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use super::theme::Theme;
use crate::core::RandomSource;

/// Title on the outer border
pub const APP_TITLE: &str = " idk calculator ";

/// Keyboard shortcuts shown in the footer
///
/// Digits, `.` and `+ - * /` map to their buttons and are not listed.
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("Enter", "="),
    ("n", "±"),
    ("Esc", "C"),
    ("t", "theme"),
    ("q", "quit"),
];

/// Widest the calculator column grows
pub const MAX_WIDTH: u16 = 36;

/// Height of the display panel including its border
pub const DISPLAY_HEIGHT: u16 = 5;

/// Areas the calculator is split into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorLayout {
    /// Equation preview and main display
    pub display: Rect,
    /// Button grid
    pub keypad: Rect,
    /// Shortcut footer
    pub help: Rect,
}

impl CalculatorLayout {
    /// Splits the frame into display, keypad and help areas
    ///
    /// The calculator is a centered column at most [`MAX_WIDTH`] wide.
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let width = inner.width.min(MAX_WIDTH);
        let column = Rect {
            x: inner.x + (inner.width - width) / 2,
            width,
            ..inner
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(DISPLAY_HEIGHT),
                Constraint::Min(7),
                Constraint::Length(1),
            ])
            .split(column);

        Self {
            display: chunks[0],
            keypad: chunks[1],
            help: chunks[2],
        }
    }
}

/// Renders the calculator UI to the frame
pub fn render<R: RandomSource>(app: &CalculatorApp<R>, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a, R> {
    app: &'a CalculatorApp<R>,
    theme: Theme,
}

impl<'a, R: RandomSource> CalculatorUI<'a, R> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp<R>) -> Self {
        Self {
            app,
            theme: app.theme(),
        }
    }

    /// Renders the equation preview and main display
    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let secondary = Style::default().fg(self.theme.display_secondary);
        let mut main = Style::default()
            .fg(self.theme.display_text)
            .add_modifier(Modifier::BOLD);
        if self.app.showing_estimate() {
            main = main.add_modifier(Modifier::ITALIC);
        }

        let equation = self.app.equation_line().unwrap_or_default();
        let lines = vec![
            Line::from(Span::styled(equation, secondary)),
            Line::default(),
            Line::from(Span::styled(self.app.display_text(), main)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(secondary)
                    .style(Style::default().bg(self.theme.display)),
            )
            .render(area, buf);
    }

    /// Renders the shortcut footer
    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let key_style = Style::default().fg(self.theme.operator_button);
        let desc_style = Style::default().fg(self.theme.display_secondary);

        let mut spans = Vec::with_capacity(HELP_SHORTCUTS.len() * 3);
        for (i, (key, desc)) in HELP_SHORTCUTS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::styled(format!(" {desc}"), desc_style));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

impl<R: RandomSource> Widget for CalculatorUI<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(APP_TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.display_secondary))
            .style(Style::default().bg(self.theme.background))
            .render(area, buf);

        let layout = CalculatorLayout::new(area);
        self.render_display(layout.display, buf);
        KeypadWidget::new(self.app.keypad(), &self.theme).render(layout.keypad, buf);
        self.render_help(layout.help, buf);
    }
}
