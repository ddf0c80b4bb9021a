//! idk-calc: terminal estimate calculator
//!
//! ## Usage
//!
//! ```bash
//! idk-calc                       # Detect light/dark from the terminal
//! idk-calc --theme light         # Force the light palette
//! idk-calc --seed 42             # Reproducible estimates
//! idk-calc --log-file calc.log   # Trace to a file (RUST_LOG=idk_calculator=trace)
//! idk-calc --print-config        # Show the resolved configuration
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use idk_calculator::tui::{render, CalculatorApp, CalculatorLayout, InputHandler};
use idk_calculator::{logging, AppConfig, AppResult, Cli};
use ratatui::{backend::Backend, backend::CrosstermBackend, layout::Rect, Terminal};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli);

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    logging::init(config.log_file.as_deref())?;
    tracing::info!(?config, "starting");

    let appearance = config.appearance();
    let app = match config.seed {
        Some(seed) => CalculatorApp::seeded(seed, appearance),
        None => CalculatorApp::with_rng(idk_calculator::core::random::from_entropy(), appearance),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    or_restore(
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture),
        restore_terminal,
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = or_restore(Terminal::new(backend), restore_terminal)?;

    // Run app
    let result = run_app(&mut terminal, app);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "event loop failed");
    }
    tracing::info!("exiting");
    result
}

/// Propagates a setup error after running `restore`
fn or_restore<T>(result: io::Result<T>, restore: impl FnOnce()) -> AppResult<T> {
    result.map_err(|e| {
        restore();
        e.into()
    })
}

/// Best-effort undo of raw mode, the alternate screen and mouse capture
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: CalculatorApp) -> AppResult<()> {
    let input_handler = InputHandler::new();
    let mut keypad_area = Rect::default();

    loop {
        terminal.draw(|f| {
            keypad_area = CalculatorLayout::new(f.area()).keypad;
            render(&app, f);
        })?;

        match event::read()? {
            Event::Key(key) => app.handle(input_handler.handle_key(key)),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                app.click(keypad_area, mouse.column, mouse.row);
            }
            _ => {}
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
