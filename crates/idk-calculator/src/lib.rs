//! idk calculator
//!
//! A four-function calculator that refuses to commit: every equation it
//! resolves is answered with two decoys drawn around the true result, as in
//! `idk 12, maybe 9?`.
//!
//! The crate is split into a host-independent [`core`] (state machine,
//! estimate engine, number formatting) and a terminal front end in `tui`
//! (ratatui + crossterm, behind the default `tui` feature).
//!
//! # Example
//!
//! ```rust
//! use idk_calculator::prelude::*;
//!
//! // Draws are injected, so the decoys are reproducible
//! let mut calc = EstimateCalculator::new(SequenceSource::new(vec![0.0, 0.9]));
//! calc.press_digit(7);
//! calc.press_operator(Operation::Add);
//! calc.press_digit(3);
//! calc.press_equals();
//!
//! assert_eq!(calc.display(), "idk 4, maybe 15?");
//! assert_eq!(calc.last_equation(), "7 + 3");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod cli;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod logging;

#[cfg(feature = "tui")]
pub mod tui;

pub use cli::Cli;
pub use config::{AppConfig, ThemeChoice};
pub use error::{AppError, AppResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::{
        parse_estimate, Estimate, EstimateCalculator, EstimateEngine, Operation, Phase,
        RandomSource, SequenceSource, StdCalculator,
    };
    pub use crate::driver::{CalculatorDriver, CoreDriver};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}
