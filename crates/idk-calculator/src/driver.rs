//! Unified calculator driver
//!
//! Scenario checks are written once against [`CalculatorDriver`] and run
//! against both the headless core and the terminal app, so the two front
//! ends cannot drift apart.
//!
//! Keys are plain characters: digits, `.`, `+ - * /`, `=`, `c` to clear,
//! `n` to flip the sign and `%`. Whitespace is ignored, so scenarios can be
//! written as `"7 + 3 ="`.

use rand::rngs::StdRng;

use crate::core::{parse_estimate, random, EstimateCalculator, Operation, RandomSource};

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```rust
/// use idk_calculator::core::SequenceSource;
/// use idk_calculator::driver::{CalculatorDriver, CoreDriver};
///
/// let mut driver = CoreDriver::with_rng(SequenceSource::new(vec![0.0, 0.9]));
/// driver.press_keys("7 + 3 =");
/// assert_eq!(driver.display(), "idk 4, maybe 15?");
/// assert_eq!(driver.equation().as_deref(), Some("7 + 3"));
/// ```
pub trait CalculatorDriver {
    /// Presses the key for a single character; unknown characters are ignored
    fn press_key(&mut self, key: char);

    /// Presses every key in `keys` in order
    fn press_keys(&mut self, keys: &str) {
        for key in keys.chars().filter(|c| !c.is_whitespace()) {
            self.press_key(key);
        }
    }

    /// The raw display value
    fn display(&self) -> String;

    /// The equation line above the display, if any
    fn equation(&self) -> Option<String>;

    /// Resets the calculator
    fn clear(&mut self);
}

/// Headless driver over the core state machine
#[derive(Debug)]
pub struct CoreDriver<R = StdRng> {
    calculator: EstimateCalculator<R>,
}

impl Default for CoreDriver<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreDriver<StdRng> {
    /// Creates a driver with an entropy-seeded generator
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(random::from_entropy())
    }

    /// Creates a driver whose decoys are reproducible from `seed`
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(random::seeded(seed))
    }
}

impl<R: RandomSource> CoreDriver<R> {
    /// Creates a driver drawing decoys from `rng`
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self {
            calculator: EstimateCalculator::new(rng),
        }
    }

    /// Returns the underlying calculator
    #[must_use]
    pub fn calculator(&self) -> &EstimateCalculator<R> {
        &self.calculator
    }
}

impl<R: RandomSource> CalculatorDriver for CoreDriver<R> {
    fn press_key(&mut self, key: char) {
        if let Some(digit) = key.to_digit(10) {
            self.calculator.press_digit(digit as u8);
            return;
        }
        if let Some(op) = Operation::from_char(key) {
            self.calculator.press_operator(op);
            return;
        }
        match key {
            '.' | ',' => self.calculator.press_decimal(),
            '=' => self.calculator.press_equals(),
            'c' | 'C' => self.calculator.clear(),
            'n' | '±' => self.calculator.toggle_sign(),
            '%' => self.calculator.percent(),
            _ => tracing::trace!(%key, "driver ignoring key"),
        }
    }

    fn display(&self) -> String {
        self.calculator.display().to_string()
    }

    fn equation(&self) -> Option<String> {
        self.calculator.equation_preview()
    }

    fn clear(&mut self) {
        self.calculator.clear();
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use rand::rngs::StdRng;

    use super::CalculatorDriver;
    use crate::core::RandomSource;
    use crate::tui::{Appearance, ButtonAction, CalculatorApp, InputHandler};

    /// Driver that goes through the TUI key mapping and app state
    #[derive(Debug)]
    pub struct TuiDriver<R = StdRng> {
        app: CalculatorApp<R>,
    }

    impl Default for TuiDriver<StdRng> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TuiDriver<StdRng> {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self {
                app: CalculatorApp::new(),
            }
        }

        /// Creates a TUI driver with reproducible decoys
        #[must_use]
        pub fn seeded(seed: u64) -> Self {
            Self {
                app: CalculatorApp::seeded(seed, Appearance::Dark),
            }
        }
    }

    impl<R: RandomSource> TuiDriver<R> {
        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp<R>) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp<R> {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp<R> {
            &mut self.app
        }
    }

    impl<R: RandomSource> CalculatorDriver for TuiDriver<R> {
        fn press_key(&mut self, key: char) {
            let action = InputHandler::map_char(key);
            self.app.handle(action);
        }

        fn display(&self) -> String {
            self.app.calculator().display().to_string()
        }

        fn equation(&self) -> Option<String> {
            self.app.equation_line()
        }

        fn clear(&mut self) {
            self.app.press(ButtonAction::Clear);
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified scenario checks =====
// These hold for ANY driver and ANY random source.

fn decoys_of<D: CalculatorDriver>(driver: &D) -> (f64, f64) {
    let display = driver.display();
    match parse_estimate(&display) {
        Some(decoys) => decoys,
        None => panic!("expected a decoy string, got {display:?}"),
    }
}

/// Verifies that digits replace the initial zero and then append
pub fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("007");
    assert_eq!(driver.display(), "7");
    driver.press_keys("12");
    assert_eq!(driver.display(), "712");
    assert_eq!(driver.equation(), None);
}

/// Verifies `7 + 3 =` answers with two whole decoys near 10
pub fn verify_whole_number_estimate<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("7 + 3 =");
    let (first, second) = decoys_of(driver);
    for decoy in [first, second] {
        assert_eq!(decoy.fract(), 0.0, "decoy {decoy} is not whole");
        // window is 10 ± 6.5, halves round up
        assert!((4.0..=16.0).contains(&decoy), "decoy {decoy} out of range");
    }
    assert_eq!(driver.equation().as_deref(), Some("7 + 3"));
}

/// Verifies `1.5 + 2 =` answers with one-decimal decoys near 3.5
pub fn verify_fractional_estimate<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("1.5 + 2 =");
    let (first, second) = decoys_of(driver);
    for decoy in [first, second] {
        let tenths = decoy * 10.0;
        assert!(
            (tenths - tenths.round()).abs() < 1e-6,
            "decoy {decoy} has more than one decimal"
        );
        // window is 3.5 ± 5.525
        assert!(decoy > -2.1 && decoy < 9.1, "decoy {decoy} out of range");
    }
    assert_eq!(driver.equation().as_deref(), Some("1.5 + 2"));
}

/// Verifies division by zero shows NaN decoys instead of failing
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("5 / 0 =");
    assert_eq!(driver.display(), "idk NaN, maybe NaN?");
    assert_eq!(driver.equation().as_deref(), Some("5 ÷ 0"));
}

/// Verifies clear drops the display and any pending equation
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("9 * 9");
    assert!(driver.equation().is_some());
    driver.press_keys("c");
    assert_eq!(driver.display(), "0");
    assert_eq!(driver.equation(), None);
}

/// Verifies a second decimal point is ignored
pub fn verify_decimal_idempotence<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("1..5");
    assert_eq!(driver.display(), "1.5");
    driver.clear();
    driver.press_keys("3..");
    assert_eq!(driver.display(), "3.");
}

/// Verifies sign flip, percent and decimal leave a decoy untouched
pub fn verify_decoy_is_read_only<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("6 * 7 =");
    let decoy = driver.display();
    driver.press_keys("n%.");
    assert_eq!(driver.display(), decoy);
}

/// Verifies an operator resolves the pending equation before chaining
pub fn verify_chained_operator<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("2 + 3 +");
    decoys_of(driver);
    assert_eq!(driver.equation().as_deref(), Some("2 + 3"));

    // The chained operator has no operand to act on, so equals does nothing
    driver.press_keys("4 =");
    assert_eq!(driver.display(), "4");
}

/// Runs every scenario check
pub fn run_all_scenarios<D: CalculatorDriver>(driver: &mut D) {
    verify_digit_entry(driver);
    verify_whole_number_estimate(driver);
    verify_fractional_estimate(driver);
    verify_division_by_zero(driver);
    verify_clear(driver);
    verify_decimal_idempotence(driver);
    verify_decoy_is_read_only(driver);
    verify_chained_operator(driver);
}
