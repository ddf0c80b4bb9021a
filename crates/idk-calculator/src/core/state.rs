//! Calculator state machine
//!
//! Holds the five pieces of interaction state (display, pending operand,
//! pending operator, reset flag, last equation) and applies keypad events
//! to them. Every operator or equals press that completes an equation is
//! answered by the [`EstimateEngine`] instead of the true result.

use super::estimate::{is_estimate, EstimateEngine};
use super::number::{format_number, parse_leading_number};
use super::random::RandomSource;
use super::Operation;

/// Display value after a clear
pub const INITIAL_DISPLAY: &str = "0";

/// Where the user is in entering an equation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Digits extend the current display
    Entering,
    /// An operator or equals was just pressed; the next digit starts fresh
    AwaitingNext,
}

/// The calculator: interaction state plus the estimate engine
#[derive(Debug, Clone)]
pub struct EstimateCalculator<R> {
    display: String,
    pending_operand: Option<f64>,
    pending_operator: Option<Operation>,
    reset_on_next_digit: bool,
    last_equation: String,
    engine: EstimateEngine<R>,
}

impl<R: RandomSource> EstimateCalculator<R> {
    /// Creates a calculator in its initial state
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self {
            display: INITIAL_DISPLAY.to_string(),
            pending_operand: None,
            pending_operator: None,
            reset_on_next_digit: false,
            last_equation: String::new(),
            engine: EstimateEngine::new(rng),
        }
    }

    /// The text currently held by the display
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Left-hand operand waiting for its right-hand side
    #[must_use]
    pub fn pending_operand(&self) -> Option<f64> {
        self.pending_operand
    }

    /// Operator waiting to be resolved
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operation> {
        self.pending_operator
    }

    /// Whether the next digit replaces the display
    #[must_use]
    pub fn reset_on_next_digit(&self) -> bool {
        self.reset_on_next_digit
    }

    /// The last resolved equation, empty if none
    #[must_use]
    pub fn last_equation(&self) -> &str {
        &self.last_equation
    }

    /// Current phase, derived from the reset flag
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.reset_on_next_digit {
            Phase::AwaitingNext
        } else {
            Phase::Entering
        }
    }

    /// Whether the display holds a decoy string
    #[must_use]
    pub fn is_estimate(&self) -> bool {
        is_estimate(&self.display)
    }

    /// Secondary line shown above the display
    ///
    /// While an operator is pending this is the equation being typed; once a
    /// decoy is showing it is the equation that produced it.
    #[must_use]
    pub fn equation_preview(&self) -> Option<String> {
        if self.is_estimate() {
            return (!self.last_equation.is_empty()).then(|| self.last_equation.clone());
        }
        match (self.pending_operand, self.pending_operator) {
            (Some(operand), Some(op)) => Some(format!(
                "{} {} {}",
                format_number(operand),
                op.symbol(),
                self.display
            )),
            _ => None,
        }
    }

    /// Handles a digit key; values above 9 are ignored
    pub fn press_digit(&mut self, digit: u8) {
        let Some(c) = char::from_digit(u32::from(digit), 10) else {
            tracing::debug!(digit, "ignoring non-decimal digit");
            return;
        };

        if self.reset_on_next_digit {
            self.display.clear();
            self.display.push(c);
            self.reset_on_next_digit = false;
        } else if self.display == INITIAL_DISPLAY {
            self.display.clear();
            self.display.push(c);
        } else {
            self.display.push(c);
        }
        tracing::trace!(display = %self.display, "digit");
    }

    /// Handles an operator key
    ///
    /// The first operator captures the display as the pending operand. An
    /// operator pressed while one is already pending resolves it first.
    pub fn press_operator(&mut self, op: Operation) {
        let current = self.current_value();

        match (self.pending_operand, self.pending_operator) {
            (None, _) => {
                self.pending_operand = Some(current);
                self.last_equation.clear();
            }
            (Some(previous), Some(pending)) => self.resolve(previous, current, pending),
            (Some(_), None) => {}
        }

        self.pending_operator = Some(op);
        self.reset_on_next_digit = true;
        tracing::debug!(op = op.symbol(), "operator");
    }

    /// Handles the equals key; a no-op unless an operand and operator are pending
    pub fn press_equals(&mut self) {
        let (Some(previous), Some(op)) = (self.pending_operand, self.pending_operator) else {
            tracing::trace!("equals with nothing pending");
            return;
        };
        let current = self.current_value();
        self.resolve(previous, current, op);
        self.reset_on_next_digit = true;
    }

    /// Resets every field to its initial value
    pub fn clear(&mut self) {
        self.display.clear();
        self.display.push_str(INITIAL_DISPLAY);
        self.pending_operand = None;
        self.pending_operator = None;
        self.reset_on_next_digit = false;
        self.last_equation.clear();
        tracing::debug!("clear");
    }

    /// Negates the displayed number; a no-op if it does not parse
    pub fn toggle_sign(&mut self) {
        if let Some(value) = self.parsed_display() {
            self.display = format_number(-value);
        }
    }

    /// Divides the displayed number by 100; a no-op if it does not parse
    pub fn percent(&mut self) {
        if let Some(value) = self.parsed_display() {
            self.display = format_number(value / 100.0);
        }
    }

    /// Appends a decimal point unless there already is one or a decoy is showing
    pub fn press_decimal(&mut self) {
        if !self.display.contains('.') && !self.is_estimate() {
            self.display.push('.');
        }
    }

    fn parsed_display(&self) -> Option<f64> {
        parse_leading_number(&self.display).filter(|v| !v.is_nan())
    }

    /// Value of the display as an operand; unparsable text becomes NaN
    fn current_value(&self) -> f64 {
        parse_leading_number(&self.display).unwrap_or(f64::NAN)
    }

    fn resolve(&mut self, previous: f64, current: f64, op: Operation) {
        self.last_equation = format!(
            "{} {} {}",
            format_number(previous),
            op.symbol(),
            format_number(current)
        );
        self.display = self.engine.describe(previous, current, op);
        self.pending_operand = None;
        self.pending_operator = None;
        tracing::debug!(
            equation = %self.last_equation,
            display = %self.display,
            "resolved"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::number::parse_leading_number;
    use crate::core::random::SequenceSource;

    fn calc() -> EstimateCalculator<SequenceSource> {
        EstimateCalculator::new(SequenceSource::constant(0.5))
    }

    fn type_digits(calc: &mut EstimateCalculator<SequenceSource>, digits: &str) {
        for c in digits.chars() {
            calc.press_digit(c.to_digit(10).unwrap() as u8);
        }
    }

    fn assert_initial(calc: &EstimateCalculator<SequenceSource>) {
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.pending_operand(), None);
        assert_eq!(calc.pending_operator(), None);
        assert!(!calc.reset_on_next_digit());
        assert_eq!(calc.last_equation(), "");
    }

    // ===== Initial state =====

    #[test]
    fn test_new_is_initial() {
        let calc = calc();
        assert_initial(&calc);
        assert_eq!(calc.phase(), Phase::Entering);
        assert_eq!(calc.equation_preview(), None);
    }

    // ===== Digits =====

    #[test]
    fn test_digit_replaces_leading_zero() {
        let mut calc = calc();
        calc.press_digit(7);
        assert_eq!(calc.display(), "7");
    }

    #[test]
    fn test_digits_concatenate() {
        let mut calc = calc();
        type_digits(&mut calc, "1234");
        assert_eq!(calc.display(), "1234");
    }

    #[test]
    fn test_repeated_zero_stays_zero() {
        let mut calc = calc();
        type_digits(&mut calc, "000");
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_digit_after_operator_starts_fresh() {
        let mut calc = calc();
        type_digits(&mut calc, "12");
        calc.press_operator(Operation::Add);
        assert_eq!(calc.phase(), Phase::AwaitingNext);
        calc.press_digit(3);
        assert_eq!(calc.display(), "3");
        assert_eq!(calc.phase(), Phase::Entering);
    }

    #[test]
    fn test_invalid_digit_ignored() {
        let mut calc = calc();
        calc.press_digit(5);
        calc.press_digit(10);
        assert_eq!(calc.display(), "5");
    }

    // ===== Operators =====

    #[test]
    fn test_first_operator_keeps_display() {
        let mut calc = calc();
        calc.press_digit(7);
        calc.press_operator(Operation::Add);
        assert_eq!(calc.display(), "7");
        assert_eq!(calc.pending_operand(), Some(7.0));
        assert_eq!(calc.pending_operator(), Some(Operation::Add));
        assert!(calc.reset_on_next_digit());
    }

    #[test]
    fn test_first_operator_clears_last_equation() {
        let mut calc = calc();
        calc.press_digit(7);
        calc.press_operator(Operation::Add);
        calc.press_digit(3);
        calc.press_equals();
        assert_eq!(calc.last_equation(), "7 + 3");

        calc.press_digit(2);
        calc.press_operator(Operation::Multiply);
        assert_eq!(calc.last_equation(), "");
    }

    #[test]
    fn test_chained_operator_resolves_pending() {
        let mut calc = calc();
        calc.press_digit(7);
        calc.press_operator(Operation::Add);
        calc.press_digit(3);
        calc.press_operator(Operation::Subtract);

        assert!(calc.is_estimate());
        assert_eq!(calc.display(), "idk 10, maybe 10?");
        assert_eq!(calc.last_equation(), "7 + 3");
        assert_eq!(calc.pending_operand(), None);
        assert_eq!(calc.pending_operator(), Some(Operation::Subtract));
        assert!(calc.reset_on_next_digit());
    }

    #[test]
    fn test_operator_change_resolves_against_same_value() {
        // Pressing a second operator without a new digit resolves 7 + 7
        let mut calc = calc();
        calc.press_digit(7);
        calc.press_operator(Operation::Add);
        calc.press_operator(Operation::Multiply);
        assert_eq!(calc.last_equation(), "7 + 7");
    }

    #[test]
    fn test_operator_on_decoy_captures_nan() {
        let mut calc = calc();
        calc.press_digit(7);
        calc.press_operator(Operation::Add);
        calc.press_digit(3);
        calc.press_equals();
        calc.press_operator(Operation::Add);
        assert!(calc.pending_operand().unwrap().is_nan());
    }

    // ===== Equals =====

    #[test]
    fn test_equals_scenario_whole_numbers() {
        let mut calc = calc();
        calc.press_digit(7);
        calc.press_operator(Operation::Add);
        calc.press_digit(3);
        calc.press_equals();

        assert_eq!(calc.display(), "idk 10, maybe 10?");
        assert_eq!(calc.last_equation(), "7 + 3");
        assert_eq!(calc.pending_operand(), None);
        assert_eq!(calc.pending_operator(), None);
        assert!(calc.reset_on_next_digit());
    }

    #[test]
    fn test_equals_without_pending_is_noop() {
        let mut calc = calc();
        calc.press_digit(7);
        calc.press_equals();
        assert_eq!(calc.display(), "7");
        assert!(!calc.reset_on_next_digit());
        assert_eq!(calc.last_equation(), "");
    }

    #[test]
    fn test_equals_after_chained_resolution_is_noop() {
        let mut calc = calc();
        type_digits(&mut calc, "7");
        calc.press_operator(Operation::Add);
        calc.press_digit(3);
        calc.press_operator(Operation::Add);
        calc.press_digit(2);
        calc.press_equals();
        // Operand was consumed by the chained resolution
        assert_eq!(calc.display(), "2");
    }

    #[test]
    fn test_digit_after_equals_starts_new_number() {
        let mut calc = calc();
        calc.press_digit(7);
        calc.press_operator(Operation::Add);
        calc.press_digit(3);
        calc.press_equals();
        calc.press_digit(4);
        assert_eq!(calc.display(), "4");
    }

    #[test]
    fn test_divide_by_zero_scenario() {
        let mut calc = calc();
        calc.press_digit(5);
        calc.press_operator(Operation::Divide);
        calc.press_digit(0);
        calc.press_equals();
        assert_eq!(calc.display(), "idk NaN, maybe NaN?");
        assert_eq!(calc.last_equation(), "5 ÷ 0");
    }

    #[test]
    fn test_decimal_scenario() {
        let mut calc = EstimateCalculator::new(SequenceSource::new([0.25, 0.75]));
        calc.press_digit(1);
        calc.press_decimal();
        calc.press_digit(5);
        calc.press_operator(Operation::Add);
        calc.press_digit(2);
        calc.press_equals();
        assert_eq!(calc.display(), "idk 0.7, maybe 6.3?");
        assert_eq!(calc.last_equation(), "1.5 + 2");
    }

    // ===== Clear =====

    #[test]
    fn test_clear_resets_everything() {
        let mut calc = calc();
        calc.press_digit(7);
        calc.press_operator(Operation::Add);
        calc.press_digit(3);
        calc.press_equals();
        calc.press_operator(Operation::Add);
        calc.clear();
        assert_initial(&calc);
    }

    // ===== Sign flip =====

    #[test]
    fn test_toggle_sign() {
        let mut calc = calc();
        type_digits(&mut calc, "12");
        calc.toggle_sign();
        assert_eq!(calc.display(), "-12");
        calc.toggle_sign();
        assert_eq!(calc.display(), "12");
    }

    #[test]
    fn test_toggle_sign_zero_stays_zero() {
        let mut calc = calc();
        calc.toggle_sign();
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_toggle_sign_drops_trailing_point() {
        let mut calc = calc();
        calc.press_digit(5);
        calc.press_decimal();
        calc.toggle_sign();
        assert_eq!(calc.display(), "-5");
    }

    #[test]
    fn test_toggle_sign_on_decoy_is_noop() {
        let mut calc = calc();
        calc.press_digit(7);
        calc.press_operator(Operation::Add);
        calc.press_digit(3);
        calc.press_equals();
        let before = calc.display().to_string();
        calc.toggle_sign();
        assert_eq!(calc.display(), before);
    }

    // ===== Percent =====

    #[test]
    fn test_percent() {
        let mut calc = calc();
        type_digits(&mut calc, "50");
        calc.percent();
        assert_eq!(calc.display(), "0.5");
    }

    #[test]
    fn test_percent_on_decoy_is_noop() {
        let mut calc = calc();
        calc.press_digit(1);
        calc.press_operator(Operation::Multiply);
        calc.press_digit(2);
        calc.press_equals();
        let before = calc.display().to_string();
        calc.percent();
        assert_eq!(calc.display(), before);
    }

    #[test]
    fn test_percent_keeps_fraction() {
        let mut calc = calc();
        calc.press_digit(5);
        calc.percent();
        assert_eq!(calc.display(), "0.05");
    }

    #[test]
    fn test_percent_tiny_values_use_exponent() {
        let mut calc = calc();
        calc.press_digit(1);
        for _ in 0..5 {
            calc.percent();
        }
        assert!(calc.display().contains("e-"));
        let value = parse_leading_number(calc.display()).unwrap();
        assert!((value - 1e-10).abs() < 1e-20);
    }

    // ===== Decimal point =====

    #[test]
    fn test_decimal_point() {
        let mut calc = calc();
        calc.press_decimal();
        assert_eq!(calc.display(), "0.");
        calc.press_digit(5);
        assert_eq!(calc.display(), "0.5");
    }

    #[test]
    fn test_decimal_point_idempotent() {
        let mut calc = calc();
        calc.press_digit(3);
        calc.press_decimal();
        calc.press_decimal();
        assert_eq!(calc.display(), "3.");
    }

    #[test]
    fn test_decimal_point_ignored_on_decoy() {
        let mut calc = calc();
        calc.press_digit(7);
        calc.press_operator(Operation::Add);
        calc.press_digit(3);
        calc.press_equals();
        let before = calc.display().to_string();
        calc.press_decimal();
        assert_eq!(calc.display(), before);
    }

    // ===== Equation preview =====

    #[test]
    fn test_preview_while_typing_second_operand() {
        let mut calc = calc();
        calc.press_digit(7);
        calc.press_operator(Operation::Multiply);
        assert_eq!(calc.equation_preview().as_deref(), Some("7 × 7"));
        calc.press_digit(3);
        calc.press_decimal();
        assert_eq!(calc.equation_preview().as_deref(), Some("7 × 3."));
    }

    #[test]
    fn test_preview_shows_last_equation_with_decoy() {
        let mut calc = calc();
        calc.press_digit(7);
        calc.press_operator(Operation::Add);
        calc.press_digit(3);
        calc.press_equals();
        assert_eq!(calc.equation_preview().as_deref(), Some("7 + 3"));
    }

    #[test]
    fn test_preview_after_chain_shows_last_equation() {
        let mut calc = calc();
        calc.press_digit(7);
        calc.press_operator(Operation::Add);
        calc.press_digit(3);
        calc.press_operator(Operation::Add);
        // Decoy is showing, so the resolved equation wins over the pending one
        assert_eq!(calc.equation_preview().as_deref(), Some("7 + 3"));
    }
}
