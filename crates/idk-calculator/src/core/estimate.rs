//! Estimate engine: turns an exact result into two confident-sounding guesses
//!
//! The true result is computed, then two independent decoys are drawn from a
//! window of `±(|result| * 0.15 + 5)` around it and rounded to match the
//! precision of the inputs.

use super::number::{format_number, is_integral, parse_leading_number};
use super::random::RandomSource;
use super::Operation;

/// Prefix shared by every decoy string
pub const ESTIMATE_PREFIX: &str = "idk";

/// Share of the true result added to the decoy window
pub const RELATIVE_VARIANCE: f64 = 0.15;

/// Fixed part of the decoy window, so small results still get perturbed
pub const BASE_VARIANCE: f64 = 5.0;

/// Returns true if `display` holds a decoy string rather than a number
#[must_use]
pub fn is_estimate(display: &str) -> bool {
    display.contains(ESTIMATE_PREFIX)
}

/// Reads both decoys back out of a string such as `"idk 4, maybe 15?"`
///
/// Returns `None` for anything that is not a decoy string.
#[must_use]
pub fn parse_estimate(display: &str) -> Option<(f64, f64)> {
    let body = display
        .strip_prefix(ESTIMATE_PREFIX)?
        .strip_prefix(' ')?
        .strip_suffix('?')?;
    let (first, second) = body.split_once(", maybe ")?;
    Some((parse_decoy(first)?, parse_decoy(second)?))
}

fn parse_decoy(text: &str) -> Option<f64> {
    if text == "NaN" {
        return Some(f64::NAN);
    }
    parse_leading_number(text)
}

/// Rounds half-way cases toward positive infinity
///
/// `2.5` becomes `3` and `-2.5` becomes `-2`.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Rounds to one decimal place with [`round_half_up`] semantics
#[must_use]
pub fn round_tenths(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// The result of one resolution: two decoys around a hidden true result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// The exact result, never shown to the user
    pub true_result: f64,
    /// First decoy
    pub first: f64,
    /// Second decoy
    pub second: f64,
    /// Both operands were whole numbers, so the decoys are integers
    pub whole_inputs: bool,
}

impl Estimate {
    /// Half-width of the window the decoys are drawn from
    #[must_use]
    pub fn variance_for(true_result: f64) -> f64 {
        true_result.abs() * RELATIVE_VARIANCE + BASE_VARIANCE
    }

    /// Returns both decoys in draw order
    #[must_use]
    pub fn decoys(&self) -> [f64; 2] {
        [self.first, self.second]
    }
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{ESTIMATE_PREFIX} {}, maybe {}?",
            format_number(self.first),
            format_number(self.second)
        )
    }
}

/// Produces decoy estimates from an injected random source
#[derive(Debug, Clone)]
pub struct EstimateEngine<R> {
    rng: R,
}

impl<R: RandomSource> EstimateEngine<R> {
    /// Creates an engine drawing from `rng`
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the underlying random source
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Computes two decoys for `previous <op> current`
    ///
    /// Never fails: non-finite results (division by zero) flow through the
    /// formula and surface as `NaN` or infinite decoys.
    pub fn estimate(&mut self, previous: f64, current: f64, op: Operation) -> Estimate {
        let true_result = op.apply(previous, current);
        let whole_inputs = is_integral(previous) && is_integral(current);
        let variance = Estimate::variance_for(true_result);

        let first = self.decoy(true_result, variance, whole_inputs);
        let second = self.decoy(true_result, variance, whole_inputs);

        tracing::trace!(
            previous,
            current,
            op = op.symbol(),
            true_result,
            first,
            second,
            "drew estimates"
        );

        Estimate {
            true_result,
            first,
            second,
            whole_inputs,
        }
    }

    /// Computes the decoys and renders them as a display string
    pub fn describe(&mut self, previous: f64, current: f64, op: Operation) -> String {
        self.estimate(previous, current, op).to_string()
    }

    fn decoy(&mut self, true_result: f64, variance: f64, whole_inputs: bool) -> f64 {
        let offset = self.rng.next_unit() * variance * 2.0 - variance;
        let raw = true_result + offset;
        if whole_inputs {
            round_half_up(raw)
        } else {
            round_tenths(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::{seeded, SequenceSource};

    fn engine(values: &[f64]) -> EstimateEngine<SequenceSource> {
        EstimateEngine::new(SequenceSource::new(values.to_vec()))
    }

    // ===== Rounding =====

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.51), -3.0);
        assert!(round_half_up(f64::NAN).is_nan());
    }

    #[test]
    fn test_round_tenths() {
        assert_eq!(round_tenths(1.26), 1.3);
        assert_eq!(round_tenths(-1.24), -1.2);
        assert_eq!(round_tenths(3.0), 3.0);
    }

    // ===== Variance =====

    #[test]
    fn test_variance_for() {
        assert_eq!(Estimate::variance_for(0.0), 5.0);
        assert_eq!(Estimate::variance_for(100.0), 20.0);
        assert_eq!(Estimate::variance_for(-100.0), 20.0);
        assert!(Estimate::variance_for(f64::INFINITY).is_infinite());
    }

    // ===== Engine =====

    #[test]
    fn test_midpoint_draw_returns_true_result() {
        let mut engine = engine(&[0.5]);
        let estimate = engine.estimate(7.0, 3.0, Operation::Add);
        assert_eq!(estimate.true_result, 10.0);
        assert_eq!(estimate.decoys(), [10.0, 10.0]);
        assert!(estimate.whole_inputs);
    }

    #[test]
    fn test_draws_span_the_window() {
        // 7 + 3 = 10, variance = 6.5, window [3.5, 16.5)
        let mut engine = engine(&[0.0, 0.9]);
        let estimate = engine.estimate(7.0, 3.0, Operation::Add);
        assert_eq!(estimate.first, 4.0); // 3.5 rounds up
        assert_eq!(estimate.second, 15.0); // 10 + 5.2 = 15.2
    }

    #[test]
    fn test_decoys_are_independent_draws() {
        let mut engine = engine(&[0.1, 0.8]);
        let estimate = engine.estimate(100.0, 0.0, Operation::Add);
        assert_ne!(estimate.first, estimate.second);
        assert_eq!(engine.rng_mut().draws(), 2);
    }

    #[test]
    fn test_fractional_inputs_round_to_tenths() {
        // 1.5 + 2 = 3.5, variance = 5.525
        let mut engine = engine(&[0.25, 0.75]);
        let estimate = engine.estimate(1.5, 2.0, Operation::Add);
        assert!(!estimate.whole_inputs);
        for decoy in estimate.decoys() {
            assert_eq!(round_tenths(decoy), decoy);
        }
        assert_eq!(estimate.first, 0.7); // 3.5 - 2.7625
        assert_eq!(estimate.second, 6.3); // 3.5 + 2.7625
    }

    #[test]
    fn test_whole_inputs_with_fractional_result_stay_integral() {
        let mut engine = engine(&[0.3, 0.6]);
        let estimate = engine.estimate(7.0, 2.0, Operation::Divide);
        assert!(estimate.whole_inputs);
        assert_eq!(estimate.first.fract(), 0.0);
        assert_eq!(estimate.second.fract(), 0.0);
    }

    #[test]
    fn test_display_string() {
        let mut engine = engine(&[0.0, 0.9]);
        assert_eq!(
            engine.describe(7.0, 3.0, Operation::Add),
            "idk 4, maybe 15?"
        );
    }

    #[test]
    fn test_display_string_with_decimals() {
        let mut engine = engine(&[0.25, 0.75]);
        assert_eq!(
            engine.describe(1.5, 2.0, Operation::Add),
            "idk 0.7, maybe 6.3?"
        );
    }

    #[test]
    fn test_divide_by_zero_does_not_panic() {
        let mut engine = engine(&[0.3, 0.7]);
        let estimate = engine.estimate(5.0, 0.0, Operation::Divide);
        assert!(estimate.true_result.is_infinite());
        // inf + (u * inf * 2 - inf) is NaN
        assert!(estimate.first.is_nan());
        assert!(estimate.second.is_nan());
        assert_eq!(estimate.to_string(), "idk NaN, maybe NaN?");
    }

    #[test]
    fn test_zero_over_zero() {
        let mut engine = engine(&[0.5]);
        let text = engine.describe(0.0, 0.0, Operation::Divide);
        assert_eq!(text, "idk NaN, maybe NaN?");
    }

    #[test]
    fn test_negative_results() {
        let mut engine = engine(&[0.5]);
        let estimate = engine.estimate(3.0, 10.0, Operation::Subtract);
        assert_eq!(estimate.true_result, -7.0);
        assert_eq!(estimate.first, -7.0);
    }

    #[test]
    fn test_seeded_engine_stays_in_window() {
        let mut engine = EstimateEngine::new(seeded(7));
        for _ in 0..500 {
            let estimate = engine.estimate(40.0, 2.0, Operation::Multiply);
            let variance = Estimate::variance_for(80.0);
            for decoy in estimate.decoys() {
                assert!(decoy >= (80.0 - variance).floor());
                assert!(decoy <= (80.0 + variance).ceil());
            }
        }
    }

    #[test]
    fn test_parse_estimate() {
        assert_eq!(parse_estimate("idk 4, maybe 15?"), Some((4.0, 15.0)));
        assert_eq!(parse_estimate("idk -0.7, maybe 6.3?"), Some((-0.7, 6.3)));
        let (a, b) = parse_estimate("idk NaN, maybe NaN?").unwrap();
        assert!(a.is_nan() && b.is_nan());
        assert_eq!(parse_estimate("12"), None);
        assert_eq!(parse_estimate("idk 4"), None);
    }

    #[test]
    fn test_parse_estimate_reads_rendered_estimates() {
        let mut engine = engine(&[0.1, 0.95]);
        let estimate = engine.estimate(1234.0, 5678.0, Operation::Multiply);
        assert_eq!(
            parse_estimate(&estimate.to_string()),
            Some((estimate.first, estimate.second))
        );
    }

    #[test]
    fn test_is_estimate() {
        assert!(is_estimate("idk 9, maybe 12?"));
        assert!(!is_estimate("12"));
        assert!(!is_estimate("0."));
    }
}
