//! Number <-> text conversions used by the display
//!
//! The display is a string, so every numeric operation goes through a
//! lenient parse of its leading number and back through [`format_number`].

/// Maximum fraction digits shown by [`format_grouped`]
pub const MAX_FRACTION_DIGITS: usize = 8;

/// Parses the longest numeric prefix of `text`
///
/// Leading whitespace is skipped, then an optional sign, then either
/// `Infinity` or a decimal literal with optional fraction and exponent.
/// Trailing garbage is ignored (`"5."` is 5, `"12abc"` is 12). Returns `None`
/// when no digits lead the text, which is the case for decoy strings.
#[must_use]
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            end = 1;
            true
        }
        Some(b'+') => {
            end = 1;
            false
        }
        _ => false,
    };

    if text[end..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    let mut literal_end = end;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_digits = frac_end - frac_start;
        end = frac_end;
        literal_end = if frac_digits > 0 { frac_end } else { frac_start - 1 };
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    let mut exp_end = None;
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut cursor = end + 1;
        if cursor < bytes.len() && matches!(bytes[cursor], b'+' | b'-') {
            cursor += 1;
        }
        let digits_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > digits_start {
            exp_end = Some((end, cursor));
        }
    }

    let mut literal = String::with_capacity(text.len() + 1);
    if negative {
        literal.push('-');
    }
    if int_digits == 0 {
        literal.push('0');
    }
    literal.push_str(&text[int_start..literal_end]);
    if let Some((exp_start, exp_stop)) = exp_end {
        literal.push_str(&text[exp_start..exp_stop]);
    }

    literal.parse::<f64>().ok()
}

/// Returns true when `value` is a finite whole number
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Renders a number the way it is stored back into the display
///
/// Integers carry no fraction (`7`, not `7.0`), negative zero renders as `0`,
/// non-finite values render as `NaN`, `Infinity` and `-Infinity`. Magnitudes
/// from `1e21` up and below `1e-6` use exponent notation (`1e+21`, `1.5e-7`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if value == 0.0 {
        return "0".into();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{value:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    } else {
        format!("{value}")
    }
}

/// Formats a number for the main display with en-US digit grouping
///
/// At most [`MAX_FRACTION_DIGITS`] fraction digits are kept and trailing
/// zeros are dropped: `1234567.5` renders as `1,234,567.5`.
#[must_use]
pub fn format_grouped(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.into();
    }

    let (int_part, frac_part) = match shortest_digits(value.abs()) {
        (int_part, frac_part) if frac_part.len() <= MAX_FRACTION_DIGITS => (int_part, frac_part),
        // Too many fraction digits means the value is below 2^53, so the
        // fixed rendering keeps the integer part exact.
        _ => {
            let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
            let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
            (int_part.to_string(), frac_part.to_string())
        }
    };
    let int_part = int_part.as_str();
    let frac_part = frac_part.trim_end_matches('0');

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();

    let mut out = String::with_capacity(int_part.len() * 4 / 3 + frac_part.len() + 2);
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Splits a finite, non-negative value into the integer and fraction digits
/// of its shortest round-trip representation
fn shortest_digits(magnitude: f64) -> (String, String) {
    let scientific = format!("{magnitude:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i64 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    // Position of the decimal point counted from the first digit
    let point = exponent + 1;
    let len = digits.len() as i64;
    if point <= 0 {
        let zeros = "0".repeat(point.unsigned_abs() as usize);
        ("0".to_string(), format!("{zeros}{digits}"))
    } else if point >= len {
        let zeros = "0".repeat((point - len) as usize);
        (format!("{digits}{zeros}"), String::new())
    } else {
        let (int_part, frac_part) = digits.split_at(point as usize);
        (int_part.to_string(), frac_part.to_string())
    }
}

/// Inserts `,` every three digits from the right
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
