//! Display formatting for dashboard metrics.
//!
//! Only the "Total Revenue" and "Average Monetary" tiles are rendered as
//! currency; every other figure uses plain number formatting.

/// Format a number with en-US thousands separators and a fixed number of
/// decimal places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let rounded = round_to(value.abs(), decimals);
    let fixed = format!("{:.prec$}", rounded, prec = decimals as usize);

    let (int_digits, frac_digits) = match fixed.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && rounded != 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_digits));
    if let Some(frac) = frac_digits {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a monetary amount as US dollars: comma grouping, two decimals,
/// and the minus sign ahead of the currency symbol.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56), "$1,234.56");
/// assert_eq!(format_currency(0.0), "$0.00");
/// assert_eq!(format_currency(-9.99), "-$9.99");
/// ```
pub fn format_currency(amount: f64) -> String {
    let body = format_number(amount.abs(), 2);
    if amount < 0.0 && body != "0.00" {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Round `value` half away from zero to `decimals` places.
///
/// A relative nudge of one machine epsilon keeps decimal midpoints such as
/// `1.005` from rounding down because of their binary representation.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::round_to;
///
/// assert_eq!(round_to(12.345, 1), 12.3);
/// assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    let scaled = value * factor;
    let nudge = f64::EPSILON * scaled.abs();
    (scaled + nudge.copysign(scaled)).round() / factor
}

/// `(part / whole) * 100`, rounded to `decimal_places`; `0.0` when `whole`
/// is zero.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::percentage;
///
/// assert!((percentage(50.0, 200.0, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(0.0, 0.0, 2), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    round_to(part / whole * 100.0, decimal_places)
}

/// Insert a comma every three digits, counting from the right.
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

// ── Tests ──────────────────────────────────────────────────────────────────────
