//! Price parsing, formatting, and conversion.
//!
//! Totals are scaled to integer cents and re-split with a
//! digits-then-two-digits capture. Values whose scaled representation has no
//! such pair (sums under 1.00, unparseable input) fall back to `"0.0"`.

use regex_lite::Regex;
use std::sync::LazyLock;

/// Leading float prefix: optional sign, digits with optional fraction.
static LEADING_FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)").unwrap());

/// Integer-cents split: everything up to the last two digits of the first
/// long-enough digit run, then exactly two digits.
static CENTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)(\d\d)").unwrap());

/// Parses a numeric price out of free-form currency text.
///
/// Strips the first `US` marker and the first `$`, then parses the longest
/// leading numeric prefix of what remains. Anything unparseable yields NaN,
/// which propagates silently through later arithmetic.
pub fn parse_price(text: &str) -> f64 {
    let stripped = text.replacen("US", "", 1);
    let stripped = stripped.replacen('$', "", 1);
    let trimmed = stripped.trim_start();

    match LEADING_FLOAT.find(trimmed) {
        Some(m) => m.as_str().parse().unwrap_or(f64::NAN),
        None => f64::NAN,
    }
}

/// Formats a dollar amount by scaling to cents and re-splitting.
///
/// The scaled value's shortest decimal representation is searched for a
/// digits-then-two-digits pair; the captures are joined with a decimal
/// point. No pair (values under 1.00, NaN, bare zero) yields `"0.0"`.
pub fn format_price(value: f64) -> String {
    let scaled = format!("{}", value * 100.0);

    match CENTS.captures(&scaled) {
        Some(caps) => format!("{}.{}", &caps[1], &caps[2]),
        None => "0.0".to_string(),
    }
}

/// Sums an item price and a shipping rate, both given as currency text.
pub fn total_price(price_text: &str, shipping_text: &str) -> String {
    format_price(parse_price(price_text) + parse_price(shipping_text))
}

/// Converts a formatted dollar total into the destination currency.
pub fn convert_total(total: &str, factor: f64) -> String {
    format_price(total.parse::<f64>().unwrap_or(f64::NAN) * factor)
}
