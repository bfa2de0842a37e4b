//! Value/unit extraction
//!
//! A quantity string is a floating-point literal immediately followed by a unit:
//!
//! ```text
//! 10e-3arcsecond      -> 0.01 arcsecond
//! 0.024Kelvin/hour    -> 0.024 Kelvin/hour
//! -3%                 -> -3 %
//! ```
//!
//! The unit is one or more of ASCII letters, `/`, `%` and the micro sign `µ`,
//! and must run to the end of the string. Surrounding whitespace is ignored.
//! A string with no unit (`"42"`) is not a quantity and is left alone.

use crate::error::ConfigError;
use crate::value::{Quantity, Value};
use once_cell::sync::Lazy;
use regex::Regex;

static QUANTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<number>[-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)(?P<unit>[a-zA-Z/%µ]+)$")
        .unwrap()
});

/// Split a quantity string into its numeric and unit slices
///
/// Returns `None` when the trimmed string does not match the grammar.
pub fn split_quantity(s: &str) -> Option<(&str, &str)> {
    let caps = QUANTITY_REGEX.captures(s.trim())?;
    let number = caps.name("number")?.as_str();
    let unit = caps.name("unit")?.as_str();
    Some((number, unit))
}

/// Rewrite a string leaf
///
/// With `values_only` the unit is dropped and a bare float comes back; otherwise
/// a [`Quantity`]. Strings that are not quantities are returned untouched,
/// including their original whitespace.
pub fn extract(s: &str, values_only: bool) -> Result<Value, ConfigError> {
    let Some((number, unit)) = split_quantity(s) else {
        return Ok(Value::String(s.to_string()));
    };

    let value: f64 = number
        .parse()
        .map_err(|source| ConfigError::NumericOverflow {
            literal: number.to_string(),
            source,
        })?;

    if values_only || unit.is_empty() {
        Ok(Value::Float(value))
    } else {
        Ok(Value::Quantity(Quantity::new(value, unit)))
    }
}
