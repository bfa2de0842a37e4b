//! Tree transforms
//!
//! A [`Mode`] selects how string leaves are rewritten:
//!
//! - `raw`: nothing changes
//! - `unitless`: quantity strings become bare floats, the unit is discarded
//! - `parsed`: quantity strings become [`Quantity`](crate::value::Quantity) records
//!
//! Tables keep their keys, arrays keep their order and non-string scalars pass
//! through untouched, so running a transform twice is the same as running it once.

use crate::error::ConfigError;
use crate::quantity::extract;
use crate::value::{Table, Value};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How string leaves are rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Mode {
    #[default]
    Raw,
    Unitless,
    Parsed,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Raw, Mode::Unitless, Mode::Parsed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Raw => "raw",
            Mode::Unitless => "unitless",
            Mode::Parsed => "parsed",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    /// Case-insensitive: `"RAW"` is accepted, `"Raw2"` is not
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::InvalidMode(s.to_string()))
    }
}

impl TryFrom<String> for Mode {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Rewrite a document tree according to `mode`
pub fn transform(tree: Value, mode: Mode) -> Result<Value, ConfigError> {
    match mode {
        Mode::Raw => Ok(tree),
        Mode::Unitless => parse_units(tree, true),
        Mode::Parsed => parse_units(tree, false),
    }
}

fn parse_units(tree: Value, values_only: bool) -> Result<Value, ConfigError> {
    match tree {
        Value::Table(table) => {
            let mut out = Table::new();
            for (key, value) in table {
                out.insert(key, parse_units(value, values_only)?);
            }
            Ok(Value::Table(out))
        }
        Value::Array(items) => items
            .into_iter()
            .map(|item| parse_units(item, values_only))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::String(s) => extract(&s, values_only),
        other => Ok(other),
    }
}
