//! # unitconf-parser
//!
//! Loads a directory of TOML documents and, optionally, rewrites strings that
//! carry a physical quantity (`"10e-3arcsecond"`, `"0.024Kelvin/hour"`) into
//! numbers or `{value, unit}` records.
//!
//! Layout
//!
//!   value       The document tree (`Value`, `Quantity`, `Documents`)
//!   quantity    Value/unit extraction from a single string
//!   transforms  `Mode` and the recursive tree rewrite
//!   loader      Directory discovery, parsing and indexing by file stem
//!   formats     Tree view for inspection
//!
//! Units are opaque strings: nothing here converts between them.

pub mod error;
pub mod formats;
pub mod loader;
pub mod quantity;
pub mod transforms;
pub mod value;

pub use error::{ConfigError, ParseCause};
pub use loader::{load, load_from_str, ConfigLoader, DEFAULT_EXTENSION};
pub use quantity::{extract, split_quantity};
pub use transforms::{transform, Mode};
pub use value::{lookup, Documents, Quantity, Table, Value};
