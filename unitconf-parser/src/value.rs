//! Document tree
//!
//! A parsed document is a recursive [`Value`]: tables of named values, ordered
//! arrays, and scalars. The [`Value::Quantity`] variant only appears after a
//! `parsed` transform has split a string such as `"1.5m"` into its parts.
//!
//! Tables use a `BTreeMap`, so key order carries no meaning and iteration is
//! always sorted.

use std::collections::BTreeMap;
use std::fmt;

/// Mapping from document name (file stem) to its tree
pub type Documents = BTreeMap<String, Value>;

/// Table of named values
pub type Table = BTreeMap<String, Value>;

/// A numeric value with the unit text it was written with
///
/// The unit is stored verbatim: `"Kelvin/hour"` stays `"Kelvin/hour"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

impl Quantity {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Quantity {
            value,
            unit: unit.into(),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// One node of a document tree
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Table(Table),
    Array(Vec<Value>),
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// TOML date/time literal, kept opaque
    Datetime(toml::value::Datetime),
    Null,
    Quantity(Quantity),
}

impl Value {
    /// Short lower-case name of the variant, used by the tree view
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Table(_) => "table",
            Value::Array(_) => "array",
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Datetime(_) => "datetime",
            Value::Null => "null",
            Value::Quantity(_) => "quantity",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of floats and integers
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Value::Quantity(q) => Some(q),
            _ => None,
        }
    }

    /// Look up a direct child of a table
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_table().and_then(|table| table.get(key))
    }

    /// Follow a dotted path such as `section.items.0.length`
    ///
    /// Segments address table keys; a numeric segment indexes into an array.
    /// An empty path returns the value itself.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.').try_fold(self, |node, segment| match node {
            Value::Table(table) => table.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

/// Resolve `<document>.<key>...` against a loaded collection
///
/// Document names may contain dots (`alpha.v2.toml` loads as `alpha.v2`), so the
/// longest loaded name that prefixes the path wins.
pub fn lookup<'a>(documents: &'a Documents, path: &str) -> Option<&'a Value> {
    documents
        .iter()
        .filter_map(|(name, doc)| {
            let rest = path.strip_prefix(name.as_str())?;
            if rest.is_empty() {
                Some((name.len(), doc, ""))
            } else {
                rest.strip_prefix('.').map(|rest| (name.len(), doc, rest))
            }
        })
        .max_by_key(|(len, _, _)| *len)
        .and_then(|(_, doc, rest)| doc.get_path(rest))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Table(table) => write!(f, "{{{} keys}}", table.len()),
            Value::Array(items) => write!(f, "[{} items]", items.len()),
            Value::String(s) => write!(f, "{}", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Datetime(dt) => write!(f, "{}", dt),
            Value::Null => write!(f, "null"),
            Value::Quantity(q) => write!(f, "{}", q),
        }
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Integer(i),
            toml::Value::Float(x) => Value::Float(x),
            toml::Value::Boolean(b) => Value::Boolean(b),
            toml::Value::Datetime(dt) => Value::Datetime(dt),
            toml::Value::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            toml::Value::Table(table) => Value::from(table),
        }
    }
}

impl From<toml::Table> for Value {
    fn from(table: toml::Table) -> Self {
        Value::Table(
            table
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect(),
        )
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        Value::Quantity(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        let source = r#"
            title = "survey"
            [optics]
            aperture = "0.5m"
            filters = ["g", "r", { name = "i", width = "150nm" }]
        "#;
        Value::from(source.parse::<toml::Table>().unwrap())
    }

    #[test]
    fn test_from_toml_keeps_structure() {
        let doc = sample();
        assert_eq!(doc.get("title"), Some(&Value::from("survey")));
        let filters = doc.get_path("optics.filters").unwrap().as_array().unwrap();
        assert_eq!(filters.len(), 3);
        assert_eq!(filters[0], Value::from("g"));
    }

    #[test]
    fn test_get_path_indexes_arrays() {
        let doc = sample();
        assert_eq!(
            doc.get_path("optics.filters.2.width"),
            Some(&Value::from("150nm"))
        );
        assert_eq!(doc.get_path("optics.filters.9"), None);
        assert_eq!(doc.get_path("optics.missing"), None);
        assert_eq!(doc.get_path("title.deeper"), None);
        assert_eq!(doc.get_path(""), Some(&doc));
    }

    #[test]
    fn test_datetime_is_opaque_scalar() {
        let doc = Value::from("when = 1979-05-27T07:32:00Z".parse::<toml::Table>().unwrap());
        let when = doc.get("when").unwrap();
        assert_eq!(when.type_name(), "datetime");
        assert_eq!(when.to_string(), "1979-05-27T07:32:00Z");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Value::from(Quantity::new(0.024, "Kelvin/hour")).to_string(),
            "0.024 Kelvin/hour"
        );
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(sample().to_string(), "{2 keys}");
    }

    #[test]
    fn test_lookup_prefers_longest_document_name() {
        let mut docs = Documents::new();
        docs.insert("alpha".to_string(), Value::from("a = 1".parse::<toml::Table>().unwrap()));
        docs.insert(
            "alpha.v2".to_string(),
            Value::from("a = 2".parse::<toml::Table>().unwrap()),
        );

        assert_eq!(lookup(&docs, "alpha.a"), Some(&Value::Integer(1)));
        assert_eq!(lookup(&docs, "alpha.v2.a"), Some(&Value::Integer(2)));
        assert_eq!(lookup(&docs, "alpha.v2"), docs.get("alpha.v2"));
        assert_eq!(lookup(&docs, "alphabet.a"), None);
        assert_eq!(lookup(&docs, "alpha.v2.missing"), None);
    }

    #[test]
    fn test_as_float_accepts_integers() {
        assert_eq!(Value::from(3i64).as_float(), Some(3.0));
        assert_eq!(Value::from("3").as_float(), None);
    }
}
