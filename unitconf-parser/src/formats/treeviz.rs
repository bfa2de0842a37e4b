//! Treeviz formatter for loaded documents
//!
//! One line per node, two spaces of indentation per level of nesting:
//!
//! ```text
//! ⧉ telescope
//!   § optics
//!     ⚖ focal: 2.4 m
//!     ☰ filters (2 items)
//!       ◦ [0]: "g"
//!       ◦ [1]: "r"
//!   ◦ name: "survey"
//! ```
//!
//! Icons
//!     Document: ⧉
//!     Table: §
//!     Array: ☰
//!     Quantity: ⚖
//!     Scalar: ◦
//!
//! Strings are quoted so that `"42"` and `42` stay distinguishable. Long scalars
//! are truncated. This is a view for people, it cannot be read back.

use crate::value::{Documents, Value};

const MAX_LABEL_CHARS: usize = 40;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(documents: &Documents) -> String {
    let mut result = String::new();
    for (name, tree) in documents {
        result.push_str(&format!("⧉ {}\n", name));
        match tree {
            Value::Table(table) => {
                for (key, value) in table {
                    push_node(&mut result, key, value, 1);
                }
            }
            other => push_node(&mut result, "", other, 1),
        }
    }
    result
}

/// Render a single value (and its children) starting at indentation level 0
pub fn value_to_treeviz_str(label: &str, value: &Value) -> String {
    let mut result = String::new();
    push_node(&mut result, label, value, 0);
    result
}

fn push_node(out: &mut String, label: &str, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Table(table) => {
            out.push_str(&format!("{}§ {}\n", indent, label));
            for (key, child) in table {
                push_node(out, key, child, depth + 1);
            }
        }
        Value::Array(items) => {
            out.push_str(&format!("{}☰ {} ({} items)\n", indent, label, items.len()));
            for (i, item) in items.iter().enumerate() {
                push_node(out, &format!("[{}]", i), item, depth + 1);
            }
        }
        Value::Quantity(q) => {
            out.push_str(&format!("{}⚖ {}: {}\n", indent, label, q));
        }
        Value::String(s) => {
            let quoted = format!("{:?}", s);
            out.push_str(&format!(
                "{}◦ {}: {}\n",
                indent,
                label,
                truncate(&quoted, MAX_LABEL_CHARS)
            ));
        }
        scalar => {
            let text = scalar.to_string();
            out.push_str(&format!(
                "{}◦ {}: {}\n",
                indent,
                label,
                truncate(&text, MAX_LABEL_CHARS)
            ));
        }
    }
}
