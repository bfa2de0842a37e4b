//! Human-readable views of loaded documents

pub mod treeviz;

pub use treeviz::{to_treeviz_str, value_to_treeviz_str};
