//! Errors raised while loading and transforming documents
//!
//! Every failure aborts the whole load: there is no partial result and no retry.
//! The library never logs these, it hands them back to the caller.

use std::io;
use std::num::ParseFloatError;
use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Why a document's contents were rejected
#[derive(Debug, Error)]
pub enum ParseCause {
    /// The bytes are not UTF-8, which TOML requires
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Error that can occur while loading a directory of documents
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested mode is not one of `raw`, `unitless` or `parsed`
    #[error("invalid mode '{0}': choose from 'raw', 'unitless', or 'parsed'")]
    InvalidMode(String),

    /// Discovery found no documents (or the directory does not exist)
    #[error("no .{extension} files found in {}", dir.display())]
    NotFound { dir: PathBuf, extension: String },

    /// A document could not be read from disk
    #[error("error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document is not valid UTF-8 TOML
    #[error("error parsing {}: {source}", path.display())]
    ParseFailure {
        path: PathBuf,
        #[source]
        source: ParseCause,
    },

    /// The configured extension is empty, so it would match names like `foo.`
    #[error("document extension must not be empty")]
    InvalidExtension,

    /// Directory traversal failed part way through
    #[error("error walking directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// A numeric literal matched the grammar but could not be parsed as f64
    #[error("numeric literal '{literal}' cannot be represented: {source}")]
    NumericOverflow {
        literal: String,
        #[source]
        source: ParseFloatError,
    },

    /// Two discovered files share the same base name
    #[error(
        "documents {} and {} both map to the name '{name}'",
        first.display(),
        second.display()
    )]
    DuplicateName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}
