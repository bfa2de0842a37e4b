//! Directory loading
//!
//! [`ConfigLoader`] discovers every `*.toml` file in a directory (or its whole
//! subtree when recursive), parses each one, applies the configured [`Mode`] and
//! indexes the results by file stem.
//!
//! # Example
//!
//! ```rust,ignore
//! use unitconf_parser::ConfigLoader;
//!
//! let docs = ConfigLoader::new("configs/", "parsed", false)?.load()?;
//! let focal = docs["telescope"].get_path("optics.focal");
//! ```
//!
//! Files are visited in sorted path order. Two files with the same stem (for
//! example `a.toml` and `nested/a.toml` in recursive mode) fail the load with
//! [`ConfigError::DuplicateName`].

use crate::error::{ConfigError, ParseCause};
use crate::transforms::{transform, Mode};
use crate::value::{Documents, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extension searched for when none is configured
pub const DEFAULT_EXTENSION: &str = "toml";

/// Loads and transforms a directory of TOML documents
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    base_dir: PathBuf,
    mode: Mode,
    recursive: bool,
    extension: String,
}

impl ConfigLoader {
    /// Create a loader, validating `mode` (case-insensitive)
    pub fn new(
        base_dir: impl AsRef<Path>,
        mode: &str,
        recursive: bool,
    ) -> Result<Self, ConfigError> {
        let mode = mode.parse::<Mode>()?;
        Ok(Self::with_mode(base_dir, mode, recursive))
    }

    /// Create a loader from an already validated mode
    pub fn with_mode(base_dir: impl AsRef<Path>, mode: Mode, recursive: bool) -> Self {
        ConfigLoader {
            base_dir: base_dir.as_ref().to_path_buf(),
            mode,
            recursive,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Search for a different extension (given without the leading dot)
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// List matching files in sorted path order
    ///
    /// Fails with [`ConfigError::NotFound`] when the directory is missing or
    /// nothing matches, and with [`ConfigError::InvalidExtension`] when the
    /// extension is empty. Subdirectories that cannot be read are skipped.
    pub fn discover(&self) -> Result<Vec<PathBuf>, ConfigError> {
        debug!(
            dir = %self.base_dir.display(),
            recursive = self.recursive,
            extension = %self.extension,
            "discovering documents"
        );

        if self.extension.is_empty() {
            return Err(ConfigError::InvalidExtension);
        }
        if !self.base_dir.is_dir() {
            return Err(self.not_found());
        }

        let mut walker = WalkDir::new(&self.base_dir).min_depth(1);
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() > 0 => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            let path = entry.path();
            if path.is_file() && self.matches_extension(path) {
                debug!(path = %path.display(), "discovered document");
                files.push(entry.into_path());
            }
        }

        if files.is_empty() {
            return Err(self.not_found());
        }
        files.sort();
        Ok(files)
    }

    /// Discover, parse and transform every document
    ///
    /// The first failure aborts the load; no partial result is returned.
    pub fn load(&self) -> Result<Documents, ConfigError> {
        let files = self.discover()?;

        let mut documents = Documents::new();
        let mut origins: HashMap<String, PathBuf> = HashMap::new();

        for path in files {
            let name = document_name(&path);
            if let Some(first) = origins.get(&name) {
                return Err(ConfigError::DuplicateName {
                    name,
                    first: first.clone(),
                    second: path,
                });
            }

            let bytes = fs::read(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            let tree = String::from_utf8(bytes)
                .map_err(ParseCause::from)
                .and_then(|source| parse_document(&source))
                .map_err(|source| ConfigError::ParseFailure {
                    path: path.clone(),
                    source,
                })?;

            debug!(document = %name, mode = %self.mode, "transforming document");
            documents.insert(name.clone(), transform(tree, self.mode)?);
            origins.insert(name, path);
        }

        Ok(documents)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.to_string_lossy() == self.extension.as_str())
    }

    fn not_found(&self) -> ConfigError {
        ConfigError::NotFound {
            dir: self.base_dir.clone(),
            extension: self.extension.clone(),
        }
    }
}

/// Load `directory` in one call
pub fn load(
    directory: impl AsRef<Path>,
    mode: &str,
    recursive: bool,
) -> Result<Documents, ConfigError> {
    ConfigLoader::new(directory, mode, recursive)?.load()
}

/// Parse and transform a single in-memory document
pub fn load_from_str(source: &str, mode: Mode) -> Result<Value, ConfigError> {
    let tree = parse_document(source).map_err(|source| ConfigError::ParseFailure {
        path: PathBuf::from("<string>"),
        source,
    })?;
    transform(tree, mode)
}

fn parse_document(source: &str) -> Result<Value, ParseCause> {
    Ok(Value::from(source.parse::<toml::Table>()?))
}

/// File name with its extension removed
fn document_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
