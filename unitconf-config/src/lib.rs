//! Settings for the unitconf tools
//!
//! The built-in defaults live in `defaults/unitconf.default.toml` and are
//! compiled into the crate. A settings file and command-line overrides are
//! layered over them with [`Loader`], and the merged result deserializes into
//! [`UnitconfConfig`]. An unknown `loader.mode` fails in [`Loader::build`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use unitconf_parser::{ConfigLoader, Mode};

const DEFAULT_TOML: &str = include_str!("../defaults/unitconf.default.toml");

/// Everything the unitconf tools read from settings
#[derive(Debug, Clone, Deserialize)]
pub struct UnitconfConfig {
    pub loader: LoaderConfig,
}

/// The `[loader]` table: how a directory is discovered and transformed
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    pub mode: Mode,
    pub recursive: bool,
    pub extension: String,
}

impl LoaderConfig {
    /// Directory loader for `dir` using these options
    pub fn into_loader(self, dir: impl AsRef<Path>) -> ConfigLoader {
        ConfigLoader::with_mode(dir, self.mode, self.recursive).with_extension(self.extension)
    }
}

/// Layers settings sources, lowest precedence first
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Settings containing only the compiled-in `[loader]` defaults
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML settings file; `build` fails if it does not exist
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// Add a TOML settings file that may be absent
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), false)
    }

    /// Override one dotted key such as `loader.mode`, above every file
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers and deserialize them into [`UnitconfConfig`]
    pub fn build(self) -> Result<UnitconfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The compiled-in defaults, with no file or override applied
pub fn load_defaults() -> Result<UnitconfConfig, ConfigError> {
    Loader::new().build()
}
