//! Shared configuration loader for the mdcn toolchain.
//!
//! `defaults/mdcn.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific
//! files on top of those defaults via [`Loader`] before deserializing into
//! [`MdcnConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdcn_convert::{ConversionOptions, Margins};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mdcn.default.toml");

/// Top-level configuration consumed by mdcn applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdcnConfig {
    pub document: DocumentConfig,
    pub docx: DocxConfig,
    pub output: OutputConfig,
}

/// HTML document settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    pub title: String,
}

/// Mirrors the knobs the DOCX serializer exposes.
#[derive(Debug, Clone, Deserialize)]
pub struct DocxConfig {
    pub font: String,
    pub font_size: usize,
    pub page_number: bool,
    pub margin: MarginConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarginConfig {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

/// Output handling preferences for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub emit_html: bool,
}

impl From<&MarginConfig> for Margins {
    fn from(config: &MarginConfig) -> Self {
        Margins {
            top: config.top,
            right: config.right,
            bottom: config.bottom,
            left: config.left,
        }
    }
}

impl From<&MdcnConfig> for ConversionOptions {
    fn from(config: &MdcnConfig) -> Self {
        ConversionOptions {
            title: config.document.title.clone(),
            margin: (&config.docx.margin).into(),
            font: config.docx.font.clone(),
            font_size: config.docx.font_size,
            page_number: config.docx.page_number,
            base_url: None,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdcnConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdcnConfig, ConfigError> {
    Loader::new().build()
}
