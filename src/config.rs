//! Catalog sources and render defaults.
//!
//! Configuration is an explicit value handed to `CatalogRegistry::build`; the
//! library never consults process state on its own. `CatalogConfig::from_env`
//! is the one place environment overrides are applied.

use crate::catalog::{PartName, name_filter};
use crate::error::{CatalogError, Result};
use crate::render::{DEFAULT_INDENT, DEFAULT_PARTS, MarkupOptions};
use crate::{bundled_catalog_root, split_list};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_SOURCES: &[&str] = &[
    "NIST_SP-800-53_rev4_catalog.json",
    "NIST_SP-800-53_rev5_catalog.json",
];

/// Catalog directory used when the build recorded no bundled directory.
const FALLBACK_ROOT: &str = "data/catalogs";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub root: PathBuf,
    pub sources: Vec<SourceDescriptor>,
    pub on_error: FailurePolicy,
    pub render: RenderConfig,
}

/// One catalog file, relative to `CatalogConfig::root` unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub file: PathBuf,
}

/// What a registry build does when a source fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    #[default]
    FailFast,
    SkipAndWarn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub indent_unit: String,
    pub parts: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root: bundled_catalog_root().unwrap_or_else(|| PathBuf::from(FALLBACK_ROOT)),
            sources: DEFAULT_SOURCES
                .iter()
                .map(|file| SourceDescriptor::new(*file))
                .collect(),
            on_error: FailurePolicy::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT.to_string(),
            parts: DEFAULT_PARTS.iter().map(|part| part.to_string()).collect(),
        }
    }
}

impl SourceDescriptor {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }
}

impl RenderConfig {
    pub fn markup_options(&self) -> MarkupOptions {
        MarkupOptions {
            indent_unit: self.indent_unit.clone(),
            ..MarkupOptions::default()
        }
    }

    /// Part names included when rendering with these defaults.
    pub fn name_filter(&self) -> BTreeSet<PartName> {
        name_filter(&self.parts)
    }
}

impl CatalogConfig {
    /// Load config from a JSON file.
    ///
    /// A relative `root` is resolved against the directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config: CatalogConfig = serde_json::from_str(&contents)
            .map_err(|err| CatalogError::config(format!("{}: {err}", path.display())))?;
        if config.root.is_relative() {
            if let Some(base) = path.parent() {
                config.root = base.join(&config.root);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Defaults with `OSCAL_CATALOG_ROOT` and `OSCAL_CATALOG_SOURCES` applied.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(
            env::var("OSCAL_CATALOG_ROOT").ok(),
            env::var("OSCAL_CATALOG_SOURCES").ok(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Override root and source list; the source list is comma- or
    /// whitespace-delimited. Empty values are ignored.
    pub fn apply_overrides(&mut self, root: Option<String>, sources: Option<String>) {
        if let Some(root) = root.filter(|value| !value.trim().is_empty()) {
            self.root = PathBuf::from(root.trim());
        }
        if let Some(raw) = sources {
            let files = split_list(&raw);
            if !files.is_empty() {
                self.sources = files.into_iter().map(SourceDescriptor::new).collect();
            }
        }
    }

    /// Path of a source on disk.
    pub fn resolve(&self, source: &SourceDescriptor) -> PathBuf {
        self.resolve_file(&source.file)
    }

    pub fn resolve_file(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.root.join(file)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(CatalogError::config("at least one catalog source required"));
        }
        if self
            .sources
            .iter()
            .any(|source| source.file.as_os_str().is_empty())
        {
            return Err(CatalogError::config("catalog sources must not be empty"));
        }
        if self.render.indent_unit.is_empty() {
            return Err(CatalogError::config("render.indent_unit must not be empty"));
        }
        Ok(())
    }
}
