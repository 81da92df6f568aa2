//! Listing of the configured catalogs.
//!
//! The registry loads every configured source once, keeps only
//! `{id, file, metadata}` per catalog, and drops the tree. Full trees are
//! reloaded through `open` when a caller selects a catalog.

use crate::catalog::identity::CatalogId;
use crate::catalog::index::CatalogIndex;
use crate::catalog::model::Metadata;
use crate::catalog::source::load_catalog;
use crate::config::{CatalogConfig, FailurePolicy};
use crate::error::{CatalogError, Result};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq)]
/// Metadata recorded for one catalog source.
pub struct RegistryEntry {
    pub id: CatalogId,
    /// Source file as configured (relative to the registry root).
    pub file: PathBuf,
    pub metadata: Metadata,
}

#[derive(Debug)]
/// Source left out of the listing under `FailurePolicy::SkipAndWarn`.
pub struct SkippedSource {
    pub file: PathBuf,
    pub error: CatalogError,
}

#[derive(Debug)]
pub struct CatalogRegistry {
    config: CatalogConfig,
    entries: Vec<RegistryEntry>,
    skipped: Vec<SkippedSource>,
}

impl CatalogRegistry {
    /// Load every configured source in order.
    ///
    /// Under `FailFast` the first failing source fails the whole build; under
    /// `SkipAndWarn` failures are logged and kept in `skipped()`.
    pub fn build(config: CatalogConfig) -> Result<Self> {
        config.validate()?;

        let mut entries = Vec::with_capacity(config.sources.len());
        let mut skipped = Vec::new();
        for source in &config.sources {
            let path = config.resolve(source);
            match load_catalog(&path) {
                Ok(catalog) => entries.push(RegistryEntry {
                    id: catalog.id,
                    file: source.file.clone(),
                    metadata: catalog.metadata,
                }),
                Err(err) => match config.on_error {
                    FailurePolicy::FailFast => return Err(err),
                    FailurePolicy::SkipAndWarn => {
                        warn!(source = %path.display(), error = %err, "skipping catalog source");
                        skipped.push(SkippedSource {
                            file: source.file.clone(),
                            error: err,
                        });
                    }
                },
            }
        }

        info!(
            catalogs = entries.len(),
            skipped = skipped.len(),
            root = %config.root.display(),
            "built catalog registry"
        );
        Ok(Self {
            config,
            entries,
            skipped,
        })
    }

    /// Catalog titles in source order.
    pub fn list(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.metadata.title.as_str())
            .collect()
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Fetch an entry by catalog id, if present.
    pub fn entry(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|entry| entry.id.as_str() == id)
    }

    pub fn skipped(&self) -> &[SkippedSource] {
        &self.skipped
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Load and index the full tree of a registered catalog.
    pub fn open(&self, id: &str) -> Result<CatalogIndex> {
        let entry = self
            .entry(id)
            .ok_or_else(|| CatalogError::not_found("catalog", id))?;
        CatalogIndex::load(&self.config.resolve_file(&entry.file))
    }
}
