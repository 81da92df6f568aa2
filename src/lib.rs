//! Indexed lookup and markup rendering over OSCAL security-control catalogs.
//!
//! The crate loads catalog documents into an in-memory tree, indexes groups
//! and controls by id, lists configured catalogs by title, and renders a
//! control's narrative parts as markdown-style text. Public functions here
//! cover the bundled catalog directory and the list parsing used by configuration
//! overrides.

use std::{fs, path::PathBuf};

pub mod catalog;
pub mod config;
pub mod error;
pub mod render;

pub use catalog::{
    Catalog, CatalogId, CatalogIndex, CatalogRegistry, Control, Group, Metadata, NodeKind,
    Parameter, Part, PartName, Property, RegistryEntry, load_catalog, load_document, name_filter,
};
pub use config::{CatalogConfig, FailurePolicy, RenderConfig, SourceDescriptor};
pub use error::{CatalogError, Result};
pub use render::{
    FilterScope, MarkupOptions, ROOT_DEPTH, render_as_markup, render_part, substitute_parameters,
};

/// Canonical form of `path` when it names an existing directory.
fn existing_dir(path: &str) -> Option<PathBuf> {
    if path.trim().is_empty() {
        return None;
    }
    let candidate = PathBuf::from(path.trim());
    if !candidate.is_dir() {
        return None;
    }
    fs::canonicalize(candidate).ok()
}

/// Catalog directory recorded by the build script, if it still exists.
///
/// The build records `OSCAL_CATALOG_DATA_DIR`, or `data/catalogs` under the
/// package, when that directory is present at compile time. Runtime
/// environment is not consulted here; `CatalogConfig::from_env` layers
/// `OSCAL_CATALOG_ROOT` on top.
pub fn bundled_catalog_root() -> Option<PathBuf> {
    option_env!("OSCAL_CATALOG_BUNDLED_DIR").and_then(existing_dir)
}

/// Split comma- or whitespace-delimited configuration lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
