//! Reading catalog files into generic documents.
//!
//! A source is decoded into a `serde_json::Value` regardless of its syntax so
//! the data model is imposed in exactly one place (`Catalog::from_value`).
//! Loads are never retried.

use crate::catalog::model::Catalog;
use crate::error::{CatalogError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Syntax of a catalog file, chosen by extension.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// `.yaml` / `.yml` are read as YAML; everything else as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => SourceFormat::Yaml,
            _ => SourceFormat::Json,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceFormat::Json => "json",
            SourceFormat::Yaml => "yaml",
        }
    }
}

/// Read and decode a catalog file without imposing the catalog shape.
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.is_file() {
        return Err(CatalogError::load(path, "file does not exist"));
    }
    let data = fs::read_to_string(path).map_err(|err| CatalogError::load(path, err.to_string()))?;

    let format = SourceFormat::from_path(path);
    let document = match format {
        SourceFormat::Json => serde_json::from_str::<Value>(&data)
            .map_err(|err| CatalogError::load(path, err.to_string()))?,
        SourceFormat::Yaml => serde_yaml::from_str::<Value>(&data)
            .map_err(|err| CatalogError::load(path, err.to_string()))?,
    };
    debug!(path = %path.display(), format = format.as_str(), "decoded catalog source");
    Ok(document)
}

/// Read a catalog file and impose the catalog data model on it.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let document = load_document(path)?;
    let catalog = Catalog::from_value(document, path)?;
    debug!(
        path = %path.display(),
        catalog = catalog.id.as_str(),
        groups = catalog.groups.len(),
        "loaded catalog"
    );
    Ok(catalog)
}
