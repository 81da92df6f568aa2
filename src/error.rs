//! Error taxonomy for catalog loading and lookup.
//!
//! Loading distinguishes sources that cannot be read or decoded (`Load`) from
//! decoded documents that lack the expected shape (`MalformedDocument`).
//! Control lookups return `Option`; `NotFound` is reserved for lookups the
//! caller is expected to have validated already (parameter labels, registry
//! ids). Rendering has no error cases.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Source file is missing, unreadable, or not valid JSON/YAML.
    #[error("failed to load catalog {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// Decoded document does not match the catalog data model.
    #[error("malformed catalog document {path}: {message}")]
    MalformedDocument { path: PathBuf, message: String },

    /// Identifier lookup with no match.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("invalid catalog configuration: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CatalogError::Load {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CatalogError::MalformedDocument {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CatalogError::Config {
            message: message.into(),
        }
    }
}
