//! Control catalog wiring.
//!
//! This module reads OSCAL catalog documents (JSON or YAML) into the `Catalog`
//! tree and exposes identifiers shared with the renderer. Callers use
//! `CatalogIndex` for lookups inside one catalog and `CatalogRegistry` when
//! several catalogs are configured.

pub mod identity;
pub mod index;
pub mod model;
pub mod registry;
pub mod source;

pub use identity::{CatalogId, NodeKind, PartName, name_filter};
pub use index::{CatalogIndex, parameter_label};
pub use model::{Catalog, Control, Group, Guideline, Metadata, Parameter, Part, Property};
pub use registry::{CatalogRegistry, RegistryEntry, SkippedSource};
pub use source::{SourceFormat, load_catalog, load_document};
