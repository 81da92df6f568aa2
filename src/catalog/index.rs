//! Indexed view of one loaded control catalog.
//!
//! The index keeps the whole tree and a map from control id to the control's
//! position, covering top-level controls and one level of nested controls.
//! Duplicate ids do not fail the build; the first occurrence in
//! `controls_all` order wins.

use crate::catalog::identity::CatalogId;
use crate::catalog::model::{Catalog, Control, Group, Metadata};
use crate::catalog::source::load_catalog;
use crate::error::{CatalogError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ControlSlot {
    group: usize,
    control: usize,
    nested: Option<usize>,
}

#[derive(Debug)]
/// Control catalog plus a derived index keyed by control id.
pub struct CatalogIndex {
    origin: Option<PathBuf>,
    catalog: Catalog,
    by_id: HashMap<String, ControlSlot>,
}

impl CatalogIndex {
    /// Load a catalog from disk and index it.
    ///
    /// Fails with `Load` when the file is missing or cannot be decoded and
    /// with `MalformedDocument` when it lacks the catalog shape.
    pub fn load(path: &Path) -> Result<Self> {
        let catalog = load_catalog(path)?;
        let mut index = Self::from_catalog(catalog);
        index.origin = Some(path.to_path_buf());
        Ok(index)
    }

    /// Index an already-loaded catalog.
    pub fn from_catalog(catalog: Catalog) -> Self {
        let by_id = build_index(&catalog);
        debug!(
            catalog = catalog.id.as_str(),
            groups = catalog.groups.len(),
            controls = by_id.len(),
            "built catalog index"
        );
        Self {
            origin: None,
            catalog,
            by_id,
        }
    }

    pub fn id(&self) -> &CatalogId {
        &self.catalog.id
    }

    pub fn title(&self) -> &str {
        &self.catalog.metadata.title
    }

    pub fn metadata(&self) -> &Metadata {
        &self.catalog.metadata
    }

    /// File the catalog was loaded from, when it came from disk.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Groups in document order.
    pub fn groups(&self) -> &[Group] {
        &self.catalog.groups
    }

    pub fn group_ids(&self) -> Vec<&str> {
        self.groups().iter().map(|group| group.id.as_str()).collect()
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups().iter().find(|group| group.id == id)
    }

    /// Top-level controls of every group, in group order.
    pub fn controls(&self) -> impl Iterator<Item = &Control> + '_ {
        self.groups().iter().flat_map(|group| group.controls.iter())
    }

    pub fn control_ids(&self) -> Vec<&str> {
        self.controls().filter_map(Control::id).collect()
    }

    /// Top-level controls, each followed by its nested controls.
    ///
    /// Flattens one level only; controls nested inside a nested control are
    /// not listed.
    pub fn controls_all(&self) -> impl Iterator<Item = &Control> + '_ {
        self.controls()
            .flat_map(|control| std::iter::once(control).chain(control.controls.iter()))
    }

    pub fn controls_all_ids(&self) -> Vec<&str> {
        self.controls_all().filter_map(Control::id).collect()
    }

    /// Resolve a control by id across top-level and nested controls.
    ///
    /// Returns `None` instead of erroring; absence is an expected outcome for
    /// callers probing ids.
    pub fn control_by_id(&self, id: &str) -> Option<&Control> {
        let slot = self.by_id.get(id)?;
        let control = self
            .catalog
            .groups
            .get(slot.group)?
            .controls
            .get(slot.control)?;
        match slot.nested {
            Some(nested) => control.controls.get(nested),
            None => Some(control),
        }
    }

    /// Label of a control parameter.
    ///
    /// Callers are expected to know the parameter exists, so a miss is an
    /// error rather than `None`.
    pub fn control_parameter_label<'c>(
        &self,
        control: &'c Control,
        param_id: &str,
    ) -> Result<&'c str> {
        parameter_label(control, param_id)
    }
}

/// Label of the parameter `param_id` declared on `control`.
pub fn parameter_label<'c>(control: &'c Control, param_id: &str) -> Result<&'c str> {
    control
        .parameters
        .iter()
        .find(|param| param.id == param_id)
        .and_then(|param| param.label.as_deref())
        .ok_or_else(|| CatalogError::not_found("parameter", param_id))
}

fn build_index(catalog: &Catalog) -> HashMap<String, ControlSlot> {
    let mut map = HashMap::new();
    for (group_idx, group) in catalog.groups.iter().enumerate() {
        for (control_idx, control) in group.controls.iter().enumerate() {
            let top = ControlSlot {
                group: group_idx,
                control: control_idx,
                nested: None,
            };
            insert_first(&mut map, control, top);
            for (nested_idx, nested) in control.controls.iter().enumerate() {
                let slot = ControlSlot {
                    nested: Some(nested_idx),
                    ..top
                };
                insert_first(&mut map, nested, slot);
            }
        }
    }
    map
}

fn insert_first(map: &mut HashMap<String, ControlSlot>, control: &Control, slot: ControlSlot) {
    let Some(id) = control.id() else {
        return;
    };
    if map.contains_key(id) {
        warn!(control = id, "duplicate control id; keeping first occurrence");
        return;
    }
    map.insert(id.to_string(), slot);
}
