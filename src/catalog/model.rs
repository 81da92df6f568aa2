//! Deserializable representation of an OSCAL control catalog.
//!
//! The types mirror the catalog document closely enough for lookup and
//! rendering; fields the crate never reads are ignored. Controls, sub-controls
//! and narrative parts share the `Part` node type and are told apart by
//! `Part::kind`, which `Catalog::from_value` assigns after decoding. Use
//! `CatalogIndex` for id lookup.

use crate::catalog::identity::{CatalogId, NodeKind, PartName};
use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
/// Catalog body found under the document's top-level `catalog` key.
pub struct Catalog {
    #[serde(alias = "uuid")]
    pub id: CatalogId,
    pub metadata: Metadata,
    #[serde(default)]
    pub groups: Vec<Group>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Descriptive metadata; the registry keeps this after dropping the tree.
pub struct Metadata {
    pub title: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, alias = "oscal-version")]
    pub oscal_version: Option<String>,
    #[serde(default, alias = "last-modified")]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
/// Named collection of controls (a control family).
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub class: Option<String>,
    pub title: String,
    #[serde(default, alias = "props")]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default)]
    pub controls: Vec<Control>,
}

#[derive(Clone, Debug, Default, Deserialize)]
/// One node of the narrative tree: a control, a sub-control, or a part.
pub struct Part {
    #[serde(skip)]
    pub kind: NodeKind,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<PartName>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "props")]
    pub properties: Vec<Property>,
    #[serde(default, alias = "params")]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub prose: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default)]
    pub controls: Vec<Control>,
}

/// Controls are parts with an id, parameters and optional nested controls.
pub type Control = Part;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
/// `{name, value}` annotation; `label` is the one the renderer reads.
pub struct Property {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub class: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
/// Placeholder value referenced from control prose.
pub struct Parameter {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub guidelines: Vec<Guideline>,
    #[serde(default)]
    pub select: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Guideline {
    pub prose: String,
}

impl Catalog {
    /// Impose the catalog data model on a decoded document.
    ///
    /// `origin` only labels errors. The document must carry a top-level
    /// `catalog` object, and every control at any nesting level must have an
    /// id.
    pub fn from_value(document: Value, origin: &Path) -> Result<Self> {
        let body = match document {
            Value::Object(mut map) => map
                .remove("catalog")
                .ok_or_else(|| CatalogError::malformed(origin, "missing top-level `catalog` object"))?,
            _ => {
                return Err(CatalogError::malformed(
                    origin,
                    "document root is not an object",
                ));
            }
        };

        let mut catalog: Catalog = serde_json::from_value(body)
            .map_err(|err| CatalogError::malformed(origin, err.to_string()))?;
        for group in &mut catalog.groups {
            for control in &mut group.controls {
                tag_control(control, NodeKind::Control, origin)?;
            }
            for part in &mut group.parts {
                tag_part(part);
            }
        }
        Ok(catalog)
    }
}

fn tag_control(control: &mut Control, kind: NodeKind, origin: &Path) -> Result<()> {
    if control.id.as_deref().is_none_or(|id| id.trim().is_empty()) {
        let title = control.title.as_deref().unwrap_or("<untitled>");
        return Err(CatalogError::malformed(
            origin,
            format!("control '{title}' has no id"),
        ));
    }
    control.kind = kind;
    for part in &mut control.parts {
        tag_part(part);
    }
    for nested in &mut control.controls {
        tag_control(nested, NodeKind::SubControl, origin)?;
    }
    Ok(())
}

fn tag_part(part: &mut Part) {
    part.kind = NodeKind::Part;
    for child in &mut part.parts {
        tag_part(child);
    }
}

impl Part {
    /// Value of the first `label` property, if any.
    pub fn label(&self) -> Option<&str> {
        self.properties
            .iter()
            .find(|prop| prop.name == "label")
            .map(|prop| prop.value.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
