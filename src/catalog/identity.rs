use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

/// Identifier declared by a catalog document (`catalog.id`, or `catalog.uuid`
/// in OSCAL 1.0 documents).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(pub String);

impl CatalogId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Semantic tag of a narrative part.
///
/// Names are not unique and only drive filtering during rendering. Known
/// variants cover the OSCAL part names; `Other` keeps catalogs that introduce
/// new names loadable.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PartName {
    Statement,
    Guidance,
    Item,
    Objective,
    Assessment,
    Overview,
    Other(String),
}

/// Role a node plays in the catalog tree.
///
/// Controls, sub-controls and parts share one node type; the kind is assigned
/// while the document is loaded from where the node sits.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NodeKind {
    Control,
    SubControl,
    #[default]
    Part,
}

impl Serialize for PartName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PartName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_name(&value))
    }
}

impl PartName {
    pub fn as_str(&self) -> &str {
        match self {
            PartName::Statement => "statement",
            PartName::Guidance => "guidance",
            PartName::Item => "item",
            PartName::Objective => "objective",
            PartName::Assessment => "assessment",
            PartName::Overview => "overview",
            PartName::Other(value) => value.as_str(),
        }
    }

    pub fn from_name(value: &str) -> Self {
        match value {
            "statement" => PartName::Statement,
            "guidance" => PartName::Guidance,
            "item" => PartName::Item,
            "objective" => PartName::Objective,
            "assessment" => PartName::Assessment,
            "overview" => PartName::Overview,
            other => PartName::Other(other.to_string()),
        }
    }
}

/// Build a part-name filter from plain strings.
pub fn name_filter<I, S>(names: I) -> BTreeSet<PartName>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| PartName::from_name(name.as_ref()))
        .collect()
}
