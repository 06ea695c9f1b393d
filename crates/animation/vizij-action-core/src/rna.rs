//! Property access seam.
//!
//! The action model never reads host data directly. Hosts implement
//! [`PropertyAccess`] (and optionally [`VisualKeying`]) to resolve property
//! paths on an animated ID and read their current values.
//! [`MemoryProperties`](crate::props::MemoryProperties) is a table-backed
//! implementation used by tests and tools.

use serde::{Deserialize, Serialize};

use crate::id::AnimatedId;

/// Element type of a property, used to classify curve discreteness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Float,
    Int,
    Bool,
    Enum,
}

/// What kind of struct owns a resolved property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructKind {
    /// The ID itself.
    Id,
    /// A bone of an armature pose.
    PoseBone { name: String },
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructRef {
    pub kind: StructKind,
    /// Path from the ID to this struct, empty for the ID itself.
    pub path: String,
}

/// A path resolved to a concrete property slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedProperty {
    pub owner: StructRef,
    /// Property name on its owner, e.g. `location`.
    pub identifier: String,
    pub ui_name: String,
    pub kind: PropertyKind,
    /// 0 for scalar properties.
    pub array_length: usize,
}

impl ResolvedProperty {
    pub fn is_array(&self) -> bool {
        self.array_length > 0
    }

    /// Number of scalar components to key.
    pub fn component_count(&self) -> usize {
        self.array_length.max(1)
    }

    /// Path from the ID to this property.
    pub fn path_from_id(&self) -> String {
        if self.owner.path.is_empty() {
            self.identifier.clone()
        } else {
            format!("{}.{}", self.owner.path, self.identifier)
        }
    }
}

/// A property path to key, optionally restricted to one array element.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RnaPath {
    pub path: String,
    #[serde(default)]
    pub index: Option<usize>,
}

impl RnaPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            index: None,
        }
    }

    pub fn with_index(path: impl Into<String>, index: usize) -> Self {
        Self {
            path: path.into(),
            index: Some(index),
        }
    }
}

impl From<&str> for RnaPath {
    fn from(path: &str) -> Self {
        RnaPath::new(path)
    }
}

/// Resolves property paths on animated IDs and reads their values.
pub trait PropertyAccess {
    fn resolve(&self, id: &AnimatedId, path: &str) -> Option<ResolvedProperty>;

    /// Inverse of [`resolve`](Self::resolve).
    fn path_from_id(&self, _id: &AnimatedId, prop: &ResolvedProperty) -> Option<String> {
        Some(prop.path_from_id())
    }

    /// Current stored values; one entry per component.
    fn values(&self, id: &AnimatedId, prop: &ResolvedProperty) -> Vec<f32>;
}

/// Values taken from the evaluated final transform of objects and bones.
pub trait VisualKeying {
    fn supports_visual(&self, id: &AnimatedId, prop: &ResolvedProperty) -> bool;

    fn visual_values(&self, id: &AnimatedId, prop: &ResolvedProperty) -> Vec<f32>;
}

/// Values to key: visual when requested and supported, stored otherwise.
pub fn keyframe_values(
    properties: &dyn PropertyAccess,
    visual: Option<&dyn VisualKeying>,
    id: &AnimatedId,
    prop: &ResolvedProperty,
    use_visual: bool,
) -> Vec<f32> {
    match visual {
        Some(v) if use_visual && v.supports_visual(id, prop) => v.visual_values(id, prop),
        _ => properties.values(id, prop),
    }
}
