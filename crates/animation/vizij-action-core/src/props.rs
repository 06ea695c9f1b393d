//! Table-backed property access.
//!
//! Each record is one property of one ID, keyed by the ID's full name and
//! the property path. Records load from JSON so scenes can be described as
//! fixtures:
//!
//! ```json
//! { "id": "OBCube", "path": "location", "kind": "float", "values": [1.0, 2.0, 3.0] }
//! ```
//!
//! A record may carry `visual` values, served through [`VisualKeying`] for
//! transform properties of objects and pose bones.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::id::{AnimatedId, IdType};
use crate::rna::{
    PropertyAccess, PropertyKind, ResolvedProperty, StructKind, StructRef, VisualKeying,
};

const TRANSFORM_PROPERTIES: [&str; 5] = [
    "location",
    "rotation_euler",
    "rotation_quaternion",
    "rotation_axis_angle",
    "scale",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Full name of the owning ID, e.g. `OBCube`.
    pub id: String,
    pub path: String,
    pub kind: PropertyKind,
    pub values: Vec<f32>,
    /// Force array treatment for single-element arrays.
    #[serde(default)]
    pub array: bool,
    #[serde(default)]
    pub visual: Option<Vec<f32>>,
}

impl PropertyRecord {
    fn array_length(&self) -> usize {
        if self.array || self.values.len() > 1 {
            self.values.len()
        } else {
            0
        }
    }
}

/// Split `pose.bones["Arm.L"].location` into the owner path and identifier.
/// Dots inside brackets do not split.
fn split_owner(path: &str) -> (&str, &str) {
    let mut depth = 0usize;
    let mut split = None;
    for (i, c) in path.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => split = Some(i),
            _ => {}
        }
    }
    match split {
        Some(i) => (&path[..i], &path[i + 1..]),
        None => ("", path),
    }
}

fn owner_kind(owner_path: &str) -> StructKind {
    if owner_path.is_empty() {
        return StructKind::Id;
    }
    owner_path
        .strip_prefix("pose.bones[\"")
        .and_then(|rest| rest.strip_suffix("\"]"))
        .map_or(StructKind::Other, |name| StructKind::PoseBone {
            name: name.to_string(),
        })
}

fn ui_name(identifier: &str) -> String {
    identifier
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars
                .next()
                .map(|c| c.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Debug, Default)]
pub struct MemoryProperties {
    records: HashMap<(String, String), PropertyRecord>,
}

impl MemoryProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of [`PropertyRecord`]s.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<PropertyRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: impl IntoIterator<Item = PropertyRecord>) -> Self {
        let mut props = Self::new();
        for record in records {
            props.insert(record);
        }
        props
    }

    pub fn insert(&mut self, record: PropertyRecord) {
        self.records
            .insert((record.id.clone(), record.path.clone()), record);
    }

    /// Add or overwrite a property of `id`.
    pub fn set(&mut self, id: &AnimatedId, path: &str, kind: PropertyKind, values: &[f32]) {
        self.insert(PropertyRecord {
            id: id.full_name(),
            path: path.to_string(),
            kind,
            values: values.to_vec(),
            array: false,
            visual: None,
        });
    }

    /// Set the visual values of an existing property. Returns whether it exists.
    pub fn set_visual(&mut self, id: &AnimatedId, path: &str, values: &[f32]) -> bool {
        match self.records.get_mut(&(id.full_name(), path.to_string())) {
            Some(record) => {
                record.visual = Some(values.to_vec());
                true
            }
            None => false,
        }
    }

    fn record(&self, id: &AnimatedId, prop: &ResolvedProperty) -> Option<&PropertyRecord> {
        self.records.get(&(id.full_name(), prop.path_from_id()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PropertyAccess for MemoryProperties {
    fn resolve(&self, id: &AnimatedId, path: &str) -> Option<ResolvedProperty> {
        let record = self.records.get(&(id.full_name(), path.to_string()))?;
        let (owner_path, identifier) = split_owner(path);
        Some(ResolvedProperty {
            owner: StructRef {
                kind: owner_kind(owner_path),
                path: owner_path.to_string(),
            },
            identifier: identifier.to_string(),
            ui_name: ui_name(identifier),
            kind: record.kind,
            array_length: record.array_length(),
        })
    }

    fn values(&self, id: &AnimatedId, prop: &ResolvedProperty) -> Vec<f32> {
        self.record(id, prop)
            .map(|r| r.values.clone())
            .unwrap_or_default()
    }
}

impl VisualKeying for MemoryProperties {
    fn supports_visual(&self, id: &AnimatedId, prop: &ResolvedProperty) -> bool {
        let spatial = match prop.owner.kind {
            StructKind::Id => id.id_type == IdType::Object,
            StructKind::PoseBone { .. } => true,
            StructKind::Other => false,
        };
        spatial
            && TRANSFORM_PROPERTIES.contains(&prop.identifier.as_str())
            && self
                .record(id, prop)
                .is_some_and(|r| r.visual.as_ref().is_some_and(|v| v.len() == r.values.len()))
    }

    fn visual_values(&self, id: &AnimatedId, prop: &ResolvedProperty) -> Vec<f32> {
        self.record(id, prop)
            .and_then(|r| r.visual.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdKey;

    #[test]
    fn owner_paths_are_split_outside_brackets() {
        assert_eq!(split_owner("location"), ("", "location"));
        assert_eq!(
            split_owner("pose.bones[\"Arm.L\"].rotation_euler"),
            ("pose.bones[\"Arm.L\"]", "rotation_euler")
        );
        assert_eq!(
            owner_kind("pose.bones[\"Arm.L\"]"),
            StructKind::PoseBone {
                name: "Arm.L".into()
            }
        );
        assert_eq!(owner_kind("data"), StructKind::Other);
        assert_eq!(ui_name("rotation_euler"), "Rotation Euler");
    }

    #[test]
    fn resolve_from_json() {
        let props = MemoryProperties::from_json(
            r#"[
                { "id": "OBCube", "path": "location", "kind": "float", "values": [1, 2, 3],
                  "visual": [4, 5, 6] },
                { "id": "OBCube", "path": "hide_render", "kind": "bool", "values": [0] }
            ]"#,
        )
        .unwrap();
        let cube = AnimatedId::new(IdKey(0), "Cube", IdType::Object);

        let loc = props.resolve(&cube, "location").unwrap();
        assert_eq!(loc.array_length, 3);
        assert_eq!(loc.owner.kind, StructKind::Id);
        assert_eq!(props.values(&cube, &loc), vec![1.0, 2.0, 3.0]);
        assert!(props.supports_visual(&cube, &loc));
        assert_eq!(props.visual_values(&cube, &loc), vec![4.0, 5.0, 6.0]);

        let hide = props.resolve(&cube, "hide_render").unwrap();
        assert!(!hide.is_array());
        assert_eq!(hide.component_count(), 1);
        assert!(!props.supports_visual(&cube, &hide));

        assert!(props.resolve(&cube, "nope").is_none());
    }
}
