//! Actions: the top-level container of animation data.
//!
//! An action stores its data in one of two ways:
//!
//! * **legacy**: a flat list of curves (optionally grouped), evaluated the
//!   same way for every ID using the action;
//! * **layered**: layers of strips holding per-binding channel bags, where
//!   the ID's binding handle selects which curves animate it.
//!
//! An empty action is valid as both. The two storages are never mixed;
//! mode-specific operations assert on the mode.
//!
//! Everything below an action (layers, strips, channel bags, curves,
//! bindings) is owned by it exclusively. IDs refer to bindings by
//! [`BindingHandle`] only.

use serde::{Deserialize, Serialize};

use crate::binding::Binding;
use crate::error::ActionError;
use crate::fcurve::FCurve;
use crate::id::{AnimData, AnimatedId};
use crate::ids::{ActionId, BindingHandle, IdAllocator, LayerId};
use crate::layer::Layer;
use crate::naming::unique_name;
use crate::strip::{ChannelBag, StripType};

/// Named group of legacy curves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGroup {
    pub name: String,
    /// Locks every curve in the group.
    pub protected: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    id: ActionId,
    pub name: String,
    layers: Vec<Layer>,
    bindings: Vec<Binding>,
    /// Legacy storage.
    curves: Vec<FCurve>,
    groups: Vec<ActionGroup>,
    /// Manually set frame range, overriding the key extents.
    pub manual_frame_range: Option<(f32, f32)>,
    /// Only meaningful together with a manual frame range.
    pub cyclic: bool,
    alloc: IdAllocator,
}

impl Action {
    pub const DEFAULT_LAYER_NAME: &'static str = "Layer";

    pub fn new(id: ActionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            layers: Vec::new(),
            bindings: Vec::new(),
            curves: Vec::new(),
            groups: Vec::new(),
            manual_frame_range: None,
            cyclic: false,
            alloc: IdAllocator::new(),
        }
    }

    pub fn id(&self) -> ActionId {
        self.id
    }

    // Discriminators

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty() && self.bindings.is_empty() && self.curves.is_empty()
    }

    pub fn is_legacy(&self) -> bool {
        self.layers.is_empty() && self.bindings.is_empty()
    }

    pub fn is_layered(&self) -> bool {
        self.curves.is_empty()
    }

    // Layers

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn layer_add(&mut self, name: impl Into<String>) -> &mut Layer {
        debug_assert!(self.is_layered(), "cannot add layers to a legacy action");
        let id = self.alloc.alloc_layer();
        self.layers.push(Layer::new(id, name));
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    /// Remove the layer and everything below it. Returns whether it was found.
    pub fn layer_remove(&mut self, layer: LayerId) -> bool {
        match self.layers.iter().position(|l| l.id() == layer) {
            Some(index) => {
                self.layers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Give an action without layers one layer with one infinite keyframe strip.
    pub fn layer_ensure_at_least_one(&mut self) {
        if !self.layers.is_empty() {
            return;
        }
        self.layer_add(Self::DEFAULT_LAYER_NAME)
            .strip_add(StripType::Keyframe);
    }

    /// The layer new keys go into: the first enabled one.
    pub fn get_layer_for_keyframing(&mut self) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.enabled)
    }

    // Bindings

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn binding(&self, index: usize) -> Option<&Binding> {
        self.bindings.get(index)
    }

    pub fn binding_for_handle(&self, handle: BindingHandle) -> Option<&Binding> {
        if !handle.is_assigned() {
            return None;
        }
        self.bindings.iter().find(|b| b.handle() == handle)
    }

    pub fn binding_find_by_name(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.name() == name)
    }

    /// Add an untyped binding with a fresh handle.
    pub fn binding_add(&mut self) -> &mut Binding {
        debug_assert!(self.is_layered(), "cannot add bindings to a legacy action");
        let handle = self.alloc.alloc_binding();
        let name = unique_name(Binding::DEFAULT_NAME, |n| self.binding_name_taken(n, handle));
        let mut binding = Binding::new(handle);
        binding.name = name;
        self.bindings.push(binding);
        let last = self.bindings.len() - 1;
        &mut self.bindings[last]
    }

    /// Add a binding typed and named for `id`.
    pub fn binding_add_for_id(&mut self, id: &AnimatedId) -> BindingHandle {
        let binding = self.binding_add();
        binding.set_idtype(id.id_type);
        let handle = binding.handle();
        let index = self.bindings.len() - 1;
        self.binding_name_define_at(index, &id.full_name());
        handle
    }

    /// Fix an untyped binding to the type of `id`, repairing its name prefix.
    fn binding_setup_for_id(&mut self, handle: BindingHandle, id: &AnimatedId) {
        let Some(index) = self.bindings.iter().position(|b| b.handle() == handle) else {
            return;
        };
        let binding = &mut self.bindings[index];
        if binding.has_idtype() {
            debug_assert_eq!(binding.idtype(), Some(id.id_type));
            return;
        }
        binding.set_idtype(id.id_type);
        let name = binding.name().to_string();
        self.binding_name_define_at(index, &name);
    }

    fn binding_name_taken(&self, name: &str, except: BindingHandle) -> bool {
        self.bindings
            .iter()
            .any(|b| b.handle() != except && b.name() == name)
    }

    /// Rename a binding, repairing its prefix and keeping names unique within
    /// this action. IDs using the binding keep their old cached name until
    /// [`binding_name_propagate`](Self::binding_name_propagate) is called.
    pub fn binding_name_define(
        &mut self,
        handle: BindingHandle,
        new_name: &str,
    ) -> Result<(), ActionError> {
        let index = self
            .bindings
            .iter()
            .position(|b| handle.is_assigned() && b.handle() == handle)
            .ok_or(ActionError::BindingNotFound(handle))?;
        self.binding_name_define_at(index, new_name);
        Ok(())
    }

    fn binding_name_define_at(&mut self, index: usize, new_name: &str) {
        let binding = &mut self.bindings[index];
        binding.name = new_name.to_string();
        if binding.has_idtype() || binding.name.chars().count() < Binding::NAME_LENGTH_MIN {
            binding.name_ensure_prefix();
        }
        let handle = binding.handle();
        let wanted = binding.name.clone();
        let unique = unique_name(&wanted, |n| self.binding_name_taken(n, handle));
        self.bindings[index].name = unique;
    }

    /// Copy the binding's current name into every ID animated through it.
    pub fn binding_name_propagate<'a>(
        &self,
        handle: BindingHandle,
        ids: impl IntoIterator<Item = &'a mut AnimatedId>,
    ) {
        let Some(binding) = self.binding_for_handle(handle) else {
            return;
        };
        for id in ids {
            let Some(adt) = id.adt.as_mut() else {
                continue;
            };
            if adt.action == Some(self.id) && adt.binding_handle == handle {
                adt.binding_name = binding.name().to_string();
            }
        }
    }

    /// The binding `id` should use when this action is assigned to it.
    ///
    /// Tried in order: the handle already on the ID (only when it already
    /// uses this action), the binding name cached on the ID, the ID's own
    /// name. Candidates must be suitable for the ID.
    pub fn find_suitable_binding_for(&self, id: &AnimatedId) -> Option<BindingHandle> {
        let adt = id.anim_data();
        let suitable = |b: &&Binding| b.is_suitable_for(id);

        if let Some(adt) = adt {
            if adt.action == Some(self.id) {
                if let Some(b) = self.binding_for_handle(adt.binding_handle).filter(suitable) {
                    return Some(b.handle());
                }
            }
            if !adt.binding_name.is_empty() {
                if let Some(b) = self.binding_find_by_name(&adt.binding_name).filter(suitable) {
                    return Some(b.handle());
                }
            }
        }

        self.binding_find_by_name(&id.full_name())
            .filter(suitable)
            .map(Binding::handle)
    }

    /// Whether any strip has curves for this binding.
    pub fn is_binding_animated(&self, handle: BindingHandle) -> bool {
        if !handle.is_assigned() {
            return false;
        }
        self.channelbags_for_binding(handle)
            .any(|bag| !bag.fcurves().is_empty())
    }

    /// Animate `id` with this action through `binding`.
    ///
    /// `None` leaves the ID on this action without a binding. Fails when the
    /// ID cannot be animated, already uses another action, or the binding is
    /// typed for a different kind of ID.
    pub fn assign_id(
        &mut self,
        binding: Option<BindingHandle>,
        id: &mut AnimatedId,
    ) -> Result<(), ActionError> {
        if !id.id_type.is_animatable() {
            return Err(ActionError::IdNotAnimatable { id: id.full_name() });
        }
        if id.action().is_some_and(|a| a != self.id) {
            return Err(ActionError::IdUsesOtherAction { id: id.full_name() });
        }
        if let Some(handle) = binding {
            let b = self
                .binding_for_handle(handle)
                .ok_or(ActionError::BindingNotFound(handle))?;
            if !b.is_suitable_for(id) {
                return Err(ActionError::BindingNotSuitable {
                    binding: b.name().to_string(),
                    id: id.full_name(),
                });
            }
            self.binding_setup_for_id(handle, id);
        }

        let action_id = self.id;
        let binding_name = binding
            .and_then(|h| self.binding_for_handle(h))
            .map(|b| b.name().to_string());
        let Some(adt) = id.anim_data_ensure() else {
            return Err(ActionError::IdNotAnimatable { id: id.full_name() });
        };

        match (binding, binding_name) {
            (Some(handle), Some(name)) => {
                adt.binding_handle = handle;
                adt.binding_name = name;
            }
            _ => self.unassign_binding(adt),
        }
        adt.action = Some(action_id);
        Ok(())
    }

    /// Stop animating `id` with this action.
    ///
    /// # Panics
    /// When `id` is not animated by this action.
    pub fn unassign_id(&self, id: &mut AnimatedId) {
        let adt = id.adt.as_mut();
        assert!(
            adt.as_ref().is_some_and(|adt| adt.action == Some(self.id)),
            "unassign_id called for an ID that is not animated by this action"
        );
        if let Some(adt) = adt {
            self.unassign_binding(adt);
            adt.action = None;
        }
    }

    /// Clear the binding handle, remembering the binding's name for later.
    fn unassign_binding(&self, adt: &mut AnimData) {
        if let Some(binding) = self.binding_for_handle(adt.binding_handle) {
            adt.binding_name = binding.name().to_string();
        }
        adt.binding_handle = BindingHandle::UNASSIGNED;
    }

    /// Channel bags of `handle` in every keyframe strip, in layer order.
    pub fn channelbags_for_binding(
        &self,
        handle: BindingHandle,
    ) -> impl Iterator<Item = &ChannelBag> + '_ {
        self.layers
            .iter()
            .flat_map(|l| l.strips())
            .filter_map(|s| s.as_keyframe())
            .filter_map(move |k| k.channelbag_for_binding(handle))
    }

    fn channelbags_for_binding_mut(
        &mut self,
        handle: BindingHandle,
    ) -> impl Iterator<Item = &mut ChannelBag> + '_ {
        self.layers
            .iter_mut()
            .flat_map(|l| l.strips_mut())
            .filter_map(|s| s.as_keyframe_mut())
            .filter_map(move |k| k.channelbag_for_binding_mut(handle))
    }

    /// First channel bag of `handle`, searching layers and strips in order.
    pub fn channelbag_for_binding(&self, handle: BindingHandle) -> Option<&ChannelBag> {
        self.channelbags_for_binding(handle).next()
    }

    pub fn channelbag_for_binding_mut(&mut self, handle: BindingHandle) -> Option<&mut ChannelBag> {
        self.channelbags_for_binding_mut(handle).next()
    }

    /// The curve of `handle` for this path and index, in whichever layer holds it.
    pub fn fcurve_find_for_binding(
        &self,
        handle: BindingHandle,
        rna_path: &str,
        array_index: i32,
    ) -> Option<&FCurve> {
        self.channelbags_for_binding(handle)
            .find_map(|bag| bag.fcurve_find(rna_path, array_index))
    }

    pub fn fcurve_find_for_binding_mut(
        &mut self,
        handle: BindingHandle,
        rna_path: &str,
        array_index: i32,
    ) -> Option<&mut FCurve> {
        self.channelbags_for_binding_mut(handle)
            .find_map(|bag| bag.fcurve_find_mut(rna_path, array_index))
    }

    /// Remove the first curve of `handle` matching path and index.
    pub fn fcurve_remove_for_binding(
        &mut self,
        handle: BindingHandle,
        rna_path: &str,
        array_index: i32,
    ) -> bool {
        self.channelbags_for_binding_mut(handle)
            .any(|bag| bag.fcurve_remove(rna_path, array_index))
    }

    // Legacy storage

    pub fn fcurves(&self) -> &[FCurve] {
        &self.curves
    }

    pub fn groups(&self) -> &[ActionGroup] {
        &self.groups
    }

    pub fn group_find(&self, name: &str) -> Option<&ActionGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn group_find_mut(&mut self, name: &str) -> Option<&mut ActionGroup> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    pub fn legacy_fcurve_find(&self, rna_path: &str, array_index: i32) -> Option<&FCurve> {
        self.curves.iter().find(|f| f.matches(rna_path, array_index))
    }

    pub fn legacy_fcurve_find_mut(
        &mut self,
        rna_path: &str,
        array_index: i32,
    ) -> Option<&mut FCurve> {
        self.curves
            .iter_mut()
            .find(|f| f.matches(rna_path, array_index))
    }

    /// Find or create a legacy curve. New curves join `group`, placed after
    /// the group's existing curves so groups stay contiguous.
    pub fn legacy_fcurve_ensure(
        &mut self,
        group: Option<&str>,
        rna_path: &str,
        array_index: i32,
    ) -> &mut FCurve {
        debug_assert!(self.is_legacy(), "legacy curves on a layered action");
        if let Some(index) = self
            .curves
            .iter()
            .position(|f| f.matches(rna_path, array_index))
        {
            return &mut self.curves[index];
        }

        let mut fcurve = FCurve::new(rna_path, array_index);
        let index = match group {
            Some(name) => {
                if self.group_find(name).is_none() {
                    self.groups.push(ActionGroup {
                        name: name.to_string(),
                        protected: false,
                    });
                }
                fcurve.group = Some(name.to_string());
                self.curves
                    .iter()
                    .rposition(|f| f.group.as_deref() == Some(name))
                    .map_or(self.curves.len(), |last| last + 1)
            }
            None => self.curves.len(),
        };
        self.curves.insert(index, fcurve);
        &mut self.curves[index]
    }

    /// Remove a legacy curve, dropping its group if that leaves it empty.
    pub fn legacy_fcurve_remove(&mut self, rna_path: &str, array_index: i32) -> Option<FCurve> {
        let index = self
            .curves
            .iter()
            .position(|f| f.matches(rna_path, array_index))?;
        let fcurve = self.curves.remove(index);
        if let Some(group) = fcurve.group.as_deref() {
            if !self.curves.iter().any(|f| f.group.as_deref() == Some(group)) {
                self.groups.retain(|g| g.name != group);
            }
        }
        Some(fcurve)
    }

    /// Locked directly or through its group.
    pub fn fcurve_is_protected(&self, fcurve: &FCurve) -> bool {
        fcurve.is_protected()
            || fcurve
                .group
                .as_deref()
                .and_then(|g| self.group_find(g))
                .is_some_and(|g| g.protected)
    }

    // Frame range

    /// Cyclic only with a manual frame range.
    pub fn is_cyclic(&self) -> bool {
        self.cyclic && self.manual_frame_range.is_some()
    }

    /// The manual range, else the extent of all keys. Never zero-length.
    pub fn frame_range(&self) -> (f32, f32) {
        if let Some(range) = self.manual_frame_range {
            return range;
        }
        let layered = self
            .layers
            .iter()
            .flat_map(|l| l.strips())
            .filter_map(|s| s.as_keyframe())
            .flat_map(|k| k.channelbags())
            .flat_map(|bag| bag.fcurves());
        let (start, end) = self
            .curves
            .iter()
            .chain(layered)
            .filter_map(FCurve::key_range)
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), (s, e)| {
                (lo.min(s), hi.max(e))
            });
        if start > end {
            return (0.0, 1.0);
        }
        if start >= end {
            return (start, start + 1.0);
        }
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdType;
    use crate::ids::IdKey;

    fn action() -> Action {
        Action::new(ActionId(0), "Action")
    }

    #[test]
    fn empty_action_is_both_legacy_and_layered() {
        let mut act = action();
        assert!(act.is_empty() && act.is_legacy() && act.is_layered());

        act.legacy_fcurve_ensure(None, "location", 0);
        assert!(act.is_legacy() && !act.is_layered() && !act.is_empty());
    }

    #[test]
    fn ensure_one_layer_is_idempotent() {
        let mut act = action();
        act.layer_ensure_at_least_one();
        act.layer_ensure_at_least_one();
        assert_eq!(act.layers().len(), 1);
        let layer = &act.layers()[0];
        assert_eq!(layer.name, "Layer");
        assert_eq!(layer.strips().len(), 1);
        assert!(layer.strips()[0].is_infinite());
        assert!(!act.is_legacy());
    }

    #[test]
    fn layer_for_keyframing_skips_disabled() {
        let mut act = action();
        act.layer_add("A").enabled = false;
        assert!(act.get_layer_for_keyframing().is_none());
        let b = act.layer_add("B").id();
        assert_eq!(act.get_layer_for_keyframing().map(|l| l.id()), Some(b));
        assert!(act.layer_remove(b));
        assert!(!act.layer_remove(b));
    }

    #[test]
    fn binding_names_stay_unique() {
        let mut act = action();
        let cube = AnimatedId::new(IdKey(0), "Cube", IdType::Object);
        let a = act.binding_add_for_id(&cube);
        let b = act.binding_add_for_id(&cube);
        assert_ne!(a, b);
        assert_eq!(act.binding_for_handle(a).map(Binding::name), Some("OBCube"));
        assert_eq!(act.binding_for_handle(b).map(Binding::name), Some("OBCube.001"));

        act.binding_name_define(b, "CACube").unwrap();
        assert_eq!(act.binding_for_handle(b).map(Binding::name), Some("OBCube.001"));

        act.binding_name_define(b, "OBSphere").unwrap();
        assert_eq!(act.binding_for_handle(b).map(Binding::name), Some("OBSphere"));

        assert_eq!(
            act.binding_name_define(BindingHandle(99), "OBX"),
            Err(ActionError::BindingNotFound(BindingHandle(99)))
        );
    }

    #[test]
    fn untyped_binding_takes_type_on_assign() {
        let mut act = action();
        let mut cube = AnimatedId::new(IdKey(0), "Cube", IdType::Object);
        let mut cam = AnimatedId::new(IdKey(1), "Cam", IdType::Camera);
        let h = act.binding_add().handle();

        act.assign_id(Some(h), &mut cube).unwrap();
        let binding = act.binding_for_handle(h).unwrap();
        assert_eq!(binding.idtype(), Some(IdType::Object));
        assert_eq!(binding.name(), "OBBinding");
        let adt = cube.anim_data().unwrap();
        assert_eq!(adt.binding_handle, h);
        assert_eq!(adt.binding_name, "OBBinding");
        assert_eq!(adt.action, Some(act.id()));

        assert!(matches!(
            act.assign_id(Some(h), &mut cam),
            Err(ActionError::BindingNotSuitable { .. })
        ));
        assert!(cam.adt.is_none());
    }

    #[test]
    fn assign_rejects_other_action_and_non_animatable() {
        let mut act = action();
        let mut other = Action::new(ActionId(1), "Other");
        let mut cube = AnimatedId::new(IdKey(0), "Cube", IdType::Object);
        other.assign_id(None, &mut cube).unwrap();
        assert!(matches!(
            act.assign_id(None, &mut cube),
            Err(ActionError::IdUsesOtherAction { .. })
        ));

        let mut screen = AnimatedId::new(IdKey(2), "Layout", IdType::Screen);
        assert!(matches!(
            act.assign_id(None, &mut screen),
            Err(ActionError::IdNotAnimatable { .. })
        ));
    }

    #[test]
    fn unassign_remembers_binding_name() {
        let mut act = action();
        let mut cube = AnimatedId::new(IdKey(0), "Cube", IdType::Object);
        let h = act.binding_add_for_id(&cube);
        act.assign_id(Some(h), &mut cube).unwrap();

        act.unassign_id(&mut cube);
        let adt = cube.anim_data().unwrap();
        assert_eq!(adt.action, None);
        assert_eq!(adt.binding_handle, BindingHandle::UNASSIGNED);
        assert_eq!(adt.binding_name, "OBCube");

        // Found again by cached name.
        assert_eq!(act.find_suitable_binding_for(&cube), Some(h));
    }

    #[test]
    #[should_panic(expected = "not animated by this action")]
    fn unassign_foreign_id_panics() {
        let act = action();
        let mut cube = AnimatedId::new(IdKey(0), "Cube", IdType::Object);
        act.unassign_id(&mut cube);
    }

    #[test]
    fn suitable_binding_resolution_order() {
        let mut act = action();
        let mut cube = AnimatedId::new(IdKey(0), "Cube", IdType::Object);
        let by_id_name = act.binding_add_for_id(&cube);
        let by_cached = act.binding_add().handle();
        act.binding_name_define(by_cached, "OBCached").unwrap();

        assert_eq!(act.find_suitable_binding_for(&cube), Some(by_id_name));

        cube.anim_data_ensure().unwrap().binding_name = "OBCached".into();
        assert_eq!(act.find_suitable_binding_for(&cube), Some(by_cached));

        // The cached handle only counts when the ID already uses this action.
        cube.anim_data_ensure().unwrap().binding_handle = by_id_name;
        assert_eq!(act.find_suitable_binding_for(&cube), Some(by_cached));
        cube.anim_data_ensure().unwrap().action = Some(act.id());
        assert_eq!(act.find_suitable_binding_for(&cube), Some(by_id_name));
    }

    #[test]
    fn propagate_updates_cached_names() {
        let mut act = action();
        let mut cube = AnimatedId::new(IdKey(0), "Cube", IdType::Object);
        let mut other = AnimatedId::new(IdKey(1), "Other", IdType::Object);
        let h = act.binding_add_for_id(&cube);
        act.assign_id(Some(h), &mut cube).unwrap();
        act.assign_id(None, &mut other).unwrap();

        act.binding_name_define(h, "OBRenamed").unwrap();
        assert_eq!(cube.anim_data().unwrap().binding_name, "OBCube");
        act.binding_name_propagate(h, [&mut cube, &mut other]);
        assert_eq!(cube.anim_data().unwrap().binding_name, "OBRenamed");
        assert_eq!(other.anim_data().unwrap().binding_name, "");
    }

    #[test]
    fn legacy_groups_stay_contiguous() {
        let mut act = action();
        act.legacy_fcurve_ensure(Some("Object Transforms"), "location", 0);
        act.legacy_fcurve_ensure(None, "color", 0);
        act.legacy_fcurve_ensure(Some("Object Transforms"), "location", 1);

        let paths: Vec<(&str, i32)> = act
            .fcurves()
            .iter()
            .map(|f| (f.rna_path.as_str(), f.array_index))
            .collect();
        assert_eq!(paths, vec![("location", 0), ("location", 1), ("color", 0)]);
        assert_eq!(act.groups().len(), 1);

        act.legacy_fcurve_remove("location", 0);
        assert_eq!(act.groups().len(), 1);
        act.legacy_fcurve_remove("location", 1);
        assert!(act.groups().is_empty());
    }

    #[test]
    fn group_lock_protects_curves() {
        let mut act = action();
        act.legacy_fcurve_ensure(Some("Grp"), "location", 0);
        act.group_find_mut("Grp").unwrap().protected = true;
        let fcurve = act.legacy_fcurve_find("location", 0).unwrap();
        assert!(!fcurve.is_protected());
        assert!(act.fcurve_is_protected(fcurve));
    }

    #[test]
    fn frame_range_and_cyclic() {
        let mut act = action();
        assert_eq!(act.frame_range(), (0.0, 1.0));
        act.cyclic = true;
        assert!(!act.is_cyclic());
        act.manual_frame_range = Some((1.0, 25.0));
        assert!(act.is_cyclic());
        assert_eq!(act.frame_range(), (1.0, 25.0));
    }
}
