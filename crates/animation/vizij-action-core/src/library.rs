//! The library: owner of all actions and animated IDs.
//!
//! IDs point at actions by [`ActionId`] and at bindings by handle; the
//! library is where those weak references get resolved.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::ActionError;
use crate::id::{AnimatedId, IdType};
use crate::ids::{ActionId, BindingHandle, IdKey};
use crate::naming::unique_name;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Library {
    actions: HashMap<ActionId, Action>,
    ids: HashMap<IdKey, AnimatedId>,
    next_action: u32,
    next_id: u32,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    // IDs

    pub fn id_add(&mut self, name: impl Into<String>, id_type: IdType) -> IdKey {
        let key = IdKey(self.next_id);
        self.next_id += 1;
        self.ids.insert(key, AnimatedId::new(key, name, id_type));
        key
    }

    pub fn id(&self, key: IdKey) -> Option<&AnimatedId> {
        self.ids.get(&key)
    }

    pub fn id_mut(&mut self, key: IdKey) -> Option<&mut AnimatedId> {
        self.ids.get_mut(&key)
    }

    pub fn id_find_by_name(&self, full_name: &str) -> Option<&AnimatedId> {
        self.ids.values().find(|id| id.full_name() == full_name)
    }

    pub fn ids(&self) -> impl Iterator<Item = &AnimatedId> {
        self.ids.values()
    }

    // Actions

    /// Add an action; the name is made unique among actions.
    pub fn action_add(&mut self, name: &str) -> ActionId {
        let name = unique_name(name, |n| self.actions.values().any(|a| a.name == n));
        let id = ActionId(self.next_action);
        self.next_action += 1;
        self.actions.insert(id, Action::new(id, name));
        id
    }

    pub fn action(&self, id: ActionId) -> Option<&Action> {
        self.actions.get(&id)
    }

    pub fn action_mut(&mut self, id: ActionId) -> Option<&mut Action> {
        self.actions.get_mut(&id)
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    /// Borrow an action and an ID mutably at the same time.
    pub fn action_and_id_mut(
        &mut self,
        action: ActionId,
        key: IdKey,
    ) -> Result<(&mut Action, &mut AnimatedId), ActionError> {
        let act = self
            .actions
            .get_mut(&action)
            .ok_or(ActionError::ActionNotFound(action))?;
        let id = self.ids.get_mut(&key).ok_or(ActionError::IdNotFound(key))?;
        Ok((act, id))
    }

    /// The action animating `key`, if any.
    pub fn action_for_id(&self, key: IdKey) -> Option<ActionId> {
        self.ids.get(&key)?.action()
    }

    /// Make sure `key` has an action, creating `"<name>Action"` if needed.
    pub fn id_action_ensure(&mut self, key: IdKey) -> Result<ActionId, ActionError> {
        let id = self.ids.get_mut(&key).ok_or(ActionError::IdNotFound(key))?;
        let full_name = id.full_name();
        let Some(adt) = id.anim_data_ensure() else {
            return Err(ActionError::IdNotAnimatable { id: full_name });
        };
        if let Some(action) = adt.action {
            return Ok(action);
        }

        let name = format!("{}Action", id.name);
        let action = self.action_add(&name);
        log::debug!("created action '{name}' for {full_name}");
        let (act, id) = self.action_and_id_mut(action, key)?;
        act.assign_id(None, id)?;
        Ok(action)
    }

    /// Animate `key` with `action`, picking a suitable binding if one exists.
    /// Any previous action is unassigned first.
    pub fn assign_action(&mut self, action: ActionId, key: IdKey) -> Result<(), ActionError> {
        self.unassign_action(key)?;
        let (act, id) = self.action_and_id_mut(action, key)?;
        let binding = act.find_suitable_binding_for(id);
        act.assign_id(binding, id)
    }

    pub fn unassign_action(&mut self, key: IdKey) -> Result<(), ActionError> {
        let Some(action) = self.action_for_id(key) else {
            if self.ids.contains_key(&key) {
                return Ok(());
            }
            return Err(ActionError::IdNotFound(key));
        };
        let (act, id) = self.action_and_id_mut(action, key)?;
        act.unassign_id(id);
        Ok(())
    }

    /// Rename a binding and update the cached name on every ID using it.
    pub fn binding_name_set(
        &mut self,
        action: ActionId,
        handle: BindingHandle,
        new_name: &str,
    ) -> Result<(), ActionError> {
        let act = self
            .actions
            .get_mut(&action)
            .ok_or(ActionError::ActionNotFound(action))?;
        act.binding_name_define(handle, new_name)?;
        act.binding_name_propagate(handle, self.ids.values_mut());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_ensure_creates_once() {
        let mut lib = Library::new();
        let cube = lib.id_add("Cube", IdType::Object);
        let a = lib.id_action_ensure(cube).unwrap();
        let b = lib.id_action_ensure(cube).unwrap();
        assert_eq!(a, b);
        assert_eq!(lib.action(a).map(|act| act.name.as_str()), Some("CubeAction"));
        assert_eq!(lib.action_for_id(cube), Some(a));

        let screen = lib.id_add("Layout", IdType::Screen);
        assert!(matches!(
            lib.id_action_ensure(screen),
            Err(ActionError::IdNotAnimatable { .. })
        ));
    }

    #[test]
    fn action_names_are_unique() {
        let mut lib = Library::new();
        let a = lib.action_add("Walk");
        let b = lib.action_add("Walk");
        assert_eq!(lib.action(b).map(|x| x.name.as_str()), Some("Walk.001"));
        assert_ne!(a, b);
    }

    #[test]
    fn assign_action_switches_and_finds_binding() {
        let mut lib = Library::new();
        let cube = lib.id_add("Cube", IdType::Object);
        let first = lib.id_action_ensure(cube).unwrap();

        let second = lib.action_add("Other");
        let handle = {
            let id = lib.id(cube).unwrap().clone();
            lib.action_mut(second).unwrap().binding_add_for_id(&id)
        };

        lib.assign_action(second, cube).unwrap();
        let adt = lib.id(cube).and_then(|id| id.anim_data()).unwrap();
        assert_eq!(adt.action, Some(second));
        assert_eq!(adt.binding_handle, handle);
        assert_ne!(first, second);

        lib.unassign_action(cube).unwrap();
        assert_eq!(lib.action_for_id(cube), None);
        assert!(lib.unassign_action(cube).is_ok());
        assert_eq!(
            lib.unassign_action(IdKey(42)),
            Err(ActionError::IdNotFound(IdKey(42)))
        );
    }

    #[test]
    fn binding_name_set_propagates() {
        let mut lib = Library::new();
        let cube = lib.id_add("Cube", IdType::Object);
        let action = lib.action_add("Act");
        let handle = {
            let id = lib.id(cube).unwrap().clone();
            lib.action_mut(action).unwrap().binding_add_for_id(&id)
        };
        lib.assign_action(action, cube).unwrap();

        lib.binding_name_set(action, handle, "OBHero").unwrap();
        let adt = lib.id(cube).and_then(|id| id.anim_data()).unwrap();
        assert_eq!(adt.binding_name, "OBHero");
    }
}
