//! Bindings: which animated ID a subset of an action's curves drives.
//!
//! Names are a two-letter ID type code followed by a display name, so the
//! shortest valid name has three characters. An untyped binding uses the
//! `XX` placeholder prefix until it is first assigned to an ID.

use serde::{Deserialize, Serialize};

use crate::id::{AnimatedId, IdType};
use crate::ids::BindingHandle;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    handle: BindingHandle,
    pub(crate) name: String,
    idtype: Option<IdType>,
}

impl Binding {
    pub const NAME_LENGTH_MIN: usize = 3;
    pub const UNTYPED_PREFIX: &'static str = "XX";
    pub const DEFAULT_NAME: &'static str = "XXBinding";

    pub(crate) fn new(handle: BindingHandle) -> Self {
        Self {
            handle,
            name: Self::DEFAULT_NAME.to_string(),
            idtype: None,
        }
    }

    #[inline]
    pub fn handle(&self) -> BindingHandle {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn idtype(&self) -> Option<IdType> {
        self.idtype
    }

    pub fn has_idtype(&self) -> bool {
        self.idtype.is_some()
    }

    pub fn name_prefix_for_idtype(&self) -> &'static str {
        self.idtype.map_or(Self::UNTYPED_PREFIX, IdType::code)
    }

    pub fn name_without_prefix(&self) -> &str {
        self.name
            .char_indices()
            .nth(2)
            .map_or("", |(i, _)| &self.name[i..])
    }

    /// Untyped bindings suit any ID; typed ones only IDs of their type.
    pub fn is_suitable_for(&self, id: &AnimatedId) -> bool {
        self.idtype.map_or(true, |t| t == id.id_type)
    }

    /// Fix the ID type. Once set it never changes.
    pub(crate) fn set_idtype(&mut self, idtype: IdType) {
        debug_assert!(
            self.idtype.map_or(true, |t| t == idtype),
            "binding type cannot change once set"
        );
        if self.idtype.is_none() {
            self.idtype = Some(idtype);
        }
    }

    /// Make the first two characters match the ID type, padding short names.
    /// Uniqueness is up to the owning action.
    pub(crate) fn name_ensure_prefix(&mut self) {
        let prefix = self.name_prefix_for_idtype();
        let rest = self.name_without_prefix();
        let rest = if rest.is_empty() { "Binding" } else { rest };
        self.name = format!("{prefix}{rest}");
    }
}
