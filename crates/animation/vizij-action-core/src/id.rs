//! Animated data-blocks ("IDs") as seen by the action model.
//!
//! An ID is any named target that can carry animation data. Its full name is
//! a two-letter type code followed by the display name (`"OBCube"`), which is
//! also the name a fresh [`Binding`](crate::binding::Binding) gets when it is
//! created for that ID.

use serde::{Deserialize, Serialize};

use crate::ids::{ActionId, BindingHandle, IdKey};

/// Data-block type. The two-letter code doubles as the binding name prefix.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    Object,
    Camera,
    Material,
    Mesh,
    Light,
    World,
    Scene,
    ShapeKey,
    Armature,
    Curve,
    NodeTree,
    /// UI screens; never animated.
    Screen,
    /// Window manager; never animated.
    WindowManager,
    /// Linked library reference; never animated.
    Library,
}

impl IdType {
    pub const ALL: [IdType; 14] = [
        IdType::Object,
        IdType::Camera,
        IdType::Material,
        IdType::Mesh,
        IdType::Light,
        IdType::World,
        IdType::Scene,
        IdType::ShapeKey,
        IdType::Armature,
        IdType::Curve,
        IdType::NodeTree,
        IdType::Screen,
        IdType::WindowManager,
        IdType::Library,
    ];

    pub fn code(self) -> &'static str {
        match self {
            IdType::Object => "OB",
            IdType::Camera => "CA",
            IdType::Material => "MA",
            IdType::Mesh => "ME",
            IdType::Light => "LA",
            IdType::World => "WO",
            IdType::Scene => "SC",
            IdType::ShapeKey => "KE",
            IdType::Armature => "AR",
            IdType::Curve => "CU",
            IdType::NodeTree => "NT",
            IdType::Screen => "SR",
            IdType::WindowManager => "WM",
            IdType::Library => "LI",
        }
    }

    pub fn from_code(code: &str) -> Option<IdType> {
        IdType::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Whether data-blocks of this type can own animation data at all.
    pub fn is_animatable(self) -> bool {
        !matches!(
            self,
            IdType::Screen | IdType::WindowManager | IdType::Library
        )
    }
}

/// Per-ID animation state: which action animates it and through which binding.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimData {
    pub action: Option<ActionId>,
    /// Weak reference into `action`'s bindings; resolved by lookup.
    pub binding_handle: BindingHandle,
    /// Name of the last binding used, so a binding can be found again by name
    /// after the handle has been cleared or the action swapped.
    pub binding_name: String,
    /// The action is being tweaked inside an NLA strip.
    pub nla_tweak_mode: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimatedId {
    pub key: IdKey,
    /// Display name, without the type code.
    pub name: String,
    pub id_type: IdType,
    /// Linked/override data that must not be modified is not editable.
    pub editable: bool,
    pub adt: Option<AnimData>,
}

impl AnimatedId {
    pub fn new(key: IdKey, name: impl Into<String>, id_type: IdType) -> Self {
        Self {
            key,
            name: name.into(),
            id_type,
            editable: true,
            adt: None,
        }
    }

    /// Type code + display name, e.g. `"OBCube"`.
    pub fn full_name(&self) -> String {
        format!("{}{}", self.id_type.code(), self.name)
    }

    pub fn anim_data(&self) -> Option<&AnimData> {
        self.adt.as_ref()
    }

    /// Create the animation data if this ID type supports it.
    pub fn anim_data_ensure(&mut self) -> Option<&mut AnimData> {
        if !self.id_type.is_animatable() {
            return None;
        }
        Some(self.adt.get_or_insert_with(AnimData::default))
    }

    /// The action currently animating this ID, if any.
    pub fn action(&self) -> Option<ActionId> {
        self.adt.as_ref().and_then(|adt| adt.action)
    }
}
