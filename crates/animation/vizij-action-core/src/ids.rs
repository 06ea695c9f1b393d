//! Identifiers and simple allocators for actions, layers, strips and bindings.
//!
//! Strip ids are allocated by their owning [`Layer`](crate::layer::Layer).

use serde::{Deserialize, Serialize};

/// Handle of a [`Binding`](crate::binding::Binding), unique within its Action.
///
/// Animated IDs refer to their binding by handle only; the handle is resolved
/// through the owning Action every time it is needed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BindingHandle(pub u32);

impl BindingHandle {
    /// Handle value meaning "no binding assigned".
    pub const UNASSIGNED: BindingHandle = BindingHandle(0);

    #[inline]
    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct StripId(pub u32);

/// Key of an animated data-block inside a [`Library`](crate::library::Library).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct IdKey(pub u32);

/// Monotonic allocator for the per-Action identifiers (layers and binding handles).
///
/// Binding handles start at 1 so that `0` stays reserved for
/// [`BindingHandle::UNASSIGNED`]. Handles are never reused, even after the
/// binding that held one is gone.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    last_binding_handle: u32,
    next_layer: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_binding(&mut self) -> BindingHandle {
        self.last_binding_handle = self.last_binding_handle.wrapping_add(1);
        if self.last_binding_handle == 0 {
            self.last_binding_handle = 1;
        }
        BindingHandle(self.last_binding_handle)
    }

    #[inline]
    pub fn alloc_layer(&mut self) -> LayerId {
        let id = LayerId(self.next_layer);
        self.next_layer = self.next_layer.wrapping_add(1);
        id
    }
}
