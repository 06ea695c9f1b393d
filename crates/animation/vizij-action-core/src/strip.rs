//! Strips, keyframe strip data and channel bags.
//!
//! A [`Strip`] is a time range on a [`Layer`](crate::layer::Layer). What it
//! holds depends on its type; [`StripData`] is the closed set of variants.
//! Keyframe strips own one [`ChannelBag`] per binding, and each bag owns the
//! curves animating that binding.

use serde::{Deserialize, Serialize};

use crate::binding::Binding;
use crate::error::ActionError;
use crate::fcurve::{FCurve, InsertKeyFlags, KeyframeSettings};
use crate::ids::{BindingHandle, StripId};
use crate::result::SingleKeyingResult;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum StripType {
    Keyframe,
}

/// Curves of one binding within one strip.
///
/// `(rna_path, array_index)` is unique within a bag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelBag {
    binding_handle: BindingHandle,
    fcurves: Vec<FCurve>,
}

impl ChannelBag {
    pub fn new(binding_handle: BindingHandle) -> Self {
        Self {
            binding_handle,
            fcurves: Vec::new(),
        }
    }

    pub fn binding_handle(&self) -> BindingHandle {
        self.binding_handle
    }

    pub fn fcurves(&self) -> &[FCurve] {
        &self.fcurves
    }

    pub fn fcurve(&self, index: usize) -> Option<&FCurve> {
        self.fcurves.get(index)
    }

    pub fn fcurve_find(&self, rna_path: &str, array_index: i32) -> Option<&FCurve> {
        self.fcurves.iter().find(|f| f.matches(rna_path, array_index))
    }

    pub fn fcurve_find_mut(&mut self, rna_path: &str, array_index: i32) -> Option<&mut FCurve> {
        self.fcurves
            .iter_mut()
            .find(|f| f.matches(rna_path, array_index))
    }

    pub fn fcurve_find_or_create(&mut self, rna_path: &str, array_index: i32) -> &mut FCurve {
        let index = match self
            .fcurves
            .iter()
            .position(|f| f.matches(rna_path, array_index))
        {
            Some(i) => i,
            None => {
                self.fcurves.push(FCurve::new(rna_path, array_index));
                self.fcurves.len() - 1
            }
        };
        &mut self.fcurves[index]
    }

    /// Remove and drop the curve. Returns whether it was there.
    pub fn fcurve_remove(&mut self, rna_path: &str, array_index: i32) -> bool {
        let before = self.fcurves.len();
        self.fcurves.retain(|f| !f.matches(rna_path, array_index));
        self.fcurves.len() != before
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyframeStrip {
    channelbags: Vec<ChannelBag>,
}

impl KeyframeStrip {
    pub fn channelbags(&self) -> &[ChannelBag] {
        &self.channelbags
    }

    pub fn channelbag_for_binding(&self, handle: BindingHandle) -> Option<&ChannelBag> {
        self.channelbags
            .iter()
            .find(|bag| bag.binding_handle == handle)
    }

    pub fn channelbag_for_binding_mut(&mut self, handle: BindingHandle) -> Option<&mut ChannelBag> {
        self.channelbags
            .iter_mut()
            .find(|bag| bag.binding_handle == handle)
    }

    /// Create the bag for `handle`. There must not be one yet.
    pub fn channelbag_for_binding_add(
        &mut self,
        handle: BindingHandle,
    ) -> Result<&mut ChannelBag, ActionError> {
        if self.channelbag_for_binding(handle).is_some() {
            return Err(ActionError::ChannelBagExists(handle));
        }
        self.channelbags.push(ChannelBag::new(handle));
        let last = self.channelbags.len() - 1;
        Ok(&mut self.channelbags[last])
    }

    pub fn channelbag_for_binding_ensure(&mut self, handle: BindingHandle) -> &mut ChannelBag {
        let index = match self
            .channelbags
            .iter()
            .position(|bag| bag.binding_handle == handle)
        {
            Some(i) => i,
            None => {
                self.channelbags.push(ChannelBag::new(handle));
                self.channelbags.len() - 1
            }
        };
        &mut self.channelbags[index]
    }

    pub fn fcurve_find(
        &self,
        handle: BindingHandle,
        rna_path: &str,
        array_index: i32,
    ) -> Option<&FCurve> {
        self.channelbag_for_binding(handle)?
            .fcurve_find(rna_path, array_index)
    }

    pub fn fcurve_find_mut(
        &mut self,
        handle: BindingHandle,
        rna_path: &str,
        array_index: i32,
    ) -> Option<&mut FCurve> {
        self.channelbag_for_binding_mut(handle)?
            .fcurve_find_mut(rna_path, array_index)
    }

    pub fn fcurve_find_or_create(
        &mut self,
        handle: BindingHandle,
        rna_path: &str,
        array_index: i32,
    ) -> &mut FCurve {
        self.channelbag_for_binding_ensure(handle)
            .fcurve_find_or_create(rna_path, array_index)
    }

    /// Insert one key for `binding`, creating the curve when the flags allow.
    pub fn keyframe_insert(
        &mut self,
        binding: &Binding,
        rna_path: &str,
        array_index: i32,
        (time, value): (f32, f32),
        settings: &KeyframeSettings,
        flags: InsertKeyFlags,
    ) -> SingleKeyingResult {
        let handle = binding.handle();
        let fcurve = if flags.may_create_fcurve() {
            Some(self.fcurve_find_or_create(handle, rna_path, array_index))
        } else {
            self.fcurve_find_mut(handle, rna_path, array_index)
        };

        let Some(fcurve) = fcurve else {
            log::warn!(
                "FCurve {rna_path}[{array_index}] for binding {} was not created due to either \
                 the Only Insert Available setting or Replace setting",
                binding.name()
            );
            return SingleKeyingResult::CannotCreateCurve;
        };

        if !fcurve.is_keyframable() {
            log::warn!(
                "FCurve {rna_path}[{array_index}] for binding {} doesn't allow inserting keys",
                binding.name()
            );
            return SingleKeyingResult::CurveNotKeyframeable;
        }

        let result = fcurve.insert_vert(time, value, settings, flags);
        if result != SingleKeyingResult::Success {
            log::warn!(
                "Could not insert key into FCurve {rna_path}[{array_index}] for binding {}: {result:?}",
                binding.name()
            );
        }
        result
    }
}

/// Type-specific strip contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StripData {
    Keyframe(KeyframeStrip),
}

impl StripData {
    fn new(strip_type: StripType) -> Self {
        match strip_type {
            StripType::Keyframe => StripData::Keyframe(KeyframeStrip::default()),
        }
    }

    pub fn strip_type(&self) -> StripType {
        match self {
            StripData::Keyframe(_) => StripType::Keyframe,
        }
    }
}

/// Infinite strip bounds are stored as `null`; JSON has no infinities.
macro_rules! open_bound {
    ($name:ident, $infinity:expr) => {
        mod $name {
            use serde::{Deserialize, Deserializer, Serializer};

            pub fn serialize<S: Serializer>(frame: &f32, s: S) -> Result<S::Ok, S::Error> {
                if frame.is_infinite() {
                    s.serialize_none()
                } else {
                    s.serialize_some(frame)
                }
            }

            pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f32, D::Error> {
                Ok(Option::<f32>::deserialize(d)?.unwrap_or($infinity))
            }
        }
    };
}

open_bound!(open_start, f32::NEG_INFINITY);
open_bound!(open_end, f32::INFINITY);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Strip {
    id: StripId,
    /// May be negative infinity.
    #[serde(with = "open_start")]
    pub frame_start: f32,
    /// May be positive infinity.
    #[serde(with = "open_end")]
    pub frame_end: f32,
    pub frame_offset: f32,
    pub data: StripData,
}

impl Strip {
    pub(crate) fn new(id: StripId, strip_type: StripType) -> Self {
        Self {
            id,
            frame_start: f32::NEG_INFINITY,
            frame_end: f32::INFINITY,
            frame_offset: 0.0,
            data: StripData::new(strip_type),
        }
    }

    pub fn id(&self) -> StripId {
        self.id
    }

    pub fn strip_type(&self) -> StripType {
        self.data.strip_type()
    }

    pub fn is_infinite(&self) -> bool {
        self.frame_start == f32::NEG_INFINITY && self.frame_end == f32::INFINITY
    }

    pub fn contains_frame(&self, frame: f32) -> bool {
        self.frame_start <= frame && frame <= self.frame_end
    }

    pub fn is_last_frame(&self, frame: f32) -> bool {
        self.frame_end == frame
    }

    /// Only the start may be negative infinity and only the end positive
    /// infinity.
    pub fn resize(&mut self, frame_start: f32, frame_end: f32) {
        assert!(frame_start <= frame_end, "strip start must not exceed its end");
        assert!(
            frame_start < f32::INFINITY,
            "only the end frame can be at positive infinity"
        );
        assert!(
            frame_end > f32::NEG_INFINITY,
            "only the start frame can be at negative infinity"
        );
        self.frame_start = frame_start;
        self.frame_end = frame_end;
    }

    pub fn as_keyframe(&self) -> Option<&KeyframeStrip> {
        match &self.data {
            StripData::Keyframe(k) => Some(k),
        }
    }

    pub fn as_keyframe_mut(&mut self) -> Option<&mut KeyframeStrip> {
        match &mut self.data {
            StripData::Keyframe(k) => Some(k),
        }
    }
}
