//! Nonlinear-animation remapping seam.
//!
//! When an action is edited through an NLA strip in tweak mode, scene time
//! and property values must be mapped back into the action's own space
//! before they are keyed. [`NlaRemapper`] is that mapping.
//! [`NlaPassthrough`] is the identity; [`NlaTweakStack`] models a single
//! tweaked strip per ID on top of fixed lower-stack values.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::id::AnimatedId;
use crate::ids::IdKey;
use crate::rna::ResolvedProperty;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationEvalContext {
    /// Scene frame being evaluated.
    pub eval_time: f32,
}

impl AnimationEvalContext {
    pub fn at(eval_time: f32) -> Self {
        Self { eval_time }
    }
}

/// Per-call handle produced by a remapper and handed back to it.
/// `slot` is remapper-defined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NlaKeyframingContext {
    pub id: IdKey,
    pub slot: usize,
}

/// Per-component remap outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemapResult {
    pub successful: Vec<bool>,
    /// Every component must be keyed together for the remap to hold.
    pub force_all: bool,
}

impl RemapResult {
    pub fn all(count: usize) -> Self {
        Self {
            successful: vec![true; count],
            force_all: false,
        }
    }

    pub fn is_successful(&self, index: usize) -> bool {
        self.successful.get(index).copied().unwrap_or(false)
    }

    /// Indices that were meant to be remapped but failed.
    pub fn failed_indices(&self, index: Option<usize>) -> Vec<usize> {
        self.successful
            .iter()
            .enumerate()
            .filter(|&(i, ok)| !ok && (index.is_none() || index == Some(i) || self.force_all))
            .map(|(i, _)| i)
            .collect()
    }
}

pub trait NlaRemapper {
    /// Context for keying `id`, or `None` when no remapping applies.
    fn keyframing_context(
        &self,
        id: &AnimatedId,
        eval: &AnimationEvalContext,
    ) -> Option<NlaKeyframingContext>;

    /// Map a scene frame into the frame of the action being tweaked.
    fn remap_time(&self, id: &AnimatedId, frame: f32) -> f32;

    /// Map `values` in place. `index` restricts the remap to one component.
    fn remap_values(
        &self,
        ctx: Option<&NlaKeyframingContext>,
        prop: &ResolvedProperty,
        values: &mut [f32],
        index: Option<usize>,
        eval: &AnimationEvalContext,
    ) -> RemapResult;
}

/// No NLA: time and values pass through untouched.
#[derive(Copy, Clone, Debug, Default)]
pub struct NlaPassthrough;

impl NlaRemapper for NlaPassthrough {
    fn keyframing_context(
        &self,
        _id: &AnimatedId,
        _eval: &AnimationEvalContext,
    ) -> Option<NlaKeyframingContext> {
        None
    }

    fn remap_time(&self, _id: &AnimatedId, frame: f32) -> f32 {
        frame
    }

    fn remap_values(
        &self,
        _ctx: Option<&NlaKeyframingContext>,
        _prop: &ResolvedProperty,
        values: &mut [f32],
        _index: Option<usize>,
        _eval: &AnimationEvalContext,
    ) -> RemapResult {
        RemapResult::all(values.len())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NlaBlendMode {
    #[default]
    Replace,
    Add,
    /// Add for most properties, quaternion multiply for rotations.
    Combine,
}

/// The strip an ID's action is being tweaked through.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweakStrip {
    /// Scene frame where the strip starts.
    pub frame_start: f32,
    /// Action frame shown at `frame_start`.
    pub action_start: f32,
    #[serde(default = "one")]
    pub scale: f32,
    #[serde(default = "one")]
    pub influence: f32,
    #[serde(default)]
    pub blend: NlaBlendMode,
    /// Values contributed by the tracks below, per property path.
    #[serde(default)]
    pub lower: BTreeMap<String, Vec<f32>>,
}

fn one() -> f32 {
    1.0
}

/// One tweaked strip per ID.
#[derive(Clone, Debug, Default)]
pub struct NlaTweakStack {
    strips: Vec<TweakStrip>,
    by_id: HashMap<IdKey, usize>,
}

impl NlaTweakStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_strip(&mut self, id: IdKey, strip: TweakStrip) {
        match self.by_id.get(&id) {
            Some(&slot) => self.strips[slot] = strip,
            None => {
                self.by_id.insert(id, self.strips.len());
                self.strips.push(strip);
            }
        }
    }

    fn strip_for(&self, id: IdKey) -> Option<&TweakStrip> {
        self.by_id.get(&id).map(|&slot| &self.strips[slot])
    }
}

fn quaternion_rotations(prop: &ResolvedProperty) -> bool {
    prop.identifier == "rotation_quaternion" && prop.array_length == 4
}

fn quat_mul(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    [
        a[0] * b[0] - a[1] * b[1] - a[2] * b[2] - a[3] * b[3],
        a[0] * b[1] + a[1] * b[0] + a[2] * b[3] - a[3] * b[2],
        a[0] * b[2] - a[1] * b[3] + a[2] * b[0] + a[3] * b[1],
        a[0] * b[3] + a[1] * b[2] - a[2] * b[1] + a[3] * b[0],
    ]
}

impl NlaRemapper for NlaTweakStack {
    fn keyframing_context(
        &self,
        id: &AnimatedId,
        _eval: &AnimationEvalContext,
    ) -> Option<NlaKeyframingContext> {
        if !id.adt.as_ref().is_some_and(|adt| adt.nla_tweak_mode) {
            return None;
        }
        self.by_id.get(&id.key).map(|&slot| NlaKeyframingContext {
            id: id.key,
            slot,
        })
    }

    fn remap_time(&self, id: &AnimatedId, frame: f32) -> f32 {
        if !id.adt.as_ref().is_some_and(|adt| adt.nla_tweak_mode) {
            return frame;
        }
        match self.strip_for(id.key) {
            Some(strip) if strip.scale != 0.0 => {
                strip.action_start + (frame - strip.frame_start) / strip.scale
            }
            _ => frame,
        }
    }

    fn remap_values(
        &self,
        ctx: Option<&NlaKeyframingContext>,
        prop: &ResolvedProperty,
        values: &mut [f32],
        index: Option<usize>,
        _eval: &AnimationEvalContext,
    ) -> RemapResult {
        let Some(strip) = ctx.and_then(|c| self.strips.get(c.slot)) else {
            return RemapResult::all(values.len());
        };

        let quaternion = strip.blend == NlaBlendMode::Combine && quaternion_rotations(prop);
        let mut result = RemapResult {
            successful: vec![false; values.len()],
            force_all: quaternion,
        };
        if strip.influence <= 0.0 {
            return result;
        }

        let lower = strip.lower.get(&prop.path_from_id());
        let lower_at = |i: usize, default: f32| {
            lower.and_then(|l| l.get(i)).copied().unwrap_or(default)
        };

        if quaternion {
            if values.len() != 4 {
                return result;
            }
            // Partial influence on a combined rotation has no inverse here.
            if strip.influence < 1.0 {
                return result;
            }
            let inv = [lower_at(0, 1.0), -lower_at(1, 0.0), -lower_at(2, 0.0), -lower_at(3, 0.0)];
            let q = quat_mul(inv, [values[0], values[1], values[2], values[3]]);
            values.copy_from_slice(&q);
            result.successful.fill(true);
            return result;
        }

        let influence = strip.influence;
        for (i, value) in values.iter_mut().enumerate() {
            if index.is_some_and(|wanted| wanted != i) {
                continue;
            }
            let below = lower_at(i, 0.0);
            *value = match strip.blend {
                NlaBlendMode::Replace => (*value - below * (1.0 - influence)) / influence,
                NlaBlendMode::Add | NlaBlendMode::Combine => (*value - below) / influence,
            };
            result.successful[i] = true;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdType;
    use crate::rna::{PropertyKind, StructKind, StructRef};

    fn prop(identifier: &str, len: usize) -> ResolvedProperty {
        ResolvedProperty {
            owner: StructRef {
                kind: StructKind::Id,
                path: String::new(),
            },
            identifier: identifier.into(),
            ui_name: identifier.into(),
            kind: PropertyKind::Float,
            array_length: len,
        }
    }

    fn tweaked_cube() -> AnimatedId {
        let mut cube = AnimatedId::new(IdKey(1), "Cube", IdType::Object);
        if let Some(adt) = cube.anim_data_ensure() {
            adt.nla_tweak_mode = true;
        }
        cube
    }

    #[test]
    fn passthrough_accepts_everything() {
        let mut values = [1.0, 2.0, 3.0];
        let res = NlaPassthrough.remap_values(
            None,
            &prop("location", 3),
            &mut values,
            Some(1),
            &AnimationEvalContext::at(1.0),
        );
        assert_eq!(res, RemapResult::all(3));
        assert_eq!(values, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn replace_strip_inverts_influence() {
        let cube = tweaked_cube();
        let mut stack = NlaTweakStack::new();
        let mut lower = BTreeMap::new();
        lower.insert("location".to_string(), vec![2.0, 2.0, 2.0]);
        stack.set_strip(
            cube.key,
            TweakStrip {
                frame_start: 10.0,
                action_start: 1.0,
                scale: 2.0,
                influence: 0.5,
                blend: NlaBlendMode::Replace,
                lower,
            },
        );

        let eval = AnimationEvalContext::at(20.0);
        assert_eq!(stack.remap_time(&cube, 20.0), 6.0);
        let ctx = stack.keyframing_context(&cube, &eval);
        assert!(ctx.is_some());

        let mut values = [3.0, 3.0, 3.0];
        let res = stack.remap_values(
            ctx.as_ref(),
            &prop("location", 3),
            &mut values,
            Some(2),
            &eval,
        );
        assert_eq!(res.successful, vec![false, false, true]);
        assert_eq!(values[2], 4.0);
        assert!(res.failed_indices(Some(2)).is_empty());
    }

    #[test]
    fn zero_influence_rejects_and_combine_quaternion_forces_all() {
        let cube = tweaked_cube();
        let mut stack = NlaTweakStack::new();
        stack.set_strip(
            cube.key,
            TweakStrip {
                frame_start: 0.0,
                action_start: 0.0,
                scale: 1.0,
                influence: 0.0,
                blend: NlaBlendMode::Combine,
                lower: Default::default(),
            },
        );
        let eval = AnimationEvalContext::at(1.0);
        let ctx = stack.keyframing_context(&cube, &eval);

        let mut values = [1.0, 0.0, 0.0, 0.0];
        let res = stack.remap_values(
            ctx.as_ref(),
            &prop("rotation_quaternion", 4),
            &mut values,
            Some(0),
            &eval,
        );
        assert!(res.force_all);
        assert_eq!(res.failed_indices(Some(0)), vec![0, 1, 2, 3]);
    }

    #[test]
    fn no_context_outside_tweak_mode() {
        let mut cube = tweaked_cube();
        let mut stack = NlaTweakStack::new();
        stack.set_strip(
            cube.key,
            TweakStrip {
                frame_start: 0.0,
                action_start: 0.0,
                scale: 1.0,
                influence: 1.0,
                blend: NlaBlendMode::Add,
                lower: Default::default(),
            },
        );
        if let Some(adt) = cube.adt.as_mut() {
            adt.nla_tweak_mode = false;
        }
        assert!(stack
            .keyframing_context(&cube, &AnimationEvalContext::default())
            .is_none());
    }
}
