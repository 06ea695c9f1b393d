//! Keyframe deletion and curve clearing.
//!
//! Both resolve the property path first and then work on the curves of the
//! requested array index, or of every component when the index is -1.
//! Locked curves are skipped with a warning. A curve left without keys is
//! removed; a legacy action left without curves is detached from the ID
//! (unless the ID is tweaking it through the NLA).

use std::ops::Range;

use crate::action::Action;
use crate::depsgraph::{RecalcFlag, UpdateTarget};
use crate::fcurve::FCurve;
use crate::id::AnimatedId;
use crate::ids::{ActionId, BindingHandle, IdKey};
use crate::keyframing::KeyingContext;
use crate::library::Library;
use crate::report::ReportSeverity;
use crate::rna::ResolvedProperty;

#[derive(Copy, Clone, Debug, PartialEq)]
enum Removal {
    /// Remove the key at this (action-local) frame.
    Key(f32),
    /// Remove the whole curve.
    Curve,
}

impl Removal {
    fn verb(self) -> &'static str {
        match self {
            Removal::Key(_) => "delete",
            Removal::Curve => "clear",
        }
    }
}

/// Array indices covered by `array_index`; -1 means every component, and a
/// scalar property still gets its one pass.
fn index_range(array_index: i32, prop: &ResolvedProperty) -> Range<i32> {
    if array_index == -1 {
        return 0..i32::try_from(prop.component_count()).unwrap_or(i32::MAX);
    }
    match array_index.checked_add(1) {
        Some(end) if array_index >= 0 => array_index..end,
        _ => 0..0,
    }
}

fn fcurve_find<'a>(
    action: &'a Action,
    binding: BindingHandle,
    rna_path: &str,
    array_index: i32,
) -> Option<&'a FCurve> {
    if action.is_legacy() {
        action.legacy_fcurve_find(rna_path, array_index)
    } else {
        action.fcurve_find_for_binding(binding, rna_path, array_index)
    }
}

fn fcurve_find_mut<'a>(
    action: &'a mut Action,
    binding: BindingHandle,
    rna_path: &str,
    array_index: i32,
) -> Option<&'a mut FCurve> {
    if action.is_legacy() {
        action.legacy_fcurve_find_mut(rna_path, array_index)
    } else {
        action.fcurve_find_for_binding_mut(binding, rna_path, array_index)
    }
}

/// Remove a curve from wherever it lives. Detaches an emptied legacy action
/// from `id`.
fn animdata_fcurve_delete(
    action: &mut Action,
    id: &mut AnimatedId,
    binding: BindingHandle,
    rna_path: &str,
    array_index: i32,
) {
    if !action.is_legacy() {
        action.fcurve_remove_for_binding(binding, rna_path, array_index);
        return;
    }

    action.legacy_fcurve_remove(rna_path, array_index);
    let uses_action = id.action() == Some(action.id());
    let tweaking = id.anim_data().is_some_and(|adt| adt.nla_tweak_mode);
    if action.fcurves().is_empty() && uses_action && !tweaking {
        log::debug!(
            "action '{}' has no curves left; detaching it from {}",
            action.name,
            id.full_name()
        );
        action.unassign_id(id);
    }
}

fn tag_after_keyframe_delete(ctx: &mut KeyingContext<'_>, id: &AnimatedId) {
    match id.action() {
        Some(action) => ctx
            .depsgraph
            .tag_update(UpdateTarget::Action(action), RecalcFlag::AnimationNoFlush),
        None => {
            // The ID lost its animation, so the relations that evaluated it go too.
            ctx.depsgraph
                .tag_update(UpdateTarget::Id(id.key), RecalcFlag::AnimationNoFlush);
            ctx.depsgraph.tag_relations_update();
        }
    }
}

fn remove_keys(
    lib: &mut Library,
    ctx: &mut KeyingContext<'_>,
    key: IdKey,
    action: Option<ActionId>,
    rna_path: &str,
    array_index: i32,
    removal: Removal,
) -> usize {
    let verb = removal.verb();
    let Some(id) = lib.id(key).filter(|id| id.anim_data().is_some()) else {
        ctx.reports.report(
            ReportSeverity::Error,
            "No ID block and/or AnimData to delete keyframe from",
        );
        return 0;
    };

    let Some(prop) = ctx.properties.resolve(id, rna_path) else {
        ctx.reports.report(
            ReportSeverity::Error,
            &format!(
                "Could not {verb} keyframe, as RNA path is invalid for the given ID (ID = {}, \
                 path = {rna_path})",
                id.full_name()
            ),
        );
        return 0;
    };

    let (action_id, removal) = match (action, id.action()) {
        (Some(action), _) => (action, removal),
        (None, Some(action)) => match removal {
            Removal::Key(frame) => (action, Removal::Key(ctx.nla.remap_time(id, frame))),
            Removal::Curve => (action, Removal::Curve),
        },
        (None, None) => {
            ctx.reports.report(
                ReportSeverity::Error,
                &format!(
                    "No action to delete keyframes from for ID = {}",
                    id.full_name()
                ),
            );
            return 0;
        }
    };

    let (act, id) = match lib.action_and_id_mut(action_id, key) {
        Ok(pair) => pair,
        Err(err) => {
            ctx.reports.report(ReportSeverity::Error, &err.to_string());
            return 0;
        }
    };
    let binding = id
        .anim_data()
        .map(|adt| adt.binding_handle)
        .unwrap_or_default();

    let mut count = 0;
    for index in index_range(array_index, &prop) {
        let protected = match fcurve_find(act, binding, rna_path, index) {
            Some(fcurve) => act.fcurve_is_protected(fcurve),
            None => continue,
        };
        if protected {
            let message = match removal {
                Removal::Key(_) => "Not deleting keyframe for locked F-Curve",
                Removal::Curve => "Not clearing all keyframes from locked F-Curve",
            };
            ctx.reports.report(
                ReportSeverity::Warning,
                &format!(
                    "{message} '{rna_path}' for {:?} '{}'",
                    id.id_type, id.name
                ),
            );
            continue;
        }

        match removal {
            Removal::Key(frame) => {
                let Some(fcurve) = fcurve_find_mut(act, binding, rna_path, index) else {
                    continue;
                };
                if !fcurve.delete_keyframe_at(frame) {
                    continue;
                }
                if fcurve.is_empty() {
                    animdata_fcurve_delete(act, id, binding, rna_path, index);
                }
            }
            Removal::Curve => animdata_fcurve_delete(act, id, binding, rna_path, index),
        }
        count += 1;
    }

    if count > 0 {
        tag_after_keyframe_delete(ctx, id);
    }
    count
}

/// Delete the key at `frame` from the curves of one property.
///
/// Without an explicit `action` the ID's own action is used and `frame` is
/// mapped through the NLA remapper first. Returns the number of keys removed.
pub fn delete_keyframe(
    lib: &mut Library,
    ctx: &mut KeyingContext<'_>,
    key: IdKey,
    action: Option<ActionId>,
    rna_path: &str,
    array_index: i32,
    frame: f32,
) -> usize {
    remove_keys(
        lib,
        ctx,
        key,
        action,
        rna_path,
        array_index,
        Removal::Key(frame),
    )
}

/// Remove the curves of one property entirely. Returns how many were removed.
pub fn clear_keyframe(
    lib: &mut Library,
    ctx: &mut KeyingContext<'_>,
    key: IdKey,
    action: Option<ActionId>,
    rna_path: &str,
    array_index: i32,
) -> usize {
    remove_keys(lib, ctx, key, action, rna_path, array_index, Removal::Curve)
}
