//! Keyframe commit engine.
//!
//! Takes properties of an animated ID, reads their current values, maps them
//! through the NLA remapper and writes one key per array component into the
//! right curves. Every attempted component yields one
//! [`SingleKeyingResult`]; the call returns their histogram.
//!
//! Legacy actions get keys in their flat curve list (grouped, NLA-remapped,
//! cycle-aware). Layered actions get keys in the channel bag of the ID's
//! binding on the first enabled layer's only strip.

use crate::action::Action;
use crate::binding::Binding;
use crate::config::Config;
use crate::depsgraph::{DepsgraphNotifier, RecalcFlag, UpdateTarget};
use crate::fcurve::{InsertKeyFlags, KeyframeSettings, KeyframeType};
use crate::id::{AnimatedId, IdType};
use crate::ids::{ActionId, IdKey};
use crate::library::Library;
use crate::nla::{AnimationEvalContext, NlaPassthrough, NlaRemapper, RemapResult};
use crate::report::{ReportSeverity, Reporter};
use crate::result::{CombinedKeyingResult, SingleKeyingResult};
use crate::rna::{
    keyframe_values, PropertyAccess, PropertyKind, ResolvedProperty, RnaPath, StructKind,
    VisualKeying,
};

static PASSTHROUGH: NlaPassthrough = NlaPassthrough;

/// Collaborators and preferences for one keying or deletion call.
pub struct KeyingContext<'a> {
    pub properties: &'a dyn PropertyAccess,
    pub visual: Option<&'a dyn VisualKeying>,
    pub nla: &'a dyn NlaRemapper,
    pub depsgraph: &'a mut dyn DepsgraphNotifier,
    pub reports: &'a mut dyn Reporter,
    pub config: &'a Config,
}

impl<'a> KeyingContext<'a> {
    /// Context without visual keying and without NLA remapping.
    pub fn new(
        properties: &'a dyn PropertyAccess,
        depsgraph: &'a mut dyn DepsgraphNotifier,
        reports: &'a mut dyn Reporter,
        config: &'a Config,
    ) -> Self {
        Self {
            properties,
            visual: None,
            nla: &PASSTHROUGH,
            depsgraph,
            reports,
            config,
        }
    }

    pub fn with_visual(mut self, visual: &'a dyn VisualKeying) -> Self {
        self.visual = Some(visual);
        self
    }

    pub fn with_nla(mut self, nla: &'a dyn NlaRemapper) -> Self {
        self.nla = nla;
        self
    }

    fn key_settings(&self, flags: InsertKeyFlags, key_type: KeyframeType) -> KeyframeSettings {
        let mut settings = self.config.keyframe_settings(flags);
        settings.keyframe_type = key_type;
        settings
    }
}

/// Whether keying with `flags` may create curves (neither replace-only nor
/// available-only).
#[inline]
pub fn key_insertion_may_create_fcurve(flags: InsertKeyFlags) -> bool {
    flags.may_create_fcurve()
}

/// Channel group new legacy curves of this property go into.
///
/// Pose bone properties group under the bone name, object transforms under
/// "Object Transforms".
pub fn default_channel_group_for_path(
    id: &AnimatedId,
    prop: &ResolvedProperty,
    rna_path: &str,
) -> Option<String> {
    match &prop.owner.kind {
        StructKind::PoseBone { name } => Some(name.clone()),
        StructKind::Id if id.id_type == IdType::Object => {
            let transform = ["location", "rotation", "scale"]
                .iter()
                .any(|part| rna_path.contains(part));
            transform.then(|| "Object Transforms".to_string())
        }
        _ => None,
    }
}

/// Whether keys for this action go to layers rather than the flat curve list.
fn use_layered_storage(action: &Action, config: &Config) -> bool {
    action.is_layered() && (!action.is_empty() || config.layered_actions)
}

/// Run the gates every insertion shares and make sure `key` has an action.
fn prepare_id_for_keying(
    lib: &mut Library,
    ctx: &mut KeyingContext<'_>,
    key: IdKey,
) -> Result<ActionId, SingleKeyingResult> {
    let Some(id) = lib.id(key) else {
        log::error!("cannot insert keys: no animated ID {key:?}");
        return Err(SingleKeyingResult::UnknownFailure);
    };
    if !id.editable {
        return Err(SingleKeyingResult::IdNotEditable);
    }
    let had_action = id.action().is_some();
    let action = lib
        .id_action_ensure(key)
        .map_err(|_| SingleKeyingResult::IdNotAnimatable)?;
    if !had_action {
        // The ID is animated now.
        ctx.depsgraph.tag_relations_update();
    }
    Ok(action)
}

fn tag_after_insert(ctx: &mut KeyingContext<'_>, keyed: ActionId, assigned: Option<ActionId>) {
    ctx.depsgraph
        .tag_update(UpdateTarget::Action(keyed), RecalcFlag::AnimationNoFlush);
    if let Some(assigned) = assigned.filter(|&a| a != keyed) {
        ctx.depsgraph
            .tag_update(UpdateTarget::Action(assigned), RecalcFlag::AnimationNoFlush);
    }
}

fn report_remap_failures(
    reports: &mut dyn Reporter,
    id: &AnimatedId,
    prop: &ResolvedProperty,
    index: Option<usize>,
    remap: &RemapResult,
) {
    let failed = remap.failed_indices(index);
    if failed.is_empty() {
        return;
    }
    let indices = failed
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    reports.report(
        ReportSeverity::Warning,
        &format!(
            "Could not insert {} keyframe(s) due to zero NLA influence, base value, or value \
             remapping failed: {}.{} for indices [{}]",
            failed.len(),
            id.full_name(),
            prop.ui_name,
            indices
        ),
    );
}

/// Insert keys for several property paths of one ID.
///
/// `scene_frame` is mapped through the NLA remapper for legacy actions.
/// Unresolvable paths count as [`SingleKeyingResult::CannotResolvePath`]
/// and do not stop the other paths.
#[allow(clippy::too_many_arguments)]
pub fn insert_key_rna(
    lib: &mut Library,
    ctx: &mut KeyingContext<'_>,
    key: IdKey,
    rna_paths: &[RnaPath],
    scene_frame: f32,
    flags: InsertKeyFlags,
    key_type: KeyframeType,
    eval: &AnimationEvalContext,
) -> CombinedKeyingResult {
    let action_id = match prepare_id_for_keying(lib, ctx, key) {
        Ok(action) => action,
        Err(result) => return CombinedKeyingResult::single(result),
    };
    let (action, id) = match lib.action_and_id_mut(action_id, key) {
        Ok(pair) => pair,
        Err(err) => {
            log::error!("cannot insert keys: {err}");
            return CombinedKeyingResult::single(SingleKeyingResult::UnknownFailure);
        }
    };
    let settings = ctx.key_settings(flags, key_type);

    let result = if use_layered_storage(action, ctx.config) {
        insert_key_layered_action(action, id, ctx, rna_paths, scene_frame, &settings, flags)
    } else {
        debug_assert!(action.is_legacy());
        let nla_context = if id.action() == Some(action_id) {
            ctx.nla.keyframing_context(id, eval)
        } else {
            None
        };
        let nla_frame = ctx.nla.remap_time(id, scene_frame);

        let mut combined = CombinedKeyingResult::new();
        for rna_path in rna_paths {
            let Some(prop) = ctx.properties.resolve(id, &rna_path.path) else {
                log::debug!("cannot resolve '{}' on {}", rna_path.path, id.full_name());
                combined.add(SingleKeyingResult::CannotResolvePath);
                continue;
            };
            let Some(path_from_id) = ctx.properties.path_from_id(id, &prop) else {
                combined.add(SingleKeyingResult::CannotResolvePath);
                continue;
            };
            let mut values = keyframe_values(ctx.properties, ctx.visual, id, &prop, flags.visual);
            let remap =
                ctx.nla
                    .remap_values(nla_context.as_ref(), &prop, &mut values, rna_path.index, eval);
            report_remap_failures(ctx.reports, id, &prop, rna_path.index, &remap);

            let group = default_channel_group_for_path(id, &prop, &path_from_id);
            let property = PropertyKeying {
                rna_path: &path_from_id,
                kind: prop.kind,
                group: group.as_deref(),
                values: &values,
                only_index: rna_path.index,
                remap: &remap,
            };
            combined.merge(&insert_key_legacy_action(
                action, ctx, &property, nla_frame, &settings, flags,
            ));
        }
        combined
    };

    if result.get_count(SingleKeyingResult::Success) > 0 {
        tag_after_insert(ctx, action_id, id.action());
    }
    result
}

/// Insert keys for one property path of one ID.
///
/// `array_index` -1 keys every component. An unresolvable path fails the
/// whole call. `group` names the channel group new legacy curves go into.
#[allow(clippy::too_many_arguments)]
pub fn insert_keyframe(
    lib: &mut Library,
    ctx: &mut KeyingContext<'_>,
    key: IdKey,
    group: Option<&str>,
    rna_path: &str,
    array_index: i32,
    eval: &AnimationEvalContext,
    key_type: KeyframeType,
    flags: InsertKeyFlags,
) -> CombinedKeyingResult {
    match lib.id(key) {
        Some(id) if id.editable => {
            if ctx.properties.resolve(id, rna_path).is_none() {
                return CombinedKeyingResult::single(SingleKeyingResult::CannotResolvePath);
            }
        }
        _ => {}
    }
    let action_id = match prepare_id_for_keying(lib, ctx, key) {
        Ok(action) => action,
        Err(result) => return CombinedKeyingResult::single(result),
    };
    let (action, id) = match lib.action_and_id_mut(action_id, key) {
        Ok(pair) => pair,
        Err(err) => {
            log::error!("cannot insert keys: {err}");
            return CombinedKeyingResult::single(SingleKeyingResult::UnknownFailure);
        }
    };
    let only_index = usize::try_from(array_index).ok();
    let settings = ctx.key_settings(flags, key_type);

    let result = if use_layered_storage(action, ctx.config) {
        let path = RnaPath {
            path: rna_path.to_string(),
            index: only_index,
        };
        insert_key_layered_action(action, id, ctx, &[path], eval.eval_time, &settings, flags)
    } else {
        let Some(prop) = ctx.properties.resolve(id, rna_path) else {
            return CombinedKeyingResult::single(SingleKeyingResult::CannotResolvePath);
        };
        let nla_context = if id.action() == Some(action_id) {
            ctx.nla.keyframing_context(id, eval)
        } else {
            None
        };
        let nla_frame = ctx.nla.remap_time(id, eval.eval_time);

        let mut values = keyframe_values(ctx.properties, ctx.visual, id, &prop, flags.visual);
        let remap = ctx
            .nla
            .remap_values(nla_context.as_ref(), &prop, &mut values, only_index, eval);
        report_remap_failures(ctx.reports, id, &prop, only_index, &remap);

        let property = PropertyKeying {
            rna_path,
            kind: prop.kind,
            group,
            values: &values,
            only_index,
            remap: &remap,
        };
        insert_key_legacy_action(action, ctx, &property, nla_frame, &settings, flags)
    };

    if result.get_count(SingleKeyingResult::Success) > 0 {
        tag_after_insert(ctx, action_id, id.action());
    }
    result
}

/// One property's worth of values on their way into a legacy action.
struct PropertyKeying<'p> {
    rna_path: &'p str,
    kind: PropertyKind,
    group: Option<&'p str>,
    values: &'p [f32],
    /// Key only this component, unless the remap forces all.
    only_index: Option<usize>,
    remap: &'p RemapResult,
}

/// Write the components of one property into a legacy action.
///
/// Components rejected by the remapper count as `UnableToRemap`. When the
/// remapper demands all components and the flags forbid creating curves,
/// components are tried under the restrictive flags until one succeeds; the
/// others are then keyed with the restriction lifted. If none succeeds the
/// property stays unkeyed. Each component is counted once.
fn insert_key_legacy_action(
    action: &mut Action,
    ctx: &mut KeyingContext<'_>,
    property: &PropertyKeying<'_>,
    frame: f32,
    settings: &KeyframeSettings,
    flags: InsertKeyFlags,
) -> CombinedKeyingResult {
    let remap = property.remap;
    let candidates: Vec<usize> = (0..property.values.len())
        .filter(|&i| remap.force_all || property.only_index.map_or(true, |only| only == i))
        .collect();

    let mut combined = CombinedKeyingResult::new();
    let mut keyable = Vec::with_capacity(candidates.len());
    for i in candidates {
        if remap.is_successful(i) {
            keyable.push(i);
        } else {
            combined.add(SingleKeyingResult::UnableToRemap);
        }
    }

    let mut writer = LegacyWriter {
        range: action.frame_range(),
        cyclic: flags.cycle_aware && action.is_cyclic(),
        action,
        property,
        frame,
        settings,
        created_curves: 0,
    };

    if remap.force_all && !flags.may_create_fcurve() {
        let mut pivot = None;
        let mut probe_failures = CombinedKeyingResult::new();
        for &i in &keyable {
            match writer.write(i, flags) {
                SingleKeyingResult::Success => {
                    combined.add(SingleKeyingResult::Success);
                    pivot = Some(i);
                    break;
                }
                failure => probe_failures.add(failure),
            }
        }
        match pivot {
            Some(pivot) => {
                // Components probed before the pivot are retried here.
                let relaxed = flags.without_creation_limits();
                for &i in keyable.iter().filter(|&&i| i != pivot) {
                    combined.add(writer.write(i, relaxed));
                }
            }
            None => combined.merge(&probe_failures),
        }
    } else {
        for &i in &keyable {
            combined.add(writer.write(i, flags));
        }
    }

    if writer.created_curves > 0 {
        ctx.depsgraph.tag_relations_update();
    }
    combined
}

struct LegacyWriter<'w, 'p> {
    action: &'w mut Action,
    property: &'w PropertyKeying<'p>,
    frame: f32,
    settings: &'w KeyframeSettings,
    range: (f32, f32),
    cyclic: bool,
    created_curves: usize,
}

impl LegacyWriter<'_, '_> {
    /// Find or create the curve of component `index` and key its value.
    fn write(&mut self, index: usize, flags: InsertKeyFlags) -> SingleKeyingResult {
        let property = self.property;
        let Ok(array_index) = i32::try_from(index) else {
            return SingleKeyingResult::UnknownFailure;
        };
        let value = property.values[index];
        let path = property.rna_path;

        let locked = match self.action.legacy_fcurve_find(path, array_index) {
            Some(existing) => self.action.fcurve_is_protected(existing),
            None => {
                if !flags.may_create_fcurve() {
                    return SingleKeyingResult::CannotCreateCurve;
                }
                self.created_curves += 1;
                property
                    .group
                    .and_then(|g| self.action.group_find(g))
                    .is_some_and(|g| g.protected)
            }
        };

        let fcurve = self
            .action
            .legacy_fcurve_ensure(property.group, path, array_index);
        if locked {
            return SingleKeyingResult::CurveNotKeyframeable;
        }

        let is_new_curve = fcurve.is_empty();
        if self.cyclic && fcurve.len() == 1 {
            fcurve.make_cyclic(self.range);
        }
        fcurve.update_autoflags(property.kind);

        let result = fcurve.insert_key(self.frame, value, self.settings, flags);

        if self.cyclic && is_new_curve {
            fcurve.make_cyclic(self.range);
        }
        result
    }
}

/// Key a layered action through the ID's binding.
///
/// A missing binding is created for the ID and assigned. There is no NLA
/// remapping and no channel grouping here.
fn insert_key_layered_action(
    action: &mut Action,
    id: &mut AnimatedId,
    ctx: &mut KeyingContext<'_>,
    rna_paths: &[RnaPath],
    frame: f32,
    settings: &KeyframeSettings,
    flags: InsertKeyFlags,
) -> CombinedKeyingResult {
    debug_assert!(action.is_layered());

    let handle = id.anim_data().map(|adt| adt.binding_handle).unwrap_or_default();
    let binding: Binding = match action.binding_for_handle(handle) {
        Some(binding) => binding.clone(),
        None => {
            let handle = action.binding_add_for_id(id);
            if let Err(err) = action.assign_id(Some(handle), id) {
                log::error!("cannot bind {} for keying: {err}", id.full_name());
                return CombinedKeyingResult::single(SingleKeyingResult::NoValidBinding);
            }
            match action.binding_for_handle(handle) {
                Some(binding) => binding.clone(),
                None => return CombinedKeyingResult::single(SingleKeyingResult::NoValidBinding),
            }
        }
    };

    action.layer_ensure_at_least_one();
    let Some(layer) = action.get_layer_for_keyframing() else {
        return CombinedKeyingResult::single(SingleKeyingResult::NoValidLayer);
    };
    debug_assert_eq!(layer.strips().len(), 1, "keying expects exactly one strip per layer");
    let strip = layer
        .strip_mut(0)
        .filter(|s| s.is_infinite() && s.frame_offset == 0.0)
        .and_then(|s| s.as_keyframe_mut());
    let Some(strip) = strip else {
        return CombinedKeyingResult::single(SingleKeyingResult::NoValidStrip);
    };

    let id: &AnimatedId = id;
    let mut combined = CombinedKeyingResult::new();
    for rna_path in rna_paths {
        let resolved = ctx
            .properties
            .resolve(id, &rna_path.path)
            .and_then(|prop| Some((ctx.properties.path_from_id(id, &prop)?, prop)));
        let Some((path_from_id, prop)) = resolved else {
            log::warn!(
                "Failed to insert key on binding {} due to unresolved RNA path: {}",
                binding.name(),
                rna_path.path
            );
            combined.add(SingleKeyingResult::CannotResolvePath);
            continue;
        };

        let values = keyframe_values(ctx.properties, ctx.visual, id, &prop, flags.visual);
        for (index, &value) in values.iter().enumerate() {
            if rna_path.index.is_some_and(|only| only != index) {
                continue;
            }
            let Ok(array_index) = i32::try_from(index) else {
                combined.add(SingleKeyingResult::UnknownFailure);
                continue;
            };
            combined.add(strip.keyframe_insert(
                &binding,
                &path_from_id,
                array_index,
                (frame, value),
                settings,
                flags,
            ));
        }
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depsgraph::UpdateLog;
    use crate::props::MemoryProperties;
    use crate::report::ReportList;

    struct Scene {
        lib: Library,
        props: MemoryProperties,
        cube: IdKey,
    }

    fn scene() -> Scene {
        let mut lib = Library::new();
        let cube = lib.id_add("Cube", IdType::Object);
        let mut props = MemoryProperties::new();
        if let Some(id) = lib.id(cube) {
            props.set(id, "location", PropertyKind::Float, &[1.0, 2.0, 3.0]);
            props.set(id, "hide_render", PropertyKind::Bool, &[1.0]);
        }
        Scene { lib, props, cube }
    }

    fn legacy_config() -> Config {
        Config {
            layered_actions: false,
            ..Config::default()
        }
    }

    #[test]
    fn channel_groups() {
        let s = scene();
        let cube = s.lib.id(s.cube).unwrap();
        let loc = s.props.resolve(cube, "location").unwrap();
        assert_eq!(
            default_channel_group_for_path(cube, &loc, "location").as_deref(),
            Some("Object Transforms")
        );
        let hide = s.props.resolve(cube, "hide_render").unwrap();
        assert_eq!(default_channel_group_for_path(cube, &hide, "hide_render"), None);

        let mut bone = loc.clone();
        bone.owner.kind = StructKind::PoseBone {
            name: "Arm".into(),
        };
        assert_eq!(
            default_channel_group_for_path(cube, &bone, "pose.bones[\"Arm\"].location").as_deref(),
            Some("Arm")
        );
    }

    #[test]
    fn legacy_insert_groups_and_flags_curves() {
        let mut s = scene();
        let config = legacy_config();
        let mut deps = UpdateLog::new();
        let mut reports = ReportList::new();
        let mut ctx = KeyingContext::new(&s.props, &mut deps, &mut reports, &config);

        let result = insert_key_rna(
            &mut s.lib,
            &mut ctx,
            s.cube,
            &[RnaPath::new("location"), RnaPath::new("hide_render")],
            5.0,
            InsertKeyFlags::default(),
            KeyframeType::Keyframe,
            &AnimationEvalContext::at(5.0),
        );
        assert_eq!(result.get_count(SingleKeyingResult::Success), 4);

        let action = s.lib.action(s.lib.action_for_id(s.cube).unwrap()).unwrap();
        assert!(action.is_legacy() && !action.is_empty());
        let loc = action.legacy_fcurve_find("location", 2).unwrap();
        assert_eq!(loc.group.as_deref(), Some("Object Transforms"));
        let hide = action.legacy_fcurve_find("hide_render", 0).unwrap();
        assert!(hide.flags.discrete_values);
        assert!(deps.relations_updated());
        assert!(deps.was_tagged(UpdateTarget::Action(action.id())));
    }

    #[test]
    fn single_index_and_unresolved_path() {
        let mut s = scene();
        let config = legacy_config();
        let mut deps = UpdateLog::new();
        let mut reports = ReportList::new();
        let mut ctx = KeyingContext::new(&s.props, &mut deps, &mut reports, &config);
        let eval = AnimationEvalContext::at(1.0);

        let result = insert_keyframe(
            &mut s.lib,
            &mut ctx,
            s.cube,
            None,
            "location",
            1,
            &eval,
            KeyframeType::Keyframe,
            InsertKeyFlags::default(),
        );
        assert_eq!(result.total(), 1);
        assert_eq!(result.get_count(SingleKeyingResult::Success), 1);

        let result = insert_keyframe(
            &mut s.lib,
            &mut ctx,
            s.cube,
            None,
            "nope",
            -1,
            &eval,
            KeyframeType::Keyframe,
            InsertKeyFlags::default(),
        );
        assert_eq!(result, CombinedKeyingResult::single(SingleKeyingResult::CannotResolvePath));

        let action = s.lib.action(s.lib.action_for_id(s.cube).unwrap()).unwrap();
        assert_eq!(action.fcurves().len(), 1);
        assert!(action.fcurves()[0].group.is_none());
    }

    #[test]
    fn gates_abort_whole_call() {
        let mut s = scene();
        let config = Config::default();
        let mut deps = UpdateLog::new();
        let mut reports = ReportList::new();
        let mut ctx = KeyingContext::new(&s.props, &mut deps, &mut reports, &config);

        s.lib.id_mut(s.cube).unwrap().editable = false;
        let result = insert_key_rna(
            &mut s.lib,
            &mut ctx,
            s.cube,
            &[RnaPath::new("location")],
            1.0,
            InsertKeyFlags::default(),
            KeyframeType::Keyframe,
            &AnimationEvalContext::at(1.0),
        );
        assert_eq!(result, CombinedKeyingResult::single(SingleKeyingResult::IdNotEditable));

        let screen = s.lib.id_add("Layout", IdType::Screen);
        let result = insert_key_rna(
            &mut s.lib,
            &mut ctx,
            screen,
            &[RnaPath::new("location")],
            1.0,
            InsertKeyFlags::default(),
            KeyframeType::Keyframe,
            &AnimationEvalContext::at(1.0),
        );
        assert_eq!(result, CombinedKeyingResult::single(SingleKeyingResult::IdNotAnimatable));
        assert!(s.lib.actions().next().is_none());
    }

    #[test]
    fn layered_keying_creates_binding_and_honours_index() {
        let mut s = scene();
        let config = Config::default();
        let mut deps = UpdateLog::new();
        let mut reports = ReportList::new();
        let mut ctx = KeyingContext::new(&s.props, &mut deps, &mut reports, &config);

        let result = insert_key_rna(
            &mut s.lib,
            &mut ctx,
            s.cube,
            &[RnaPath::with_index("location", 2), RnaPath::new("missing")],
            3.0,
            InsertKeyFlags::default(),
            KeyframeType::Breakdown,
            &AnimationEvalContext::at(3.0),
        );
        assert_eq!(result.get_count(SingleKeyingResult::Success), 1);
        assert_eq!(result.get_count(SingleKeyingResult::CannotResolvePath), 1);

        let cube = s.lib.id(s.cube).unwrap();
        let adt = cube.anim_data().unwrap();
        let action = s.lib.action(adt.action.unwrap()).unwrap();
        assert!(action.is_layered() && !action.is_empty());
        let bag = action.channelbag_for_binding(adt.binding_handle).unwrap();
        assert_eq!(bag.fcurves().len(), 1);
        let key = &bag.fcurves()[0].keyframes()[0];
        assert_eq!(key.co, [3.0, 3.0]);
        assert_eq!(key.keyframe_type, KeyframeType::Breakdown);
    }

    #[test]
    fn all_layers_disabled_reports_no_valid_layer() {
        let mut s = scene();
        let config = Config::default();
        let action = s.lib.id_action_ensure(s.cube).unwrap();
        s.lib
            .action_mut(action)
            .unwrap()
            .layer_add("Locked")
            .enabled = false;

        let mut deps = UpdateLog::new();
        let mut reports = ReportList::new();
        let mut ctx = KeyingContext::new(&s.props, &mut deps, &mut reports, &config);
        let result = insert_key_rna(
            &mut s.lib,
            &mut ctx,
            s.cube,
            &[RnaPath::new("location")],
            1.0,
            InsertKeyFlags::default(),
            KeyframeType::Keyframe,
            &AnimationEvalContext::at(1.0),
        );
        assert_eq!(result, CombinedKeyingResult::single(SingleKeyingResult::NoValidLayer));
        assert!(!deps.was_tagged(UpdateTarget::Action(action)));
    }
}
