//! F-Curves: ordered keyframes for one scalar channel of one property.
//!
//! A curve is identified by `(rna_path, array_index)`. Keys are kept sorted
//! by time; two keys closer than [`BINARY_SEARCH_THRESHOLD`] frames are
//! considered the same key.
//!
//! Handle placement is deliberately naive: a new key gets flat handles one
//! frame either side and handles are never recalculated here.

use serde::{Deserialize, Serialize};

use crate::result::SingleKeyingResult;
use crate::rna::PropertyKind;

/// Keys closer than this (in frames) are treated as one.
pub const BINARY_SEARCH_THRESHOLD: f32 = 0.01;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    Constant,
    Linear,
    #[default]
    Bezier,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleType {
    Free,
    Auto,
    Vector,
    Aligned,
    #[default]
    AutoClamped,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyframeType {
    #[default]
    Keyframe,
    Breakdown,
    MovingHold,
    Extreme,
    Jitter,
    Generated,
}

/// How a new key should look.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyframeSettings {
    pub keyframe_type: KeyframeType,
    pub handle: HandleType,
    pub interpolation: Interpolation,
}

/// Behavioural switches for one insertion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertKeyFlags {
    /// Only insert when the curve does not already have this value here.
    pub needed: bool,
    /// Key the visual (evaluated) value instead of the stored one.
    pub visual: bool,
    /// Only replace existing keys; never add keys or curves.
    pub replace: bool,
    /// Only key curves that already exist.
    pub available: bool,
    /// Keep the period and flow of cyclic curves intact.
    pub cycle_aware: bool,
    /// When replacing, overwrite the whole key instead of only its value.
    pub overwrite_full: bool,
    /// Ignore the configured keyframe settings and use the built-in defaults.
    pub no_userpref: bool,
}

impl InsertKeyFlags {
    /// Whether keying with these flags is allowed to create new curves.
    #[inline]
    pub fn may_create_fcurve(&self) -> bool {
        !(self.replace || self.available)
    }

    /// The same flags with the replace/available restrictions dropped.
    pub fn without_creation_limits(mut self) -> Self {
        self.replace = false;
        self.available = false;
        self
    }
}

/// A bezier triple: left handle, key, right handle, plus per-key settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub left_handle: [f32; 2],
    pub co: [f32; 2],
    pub right_handle: [f32; 2],
    pub interpolation: Interpolation,
    pub handle_left_type: HandleType,
    pub handle_right_type: HandleType,
    pub keyframe_type: KeyframeType,
    pub selected: bool,
}

impl Keyframe {
    pub fn new(time: f32, value: f32, settings: &KeyframeSettings) -> Self {
        Self {
            left_handle: [time - 1.0, value],
            co: [time, value],
            right_handle: [time + 1.0, value],
            interpolation: settings.interpolation,
            handle_left_type: settings.handle,
            handle_right_type: settings.handle,
            keyframe_type: settings.keyframe_type,
            selected: true,
        }
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.co[0]
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.co[1]
    }

    fn shift_time(&mut self, delta: f32) {
        self.left_handle[0] += delta;
        self.co[0] += delta;
        self.right_handle[0] += delta;
    }

    /// Take over the value of `src`, moving both handles along with the key.
    fn replace_value_from(&mut self, src: &Keyframe) {
        let delta = src.co[1] - self.co[1];
        self.co[1] = src.co[1];
        self.left_handle[1] += delta;
        self.right_handle[1] += delta;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveFlags {
    pub visible: bool,
    pub selected: bool,
    /// Locked against editing.
    pub protected: bool,
    /// Baked to samples; keyframes cannot be added.
    pub sampled: bool,
    /// Values cannot be interpolated (enums, booleans).
    pub discrete_values: bool,
    /// Values are whole numbers.
    pub int_values: bool,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleMode {
    None,
    #[default]
    Repeat,
    RepeatOffset,
    RepeatMirror,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CyclesModifier {
    pub before_mode: CycleMode,
    pub after_mode: CycleMode,
    /// Number of repetitions, 0 for infinite.
    pub before_cycles: u32,
    pub after_cycles: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FModifierKind {
    Cycles(CyclesModifier),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FModifier {
    pub kind: FModifierKind,
    pub muted: bool,
    pub disabled: bool,
    pub restrict_range: Option<(f32, f32)>,
    pub use_influence: bool,
}

impl FModifier {
    pub fn cycles() -> Self {
        Self {
            kind: FModifierKind::Cycles(CyclesModifier::default()),
            muted: false,
            disabled: false,
            restrict_range: None,
            use_influence: false,
        }
    }

    fn is_active(&self) -> bool {
        !(self.muted || self.disabled)
    }
}

/// What kind of cycle a curve's modifiers describe.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CycleType {
    None,
    /// Repeats exactly; first and last key share a value.
    Perfect,
    /// Repeats with the per-cycle value delta accumulated.
    Offset,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FCurve {
    pub rna_path: String,
    pub array_index: i32,
    keyframes: Vec<Keyframe>,
    pub flags: CurveFlags,
    /// Channel group (legacy actions only).
    pub group: Option<String>,
    pub modifiers: Vec<FModifier>,
    active_keyframe: Option<usize>,
}

impl FCurve {
    pub fn new(rna_path: impl Into<String>, array_index: i32) -> Self {
        Self {
            rna_path: rna_path.into(),
            array_index,
            keyframes: Vec::new(),
            flags: CurveFlags {
                visible: true,
                selected: true,
                ..CurveFlags::default()
            },
            group: None,
            modifiers: Vec::new(),
            active_keyframe: None,
        }
    }

    #[inline]
    pub fn matches(&self, rna_path: &str, array_index: i32) -> bool {
        self.array_index == array_index && self.rna_path == rna_path
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn active_keyframe(&self) -> Option<&Keyframe> {
        self.active_keyframe.and_then(|i| self.keyframes.get(i))
    }

    /// Time range covered by the keys.
    pub fn key_range(&self) -> Option<(f32, f32)> {
        match (self.keyframes.first(), self.keyframes.last()) {
            (Some(first), Some(last)) => Some((first.time(), last.time())),
            _ => None,
        }
    }

    pub fn is_protected(&self) -> bool {
        self.flags.protected
    }

    /// Keys can be added: not locked, not baked, no modifier that hides keys.
    pub fn is_keyframable(&self) -> bool {
        if self.flags.sampled || self.flags.protected {
            return false;
        }
        self.modifiers
            .iter()
            .all(|m| matches!(m.kind, FModifierKind::Cycles(_)) || !m.is_active())
    }

    pub fn cycle_type(&self) -> CycleType {
        let Some(first) = self.modifiers.first() else {
            return CycleType::None;
        };
        let FModifierKind::Cycles(data) = &first.kind;
        if !first.is_active() || first.restrict_range.is_some() || first.use_influence {
            return CycleType::None;
        }
        if data.before_cycles != 0 || data.after_cycles != 0 {
            return CycleType::None;
        }
        let repeats = |m: CycleMode| matches!(m, CycleMode::Repeat | CycleMode::RepeatOffset);
        match (data.before_mode, data.after_mode) {
            (CycleMode::Repeat, CycleMode::Repeat) => CycleType::Perfect,
            (b, a) if repeats(b) && repeats(a) => CycleType::Offset,
            _ => CycleType::None,
        }
    }

    /// Set the discreteness flags from the type of the animated property.
    pub fn update_autoflags(&mut self, kind: PropertyKind) {
        self.flags.int_values = false;
        self.flags.discrete_values = false;
        match kind {
            PropertyKind::Float => {}
            PropertyKind::Int => self.flags.int_values = true,
            PropertyKind::Bool | PropertyKind::Enum => {
                self.flags.discrete_values = true;
                self.flags.int_values = true;
            }
        }
    }

    /// Index of the key at `time`, or the index where it would be inserted.
    /// The flag tells whether a key already exists there.
    pub fn binary_search(&self, time: f32) -> (usize, bool) {
        let keys = &self.keyframes;
        if keys.is_empty() {
            return (0, false);
        }
        // Fast paths for keying past either end.
        let first = keys[0].time();
        if (first - time).abs() < BINARY_SEARCH_THRESHOLD {
            return (0, true);
        }
        if time < first {
            return (0, false);
        }
        let last_index = keys.len() - 1;
        let last = keys[last_index].time();
        if (last - time).abs() < BINARY_SEARCH_THRESHOLD {
            return (last_index, true);
        }
        if time > last {
            return (keys.len(), false);
        }

        let (mut lo, mut hi) = (0usize, last_index);
        while lo <= hi {
            let mid = lo + (hi - lo) / 2;
            let t = keys[mid].time();
            if (t - time).abs() < BINARY_SEARCH_THRESHOLD {
                return (mid, true);
            }
            if time < t {
                if mid == 0 {
                    break;
                }
                hi = mid - 1;
            } else {
                lo = mid + 1;
            }
        }
        (lo, false)
    }

    /// Value of the curve at `time`, ignoring modifiers.
    ///
    /// Constant segments hold the left value; linear and bezier segments are
    /// interpolated linearly between the keys. Outside the keys the nearest
    /// key's value is held.
    pub fn evaluate(&self, time: f32) -> f32 {
        let keys = &self.keyframes;
        let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
            return 0.0;
        };
        if time <= first.time() {
            return first.value();
        }
        if time >= last.time() {
            return last.value();
        }
        let next = keys.partition_point(|k| k.time() <= time);
        let (left, right) = (&keys[next - 1], &keys[next]);
        match left.interpolation {
            Interpolation::Constant => left.value(),
            Interpolation::Linear | Interpolation::Bezier => {
                let span = right.time() - left.time();
                if span <= f32::EPSILON {
                    return left.value();
                }
                let t = (time - left.time()) / span;
                left.value() + (right.value() - left.value()) * t
            }
        }
    }

    /// Whether inserting `value` at `time` would change the curve.
    pub fn new_key_needed(&self, time: f32, value: f32) -> bool {
        if self.keyframes.is_empty() {
            return true;
        }
        let (index, exists) = self.binary_search(time);
        if exists {
            return self.keyframes[index].value() != value;
        }
        !approx_eq_relative(self.evaluate(time), value)
    }

    /// Insert (or replace) one key.
    pub fn insert_vert(
        &mut self,
        time: f32,
        value: f32,
        settings: &KeyframeSettings,
        flags: InsertKeyFlags,
    ) -> SingleKeyingResult {
        if flags.needed && !self.new_key_needed(time, value) {
            return SingleKeyingResult::NoKeyNeeded;
        }

        let mut key = Keyframe::new(time, value, settings);
        if self.flags.discrete_values {
            key.interpolation = Interpolation::Constant;
        } else if key.interpolation == Interpolation::Bezier && self.flags.int_values {
            key.interpolation = Interpolation::Linear;
        }

        let old_len = self.keyframes.len();
        let Some(index) = self.insert_keyframe(key, flags) else {
            return SingleKeyingResult::UnknownFailure;
        };
        self.active_keyframe = Some(index);

        // A key added between others follows its neighbour's interpolation.
        // Replaced keys keep theirs.
        let len = self.keyframes.len();
        if len > 2 && !flags.replace && len > old_len {
            let neighbour = if index > 0 {
                Some(index - 1)
            } else if index + 1 < len {
                Some(index + 1)
            } else {
                None
            };
            if let Some(n) = neighbour {
                self.keyframes[index].interpolation = self.keyframes[n].interpolation;
            }
        }

        SingleKeyingResult::Success
    }

    /// Insert a key after checking keyframability, wrapping the location
    /// into the curve's cycle when `cycle_aware` is set.
    ///
    /// Cycle-aware replacement of end keys only applies to perfect cycles.
    pub fn insert_key(
        &mut self,
        mut time: f32,
        mut value: f32,
        settings: &KeyframeSettings,
        mut flags: InsertKeyFlags,
    ) -> SingleKeyingResult {
        if !self.is_keyframable() {
            return SingleKeyingResult::CurveNotKeyframeable;
        }
        if flags.cycle_aware
            && self.remap_cyclic_keyframe_location(&mut time, &mut value) != CycleType::Perfect
        {
            flags.cycle_aware = false;
        }
        self.insert_vert(time, value, settings, flags)
    }

    /// Place `key` on the curve. Returns its index, or `None` when the flags
    /// forbid adding it.
    fn insert_keyframe(&mut self, key: Keyframe, flags: InsertKeyFlags) -> Option<usize> {
        if self.keyframes.is_empty() {
            if flags.replace || self.flags.sampled {
                return None;
            }
            self.keyframes.push(key);
            return Some(0);
        }

        let (index, exists) = self.binary_search(key.time());
        if exists {
            if flags.overwrite_full {
                self.keyframes[index] = key.clone();
            } else {
                self.keyframes[index].replace_value_from(&key);
            }
            let last = self.keyframes.len() - 1;
            if flags.cycle_aware
                && (index == 0 || index == last)
                && self.cycle_type() == CycleType::Perfect
            {
                let other = if index == 0 { last } else { 0 };
                self.keyframes[other].replace_value_from(&key);
            }
            return Some(index);
        }

        if flags.replace {
            return None;
        }
        self.keyframes.insert(index, key);
        Some(index)
    }

    pub fn delete_key(&mut self, index: usize) -> Option<Keyframe> {
        if index >= self.keyframes.len() {
            return None;
        }
        match self.active_keyframe {
            Some(a) if a == index => self.active_keyframe = None,
            Some(a) if a > index => self.active_keyframe = Some(a - 1),
            _ => {}
        }
        Some(self.keyframes.remove(index))
    }

    /// Remove the key at `time`. Returns whether one was there.
    pub fn delete_keyframe_at(&mut self, time: f32) -> bool {
        let (index, exists) = self.binary_search(time);
        exists && self.delete_key(index).is_some()
    }

    /// Move a key about to be inserted into the curve's main cycle.
    ///
    /// Only applies to cyclic curves with at least two keys. For offset
    /// cycles the value is shifted by the accumulated per-cycle delta.
    pub fn remap_cyclic_keyframe_location(&self, time: &mut f32, value: &mut f32) -> CycleType {
        if self.keyframes.len() < 2 {
            return CycleType::None;
        }
        let cycle = self.cycle_type();
        if cycle == CycleType::None {
            return CycleType::None;
        }

        let first = &self.keyframes[0];
        let last = &self.keyframes[self.keyframes.len() - 1];
        let (start, end) = (first.time(), last.time());
        if start >= end {
            return CycleType::None;
        }

        if *time < start || *time > end {
            let period = end - start;
            let step = ((*time - start) / period).floor();
            *time -= step * period;

            if cycle == CycleType::Offset {
                if let Some(FModifierKind::Cycles(data)) = self.modifiers.first().map(|m| &m.kind)
                {
                    let mode = if step >= 0.0 {
                        data.after_mode
                    } else {
                        data.before_mode
                    };
                    if mode == CycleMode::RepeatOffset {
                        *value -= step * (last.value() - first.value());
                    }
                }
            }
        }
        cycle
    }

    /// Turn a curve holding exactly one key into one full cycle of `range`.
    ///
    /// The key is wrapped into the range, duplicated one period later, and a
    /// cycles modifier is added if the curve has no modifiers yet.
    pub fn make_cyclic(&mut self, range: (f32, f32)) {
        if self.keyframes.len() != 1 {
            return;
        }
        let period = range.1 - range.0;
        if period < 0.1 {
            return;
        }

        let offset = self.keyframes[0].time() - range.0;
        let fix = (offset / period).floor() * period;
        self.keyframes[0].shift_time(-fix);

        let mut copy = self.keyframes[0].clone();
        copy.shift_time(period);
        self.keyframes.push(copy);

        if self.modifiers.is_empty() {
            self.modifiers.push(FModifier::cycles());
        }
    }
}

/// Float comparison with both an absolute epsilon and a ULP distance bound.
fn approx_eq_relative(a: f32, b: f32) -> bool {
    const MAX_ULPS: i32 = 32;
    if (a - b).abs() <= f32::EPSILON {
        return true;
    }
    if a.is_sign_negative() != b.is_sign_negative() {
        return false;
    }
    (a.to_bits() as i32 - b.to_bits() as i32).abs() <= MAX_ULPS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve_with(keys: &[(f32, f32)]) -> FCurve {
        let mut fcu = FCurve::new("location", 0);
        for &(t, v) in keys {
            fcu.insert_vert(t, v, &KeyframeSettings::default(), InsertKeyFlags::default());
        }
        fcu
    }

    #[test]
    fn keys_stay_sorted_and_replace_within_threshold() {
        let mut fcu = curve_with(&[(10.0, 1.0), (1.0, 0.0), (5.0, 0.5)]);
        let times: Vec<f32> = fcu.keyframes().iter().map(Keyframe::time).collect();
        assert_eq!(times, vec![1.0, 5.0, 10.0]);

        fcu.insert_vert(5.005, 2.0, &KeyframeSettings::default(), InsertKeyFlags::default());
        assert_eq!(fcu.len(), 3);
        assert_eq!(fcu.keyframes()[1].value(), 2.0);
        assert_eq!(fcu.keyframes()[1].left_handle[1], 2.0);
    }

    #[test]
    fn replace_only_does_not_add_keys() {
        let mut fcu = curve_with(&[(1.0, 0.0)]);
        let flags = InsertKeyFlags {
            replace: true,
            ..Default::default()
        };
        let settings = KeyframeSettings::default();
        assert_eq!(
            fcu.insert_vert(2.0, 1.0, &settings, flags),
            SingleKeyingResult::UnknownFailure
        );
        assert_eq!(
            fcu.insert_vert(1.0, 3.0, &settings, flags),
            SingleKeyingResult::Success
        );
        assert_eq!(fcu.len(), 1);
        assert_eq!(fcu.keyframes()[0].value(), 3.0);
    }

    #[test]
    fn needed_checks_existing_keys_and_evaluated_value() {
        let mut fcu = curve_with(&[(0.0, 0.0), (10.0, 10.0)]);
        fcu.keyframes[0].interpolation = Interpolation::Linear;
        let flags = InsertKeyFlags {
            needed: true,
            ..Default::default()
        };
        let settings = KeyframeSettings::default();
        assert_eq!(
            fcu.insert_vert(10.0, 10.0, &settings, flags),
            SingleKeyingResult::NoKeyNeeded
        );
        assert_eq!(
            fcu.insert_vert(5.0, 5.0, &settings, flags),
            SingleKeyingResult::NoKeyNeeded
        );
        assert_eq!(
            fcu.insert_vert(5.0, 7.0, &settings, flags),
            SingleKeyingResult::Success
        );
        assert_eq!(fcu.len(), 3);
    }

    #[test]
    fn discrete_curves_get_constant_keys() {
        let mut fcu = FCurve::new("hide_render", 0);
        fcu.update_autoflags(PropertyKind::Bool);
        assert!(fcu.flags.discrete_values && fcu.flags.int_values);
        fcu.insert_vert(1.0, 1.0, &KeyframeSettings::default(), InsertKeyFlags::default());
        assert_eq!(fcu.keyframes()[0].interpolation, Interpolation::Constant);

        fcu.update_autoflags(PropertyKind::Float);
        assert!(!fcu.flags.discrete_values && !fcu.flags.int_values);
    }

    #[test]
    fn inserted_key_inherits_neighbour_interpolation() {
        let mut fcu = curve_with(&[(0.0, 0.0), (10.0, 1.0)]);
        fcu.keyframes[0].interpolation = Interpolation::Constant;
        fcu.insert_vert(5.0, 3.0, &KeyframeSettings::default(), InsertKeyFlags::default());
        assert_eq!(fcu.keyframes()[1].interpolation, Interpolation::Constant);
        assert_eq!(fcu.active_keyframe().map(Keyframe::time), Some(5.0));
    }

    #[test]
    fn make_cyclic_duplicates_single_key() {
        let mut fcu = curve_with(&[(30.0, 2.0)]);
        fcu.make_cyclic((1.0, 25.0));
        assert_eq!(fcu.len(), 2);
        assert_eq!(fcu.keyframes()[0].time(), 6.0);
        assert_eq!(fcu.keyframes()[1].time(), 30.0);
        assert_eq!(fcu.keyframes()[1].value(), 2.0);
        assert_eq!(fcu.cycle_type(), CycleType::Perfect);

        let mut tiny = curve_with(&[(1.0, 0.0)]);
        tiny.make_cyclic((1.0, 1.05));
        assert_eq!(tiny.len(), 1);
        assert!(tiny.modifiers.is_empty());
    }

    #[test]
    fn cyclic_remap_wraps_time_and_offsets_value() {
        let mut fcu = curve_with(&[(0.0, 0.0), (10.0, 5.0)]);
        fcu.modifiers.push(FModifier::cycles());

        let (mut t, mut v) = (23.0, 1.0);
        assert_eq!(
            fcu.remap_cyclic_keyframe_location(&mut t, &mut v),
            CycleType::Perfect
        );
        assert_eq!((t, v), (3.0, 1.0));

        if let FModifierKind::Cycles(data) = &mut fcu.modifiers[0].kind {
            data.after_mode = CycleMode::RepeatOffset;
        }
        let (mut t, mut v) = (23.0, 11.0);
        assert_eq!(
            fcu.remap_cyclic_keyframe_location(&mut t, &mut v),
            CycleType::Offset
        );
        assert_eq!((t, v), (3.0, 1.0));
    }

    #[test]
    fn cycle_aware_replace_keeps_perfect_cycle_closed() {
        let mut fcu = curve_with(&[(1.0, 0.0), (25.0, 0.0)]);
        fcu.modifiers.push(FModifier::cycles());
        let flags = InsertKeyFlags {
            cycle_aware: true,
            ..Default::default()
        };
        fcu.insert_vert(1.0, 4.0, &KeyframeSettings::default(), flags);
        assert_eq!(fcu.keyframes()[0].value(), 4.0);
        assert_eq!(fcu.keyframes()[1].value(), 4.0);
    }

    #[test]
    fn insert_key_wraps_into_cycle() {
        let mut fcu = curve_with(&[(1.0, 0.0), (25.0, 0.0)]);
        fcu.modifiers.push(FModifier::cycles());
        let flags = InsertKeyFlags {
            cycle_aware: true,
            ..Default::default()
        };
        let result = fcu.insert_key(35.0, 2.0, &KeyframeSettings::default(), flags);
        assert_eq!(result, SingleKeyingResult::Success);
        assert_eq!(fcu.len(), 3);
        assert_eq!(fcu.keyframes()[1].time(), 11.0);

        fcu.flags.protected = true;
        assert_eq!(
            fcu.insert_key(5.0, 1.0, &KeyframeSettings::default(), flags),
            SingleKeyingResult::CurveNotKeyframeable
        );
    }

    #[test]
    fn keyframability() {
        let mut fcu = FCurve::new("location", 0);
        assert!(fcu.is_keyframable());
        fcu.modifiers.push(FModifier::cycles());
        assert!(fcu.is_keyframable());
        fcu.flags.protected = true;
        assert!(!fcu.is_keyframable());
        fcu.flags.protected = false;
        fcu.flags.sampled = true;
        assert!(!fcu.is_keyframable());
    }

    #[test]
    fn delete_by_time() {
        let mut fcu = curve_with(&[(1.0, 0.0), (2.0, 1.0)]);
        assert!(!fcu.delete_keyframe_at(1.5));
        assert!(fcu.delete_keyframe_at(2.004));
        assert_eq!(fcu.len(), 1);
        assert_eq!(fcu.key_range(), Some((1.0, 1.0)));
    }
}
