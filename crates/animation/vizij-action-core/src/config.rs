//! User preferences that shape how keys are inserted.

use serde::{Deserialize, Serialize};

use crate::fcurve::{InsertKeyFlags, KeyframeSettings};

/// Keying configuration.
/// Mirrors the user-preference switches hosts usually expose in their UI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key new (empty) actions in layered mode rather than legacy mode.
    pub layered_actions: bool,
    pub keying: KeyingPrefs,
    /// Look of freshly inserted keys.
    pub keyframe: KeyframeSettings,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyingPrefs {
    pub visual_keying: bool,
    pub cycle_aware: bool,
    pub only_insert_needed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layered_actions: true,
            keying: KeyingPrefs::default(),
            keyframe: KeyframeSettings::default(),
        }
    }
}

impl Config {
    /// Flags for interactive keying, derived from the preferences.
    pub fn keyframing_flags(&self) -> InsertKeyFlags {
        InsertKeyFlags {
            needed: self.keying.only_insert_needed,
            visual: self.keying.visual_keying,
            cycle_aware: self.keying.cycle_aware,
            ..InsertKeyFlags::default()
        }
    }

    /// Settings for a new key, honouring `no_userpref`.
    pub fn keyframe_settings(&self, flags: InsertKeyFlags) -> KeyframeSettings {
        if flags.no_userpref {
            KeyframeSettings::default()
        } else {
            self.keyframe
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fcurve::Interpolation;

    #[test]
    fn flags_follow_preferences() {
        let mut cfg = Config::default();
        assert!(cfg.layered_actions);
        assert_eq!(cfg.keyframing_flags(), InsertKeyFlags::default());

        cfg.keying.only_insert_needed = true;
        cfg.keying.cycle_aware = true;
        let flags = cfg.keyframing_flags();
        assert!(flags.needed && flags.cycle_aware && !flags.visual);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = Config::from_json(
            r#"{ "layered_actions": false, "keyframe": { "keyframe_type": "keyframe", "handle": "vector", "interpolation": "linear" } }"#,
        )
        .unwrap();
        assert!(!cfg.layered_actions);
        assert_eq!(cfg.keyframe.interpolation, Interpolation::Linear);
        assert_eq!(cfg.keying, KeyingPrefs::default());

        let no_pref = InsertKeyFlags {
            no_userpref: true,
            ..Default::default()
        };
        assert_eq!(
            cfg.keyframe_settings(no_pref).interpolation,
            Interpolation::Bezier
        );
    }
}
