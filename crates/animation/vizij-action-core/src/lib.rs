//! Vizij Action Core (engine-agnostic)
//!
//! Layered action data model and the keyframe commit engine that writes into
//! it. An [`Action`] holds either legacy flat curves or a stack of layers,
//! each layer a stack of strips; keyframe strips keep one [`ChannelBag`] of
//! curves per [`Binding`]. IDs in the [`Library`] point at an action and a
//! binding handle.
//!
//! Property access, NLA remapping, dependency-graph tagging and user reports
//! are traits so a host can plug in its own. [`MemoryProperties`],
//! [`NlaTweakStack`], [`UpdateLog`] and [`ReportList`] are in-memory versions.

pub mod action;
pub mod binding;
pub mod config;
pub mod depsgraph;
pub mod error;
pub mod fcurve;
pub mod id;
pub mod ids;
pub mod keyframe_delete;
pub mod keyframing;
pub mod layer;
pub mod library;
mod naming;
pub mod nla;
pub mod props;
pub mod report;
pub mod result;
pub mod rna;
pub mod strip;

// Re-exports for hosts
pub use action::{Action, ActionGroup};
pub use binding::Binding;
pub use config::{Config, KeyingPrefs};
pub use depsgraph::{DepsgraphNotifier, RecalcFlag, UpdateLog, UpdateTarget};
pub use error::ActionError;
pub use fcurve::{
    CycleType, FCurve, HandleType, InsertKeyFlags, Interpolation, Keyframe, KeyframeSettings,
    KeyframeType,
};
pub use id::{AnimData, AnimatedId, IdType};
pub use ids::{ActionId, BindingHandle, IdKey, LayerId, StripId};
pub use keyframe_delete::{clear_keyframe, delete_keyframe};
pub use keyframing::{
    default_channel_group_for_path, insert_key_rna, insert_keyframe,
    key_insertion_may_create_fcurve, KeyingContext,
};
pub use layer::{Layer, MixMode};
pub use library::Library;
pub use nla::{
    AnimationEvalContext, NlaBlendMode, NlaPassthrough, NlaRemapper, NlaTweakStack, TweakStrip,
};
pub use props::{MemoryProperties, PropertyRecord};
pub use report::{Report, ReportList, ReportSeverity, Reporter};
pub use result::{CombinedKeyingResult, SingleKeyingResult};
pub use rna::{PropertyAccess, PropertyKind, ResolvedProperty, RnaPath, VisualKeying};
pub use strip::{ChannelBag, KeyframeStrip, Strip, StripData, StripType};
