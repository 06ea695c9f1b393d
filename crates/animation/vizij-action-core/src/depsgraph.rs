//! Dependency-invalidation seam.
//!
//! Keying and deletion tell the host what changed so it can re-evaluate.
//! [`UpdateLog`] records the notifications, which is all tests need.

use serde::{Deserialize, Serialize};

use crate::ids::{ActionId, IdKey};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum UpdateTarget {
    Action(ActionId),
    Id(IdKey),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RecalcFlag {
    /// Animation data changed; dependents need no flush.
    AnimationNoFlush,
}

pub trait DepsgraphNotifier {
    fn tag_update(&mut self, target: UpdateTarget, flag: RecalcFlag);

    /// The set of relations between data-blocks changed.
    fn tag_relations_update(&mut self);
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum UpdateEvent {
    Tag(UpdateTarget, RecalcFlag),
    Relations,
}

#[derive(Clone, Debug, Default)]
pub struct UpdateLog {
    events: Vec<UpdateEvent>,
}

impl UpdateLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[UpdateEvent] {
        &self.events
    }

    pub fn was_tagged(&self, target: UpdateTarget) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, UpdateEvent::Tag(t, _) if *t == target))
    }

    pub fn relations_updated(&self) -> bool {
        self.events.contains(&UpdateEvent::Relations)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl DepsgraphNotifier for UpdateLog {
    fn tag_update(&mut self, target: UpdateTarget, flag: RecalcFlag) {
        log::trace!("depsgraph tag {target:?} ({flag:?})");
        self.events.push(UpdateEvent::Tag(target, flag));
    }

    fn tag_relations_update(&mut self) {
        log::trace!("depsgraph relations update");
        self.events.push(UpdateEvent::Relations);
    }
}
