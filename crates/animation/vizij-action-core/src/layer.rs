//! Layers: ordered, mixable levels of an action, each holding strips.

use serde::{Deserialize, Serialize};

use crate::ids::{LayerId, StripId};
use crate::strip::{Strip, StripType};

/// How a layer combines with the layers below it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixMode {
    #[default]
    Replace,
    Offset,
    Add,
    Subtract,
    Multiply,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    id: LayerId,
    pub name: String,
    pub influence: f32,
    pub mix_mode: MixMode,
    pub enabled: bool,
    strips: Vec<Strip>,
    next_strip: u32,
}

impl Layer {
    pub(crate) fn new(id: LayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            influence: 1.0,
            mix_mode: MixMode::Replace,
            enabled: true,
            strips: Vec::new(),
            next_strip: 0,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    pub(crate) fn strips_mut(&mut self) -> &mut [Strip] {
        &mut self.strips
    }

    pub fn strip(&self, index: usize) -> Option<&Strip> {
        self.strips.get(index)
    }

    pub fn strip_mut(&mut self, index: usize) -> Option<&mut Strip> {
        self.strips.get_mut(index)
    }

    /// Append a new infinite strip of the given type.
    pub fn strip_add(&mut self, strip_type: StripType) -> &mut Strip {
        let id = StripId(self.next_strip);
        self.next_strip = self.next_strip.wrapping_add(1);
        self.strips.push(Strip::new(id, strip_type));
        let last = self.strips.len() - 1;
        &mut self.strips[last]
    }

    /// Remove the strip and everything it owns. Returns whether it was found.
    pub fn strip_remove(&mut self, strip: StripId) -> bool {
        match self.strips.iter().position(|s| s.id() == strip) {
            Some(index) => {
                self.strips.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let layer = Layer::new(LayerId(0), "Layer");
        assert_eq!(layer.influence, 1.0);
        assert_eq!(layer.mix_mode, MixMode::Replace);
        assert!(layer.enabled);
        assert!(layer.strips().is_empty());
    }

    #[test]
    fn strips_are_removed_by_identity() {
        let mut layer = Layer::new(LayerId(0), "Layer");
        let a = layer.strip_add(StripType::Keyframe).id();
        let b = layer.strip_add(StripType::Keyframe).id();
        assert_ne!(a, b);

        assert!(layer.strip_remove(a));
        assert!(!layer.strip_remove(a));
        assert_eq!(layer.strips().len(), 1);
        assert_eq!(layer.strip(0).map(Strip::id), Some(b));

        // Ids are not reused after removal.
        let c = layer.strip_add(StripType::Keyframe).id();
        assert_ne!(c, a);
    }
}
