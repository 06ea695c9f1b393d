//! Error type for fallible Action/Library operations.
//!
//! Keying itself never fails with an error: per-component outcomes are
//! aggregated in [`CombinedKeyingResult`](crate::result::CombinedKeyingResult).

use crate::ids::{ActionId, BindingHandle, IdKey};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("action not found: {0:?}")]
    ActionNotFound(ActionId),

    #[error("animated ID not found: {0:?}")]
    IdNotFound(IdKey),

    #[error("binding {0:?} does not exist in this action")]
    BindingNotFound(BindingHandle),

    #[error("a channel bag for binding {0:?} already exists on this strip")]
    ChannelBagExists(BindingHandle),

    #[error("'{id}' cannot be animated")]
    IdNotAnimatable { id: String },

    #[error("'{id}' is already animated by another action")]
    IdUsesOtherAction { id: String },

    #[error("binding '{binding}' is not suitable for '{id}'")]
    BindingNotSuitable { binding: String, id: String },
}
