//! Library-agnostic incremental rendering.
//!
//! Components describe what they want drawn as keyed [`VisualElement`]s held
//! in [`ElementLayer`]s. A layer joins each new data set against its
//! previous elements with [`reconcile`] and animates the difference with
//! time-based [`Transition`]s. Backends only read layers; nothing in this
//! module draws.

pub mod element;
pub mod layer;
pub mod reconcile;
pub mod transition;

pub use element::{
    Anchor, Attrs, ElementData, ElementKey, ElementKind, Offset, Phase, Rect, TickValue,
    VisualElement,
};
pub use layer::{ElementLayer, ElementSpec, JoinSummary};
pub use reconcile::{reconcile, Reconciliation};
pub use transition::{Easing, Transition, DEFAULT_TRANSITION_MS};
