//! # Weft View
//!
//! The element substrate of the Weft component library:
//!
//! - **Elements**: [`div()`], [`text()`], [`svg()`] builders with
//!   utility-style modifiers, composed through [`ElementBuilder`]
//! - **Layout**: Taffy-backed [`LayoutTree`] with absolute-rect queries
//! - **Events**: hit-tested pointer routing, keyboard dispatch to the
//!   focused node, focus-out with descendant checks
//! - **Interaction state**: [`Stateful`] containers over user-defined
//!   finite-state machines
//! - **Overlays**: dropdown / toast / tooltip lifecycles with anchored
//!   placement and auto-dismiss deadlines
//!
//! This crate stops at a resolved element tree; rasterization belongs to
//! the host.

pub mod div;
pub mod element;
pub mod events;
pub mod key;
pub mod overlay;
pub mod router;
pub mod stateful;
pub mod svg;
pub mod text;
pub mod tree;

pub use div::{div, Div, ElementBuilder};
pub use element::{CursorStyle, Motion, RenderProps, TextAlign, TextProps, VectorProps};
pub use events::{EventCallback, EventContext, EventHandlers};
pub use key::InstanceKey;
pub use overlay::{
    overlay_manager, resolve_placement, Corner, OverlayBuilder, OverlayConfig, OverlayHandle,
    OverlayKind, OverlayManager, Placement,
};
pub use router::EventRouter;
pub use stateful::{
    stateful_with_key, use_shared_state, ButtonState, SharedState, StateCell, Stateful,
    StateTransitions,
};
pub use svg::{svg, Svg};
pub use text::{text, Text};
pub use tree::{LayoutNodeId, LayoutTree, Rect};

/// Prelude for component implementations
pub mod prelude {
    pub use crate::div::{div, Div, ElementBuilder};
    pub use crate::element::{CursorStyle, Motion, TextAlign};
    pub use crate::events::EventContext;
    pub use crate::key::InstanceKey;
    pub use crate::svg::svg;
    pub use crate::text::text;
    pub use crate::tree::{LayoutNodeId, LayoutTree, Rect};
}
