//! Weft Core Runtime
//!
//! Foundational primitives for the Weft component library:
//!
//! - **Reactive Signals**: arena-backed signals with keyed persistence
//! - **Input Events**: keyboard and pointer vocabulary for the router
//! - **Color**: the RGBA currency of theme tokens
//!
//! # Example
//!
//! ```
//! use weft_core::reactive::ReactiveGraph;
//!
//! let mut graph = ReactiveGraph::new();
//! let count = graph.create_signal(0i32);
//! graph.set(count, 5);
//! assert_eq!(graph.get(count), Some(5));
//! ```

pub mod color;
pub mod context_state;
pub mod events;
pub mod reactive;

pub use color::Color;
pub use context_state::{request_rebuild, use_state_keyed, ContextState, StateKey};
pub use events::{EventType, Key, Modifiers};
pub use reactive::{
    DirtyFlag, ReactiveGraph, SharedReactiveGraph, Signal, SignalId, State, StateError,
    WatcherCallback,
};
