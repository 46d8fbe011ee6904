//! Stateful elements with user-defined interaction states
//!
//! `Stateful<S>` wraps a [`Div`] with a small finite-state machine: the
//! state type defines its transitions over routed events, and the
//! `on_state` closure rebuilds the visual content for the current state.
//!
//! ```ignore
//! let button = Stateful::new(ButtonState::Idle)
//!     .h(40.0)
//!     .cursor_pointer()
//!     .on_state(|state| match state {
//!         ButtonState::Hovered => div().bg(hover_bg),
//!         _ => div().bg(idle_bg),
//!     })
//!     .on_click(|_| tracing::debug!("pressed"));
//! ```

use rustc_hash::FxHashMap;
use std::any::Any;
use std::rc::Rc;
use std::sync::{Arc, Mutex, OnceLock};

use weft_core::{request_rebuild, EventType, SignalId, StateKey};

use crate::div::{div, Div, ElementBuilder};
use crate::element::CursorStyle;
use crate::events::{EventContext, EventHandlers};
use crate::tree::{LayoutNodeId, LayoutTree};

/// Maps routed events to state transitions
pub trait StateTransitions: Copy + PartialEq + Send + 'static {
    /// The next state for an event, or `None` to stay put
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Interaction states shared by button-like elements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonState {
    #[default]
    Idle,
    Hovered,
    Pressed,
    Disabled,
}

impl StateTransitions for ButtonState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use ButtonState::*;
        match (self, event) {
            (Idle, EventType::PointerEnter) => Some(Hovered),
            (Hovered, EventType::PointerLeave) => Some(Idle),
            (Hovered, EventType::PointerDown) => Some(Pressed),
            (Pressed, EventType::PointerUp) => Some(Hovered),
            (Pressed, EventType::PointerLeave) => Some(Idle),
            _ => None,
        }
    }
}

/// Mutable cell holding one interaction state
pub struct StateCell<S> {
    pub state: S,
}

/// Shared, persistent interaction state
pub type SharedState<S> = Arc<Mutex<StateCell<S>>>;

static SHARED_STATES: OnceLock<Mutex<FxHashMap<StateKey, Arc<dyn Any + Send + Sync>>>> =
    OnceLock::new();

/// Get or create a persistent [`SharedState`] for the given key
///
/// Like keyed signals, shared interaction state must survive rebuilds;
/// the registry keys on `(state type, key)`.
pub fn use_shared_state<S: Default + Send + Sync + 'static>(key: &str) -> SharedState<S> {
    let registry = SHARED_STATES.get_or_init(|| Mutex::new(FxHashMap::default()));
    let state_key = StateKey::from_string::<S>(key);
    let mut map = registry.lock().unwrap();
    let entry = map
        .entry(state_key)
        .or_insert_with(|| {
            Arc::new(Mutex::new(StateCell {
                state: S::default(),
            })) as Arc<dyn Any + Send + Sync>
        })
        .clone();
    drop(map);
    match entry.downcast::<Mutex<StateCell<S>>>() {
        Ok(cell) => cell,
        // Unreachable: the map is keyed by the state's TypeId
        Err(_) => Arc::new(Mutex::new(StateCell {
            state: S::default(),
        })),
    }
}

/// A `Div` whose content is rebuilt from an interaction state machine
pub struct Stateful<S: StateTransitions> {
    shared: SharedState<S>,
    base: Div,
    on_state: Option<Rc<dyn Fn(S) -> Div>>,
    deps: Vec<SignalId>,
}

impl<S: StateTransitions + Default + Sync> Stateful<S> {
    /// Create with a fresh, unshared state cell
    pub fn new(initial: S) -> Self {
        Self::with_shared_state(Arc::new(Mutex::new(StateCell { state: initial })))
    }
}

impl<S: StateTransitions> Stateful<S> {
    /// Create over an existing shared state cell
    pub fn with_shared_state(shared: SharedState<S>) -> Self {
        Self {
            shared,
            base: div(),
            on_state: None,
            deps: Vec::new(),
        }
    }

    /// Force the current state (used for disabled overrides)
    pub fn initial(self, state: S) -> Self {
        self.shared.lock().unwrap().state = state;
        self
    }

    /// The visual content closure, re-run per state change
    pub fn on_state<F>(mut self, f: F) -> Self
    where
        F: Fn(S) -> Div + 'static,
    {
        self.on_state = Some(Rc::new(f));
        self
    }

    /// Signals whose writes should rebuild this element's subtree
    pub fn deps(mut self, deps: &[SignalId]) -> Self {
        self.deps.extend_from_slice(deps);
        self
    }

    /// The signals registered via [`Stateful::deps`]
    pub fn dep_ids(&self) -> &[SignalId] {
        &self.deps
    }

    /// Current state snapshot
    pub fn state(&self) -> S {
        self.shared.lock().unwrap().state
    }

    // -- base passthroughs ----------------------------------------------

    pub fn w(mut self, width: f32) -> Self {
        self.base = self.base.w(width);
        self
    }

    pub fn h(mut self, height: f32) -> Self {
        self.base = self.base.h(height);
        self
    }

    pub fn w_full(mut self) -> Self {
        self.base = self.base.w_full();
        self
    }

    pub fn w_fit(mut self) -> Self {
        self.base = self.base.w_fit();
        self
    }

    pub fn h_fit(mut self) -> Self {
        self.base = self.base.h_fit();
        self
    }

    pub fn px(mut self, padding: f32) -> Self {
        self.base = self.base.px(padding);
        self
    }

    pub fn py(mut self, padding: f32) -> Self {
        self.base = self.base.py(padding);
        self
    }

    pub fn cursor(mut self, cursor: CursorStyle) -> Self {
        self.base = self.base.cursor(cursor);
        self
    }

    pub fn cursor_pointer(mut self) -> Self {
        self.base = self.base.cursor_pointer();
        self
    }

    pub fn focusable(mut self) -> Self {
        self.base = self.base.focusable();
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.base = self.base.id(id);
        self
    }

    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.base = self.base.on_click(handler);
        self
    }

    pub fn on_key_down<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.base = self.base.on_key_down(handler);
        self
    }

    pub fn on_focus_out<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.base = self.base.on_focus_out(handler);
        self
    }

    pub fn on_text_input<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.base = self.base.on_text_input(handler);
        self
    }

    /// Step the FSM for a routed event, requesting a rebuild on change
    fn step(shared: &SharedState<S>, event: EventType) {
        let mut cell = shared.lock().unwrap();
        if let Some(next) = cell.state.on_event(event) {
            if next != cell.state {
                cell.state = next;
                drop(cell);
                request_rebuild();
            }
        }
    }

    fn fsm_handlers(&self) -> EventHandlers {
        let mut handlers = EventHandlers::new();
        for event in [
            EventType::PointerEnter,
            EventType::PointerLeave,
            EventType::PointerDown,
            EventType::PointerUp,
            EventType::FocusIn,
            EventType::FocusOut,
        ] {
            let shared = Arc::clone(&self.shared);
            handlers.on(event, Rc::new(move |ctx: &EventContext| {
                Self::step(&shared, ctx.event_type);
            }));
        }
        handlers
    }
}

impl<S: StateTransitions> ElementBuilder for Stateful<S> {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        let mut handlers = self.fsm_handlers();
        handlers.merge(&self.base.handlers);

        let id = tree.insert(
            self.base.style.clone(),
            self.base.props.clone(),
            Some(handlers),
        );
        for child in &self.base.children {
            let child_id = child.build(tree);
            tree.add_child(id, child_id);
        }
        if let Some(ref on_state) = self.on_state {
            let content = on_state(self.state());
            let content_id = content.build(tree);
            tree.add_child(id, content_id);
        }
        id
    }

    fn event_handlers(&self) -> Option<&EventHandlers> {
        Some(&self.base.handlers)
    }
}

/// Shorthand for a stateful element over a keyed persistent state
pub fn stateful_with_key<S>(key: &str) -> Stateful<S>
where
    S: StateTransitions + Default + Sync,
{
    Stateful::with_shared_state(use_shared_state::<S>(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_state_transitions() {
        use ButtonState::*;
        assert_eq!(Idle.on_event(EventType::PointerEnter), Some(Hovered));
        assert_eq!(Hovered.on_event(EventType::PointerDown), Some(Pressed));
        assert_eq!(Pressed.on_event(EventType::PointerUp), Some(Hovered));
        assert_eq!(Pressed.on_event(EventType::PointerLeave), Some(Idle));
        assert_eq!(Disabled.on_event(EventType::PointerEnter), None);
    }

    #[test]
    fn test_shared_state_persists_by_key() {
        let a = use_shared_state::<ButtonState>("stateful_test_btn");
        a.lock().unwrap().state = ButtonState::Pressed;
        let b = use_shared_state::<ButtonState>("stateful_test_btn");
        assert_eq!(b.lock().unwrap().state, ButtonState::Pressed);
    }

    #[test]
    fn test_on_state_content_built_for_current_state() {
        let stateful = Stateful::new(ButtonState::Hovered).on_state(|state| {
            let label = if state == ButtonState::Hovered {
                "hover"
            } else {
                "idle"
            };
            div().id(label)
        });
        let mut tree = LayoutTree::new();
        stateful.build(&mut tree);
        assert!(tree.node_by_element_id("hover").is_some());
        assert!(tree.node_by_element_id("idle").is_none());
    }

    #[test]
    fn test_step_advances_fsm() {
        let stateful = Stateful::new(ButtonState::Idle);
        Stateful::step(&stateful.shared, EventType::PointerEnter);
        assert_eq!(stateful.state(), ButtonState::Hovered);
        Stateful::step(&stateful.shared, EventType::KeyDown);
        assert_eq!(stateful.state(), ButtonState::Hovered);
    }
}
