//! Event handler storage and dispatch context
//!
//! Elements register callbacks per [`EventType`]; the router resolves a
//! target node, fills an [`EventContext`] (including the node's absolute
//! bounds, which anchored overlays position against), and invokes the
//! callbacks up the ancestor chain.

use std::collections::HashMap;
use std::rc::Rc;

use weft_core::{EventType, Key, Modifiers};

use crate::tree::LayoutNodeId;

/// Callback for handling events
///
/// `Rc`, not `Arc`: dispatch happens on the UI thread only.
pub type EventCallback = Rc<dyn Fn(&EventContext)>;

/// Context passed to event handlers
#[derive(Clone, Debug)]
pub struct EventContext {
    /// The type of event that occurred
    pub event_type: EventType,
    /// The node the event was delivered to
    pub node_id: LayoutNodeId,
    /// Pointer position at event time (absolute)
    pub pointer_x: f32,
    pub pointer_y: f32,
    /// Absolute bounds of the target node at dispatch time
    pub bounds_x: f32,
    pub bounds_y: f32,
    pub bounds_width: f32,
    pub bounds_height: f32,
    /// Key for KeyDown/KeyUp events
    pub key: Option<Key>,
    /// Committed text for TextInput events
    pub text: Option<String>,
    /// Modifier state
    pub modifiers: Modifiers,
    /// For FocusOut: whether focus moved to a descendant of the node the
    /// handler is registered on
    pub focus_moved_inside: bool,
}

impl EventContext {
    pub fn new(event_type: EventType, node_id: LayoutNodeId) -> Self {
        Self {
            event_type,
            node_id,
            pointer_x: 0.0,
            pointer_y: 0.0,
            bounds_x: 0.0,
            bounds_y: 0.0,
            bounds_width: 0.0,
            bounds_height: 0.0,
            key: None,
            text: None,
            modifiers: Modifiers::NONE,
            focus_moved_inside: false,
        }
    }

    pub fn with_pointer(mut self, x: f32, y: f32) -> Self {
        self.pointer_x = x;
        self.pointer_y = y;
        self
    }

    pub fn with_bounds(mut self, rect: crate::tree::Rect) -> Self {
        self.bounds_x = rect.x;
        self.bounds_y = rect.y;
        self.bounds_width = rect.width;
        self.bounds_height = rect.height;
        self
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The target node's bounds as a rect
    pub fn bounds(&self) -> crate::tree::Rect {
        crate::tree::Rect {
            x: self.bounds_x,
            y: self.bounds_y,
            width: self.bounds_width,
            height: self.bounds_height,
        }
    }
}

/// Per-element handler table
#[derive(Clone, Default)]
pub struct EventHandlers {
    handlers: HashMap<EventType, Vec<EventCallback>>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for an event type
    pub fn on(&mut self, event_type: EventType, callback: EventCallback) {
        self.handlers.entry(event_type).or_default().push(callback);
    }

    /// Whether any callback is registered for the event type
    pub fn has(&self, event_type: EventType) -> bool {
        self.handlers
            .get(&event_type)
            .is_some_and(|v| !v.is_empty())
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(Vec::is_empty)
    }

    /// Invoke every callback registered for the context's event type
    pub fn dispatch(&self, ctx: &EventContext) {
        if let Some(callbacks) = self.handlers.get(&ctx.event_type) {
            for callback in callbacks {
                callback(ctx);
            }
        }
    }

    /// Merge another table's callbacks into this one
    pub fn merge(&mut self, other: &EventHandlers) {
        for (event_type, callbacks) in &other.handlers {
            self.handlers
                .entry(*event_type)
                .or_default()
                .extend(callbacks.iter().cloned());
        }
    }
}

impl std::fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<(EventType, usize)> = self
            .handlers
            .iter()
            .map(|(t, v)| (*t, v.len()))
            .collect();
        counts.sort_by_key(|(t, _)| format!("{t:?}"));
        f.debug_struct("EventHandlers").field("counts", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_invokes_registered_callbacks() {
        let hits = Rc::new(Cell::new(0));
        let hits_in = hits.clone();
        let mut handlers = EventHandlers::new();
        handlers.on(
            EventType::Click,
            Rc::new(move |_| hits_in.set(hits_in.get() + 1)),
        );

        let ctx = EventContext::new(EventType::Click, LayoutNodeId::detached());
        handlers.dispatch(&ctx);
        handlers.dispatch(&ctx);
        assert_eq!(hits.get(), 2);

        // Other event types do not fire.
        let ctx = EventContext::new(EventType::KeyDown, LayoutNodeId::detached());
        handlers.dispatch(&ctx);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_merge() {
        let mut a = EventHandlers::new();
        let mut b = EventHandlers::new();
        b.on(EventType::Click, Rc::new(|_| {}));
        assert!(!a.has(EventType::Click));
        a.merge(&b);
        assert!(a.has(EventType::Click));
    }
}
