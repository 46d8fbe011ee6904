//! Event routing over a laid-out tree
//!
//! The host shell feeds pointer and keyboard input here; the router
//! hit-tests, maintains hover and focus, and dispatches contexts to the
//! handlers stored in the tree. Handlers fire from the target node up its
//! ancestor chain (bubble order), each with its own node's bounds so
//! anchored overlays can position against the handling element.

use weft_core::{EventType, Key, Modifiers};

use crate::events::EventContext;
use crate::tree::{LayoutNodeId, LayoutTree};

/// Routes input events and owns hover/focus state
pub struct EventRouter {
    focused: Option<LayoutNodeId>,
    hovered: Option<LayoutNodeId>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self {
            focused: None,
            hovered: None,
        }
    }

    /// The node that currently holds focus
    pub fn focused(&self) -> Option<LayoutNodeId> {
        self.focused
    }

    /// Dispatch an event type to a node and its ancestors
    fn bubble(&self, tree: &LayoutTree, target: LayoutNodeId, make: impl Fn(LayoutNodeId) -> EventContext) {
        let mut current = Some(target);
        while let Some(node) = current {
            if let Some(handlers) = tree.handlers(node) {
                let mut ctx = make(node);
                if let Some(rect) = tree.rect(node) {
                    ctx = ctx.with_bounds(rect);
                }
                handlers.dispatch(&ctx);
            }
            current = tree.parent(node);
        }
    }

    /// Dispatch to a single node, no bubbling
    fn deliver(&self, tree: &LayoutTree, node: LayoutNodeId, ctx: EventContext) {
        if let Some(handlers) = tree.handlers(node) {
            let mut ctx = ctx;
            if let Some(rect) = tree.rect(node) {
                ctx = ctx.with_bounds(rect);
            }
            handlers.dispatch(&ctx);
        }
    }

    /// Move focus, firing FocusOut/FocusIn
    ///
    /// The FocusOut context records whether the destination is a descendant
    /// of the node losing focus, which composite widgets use to tell an
    /// internal focus hop from focus actually leaving them.
    pub fn set_focus(&mut self, tree: &LayoutTree, next: Option<LayoutNodeId>) {
        if self.focused == next {
            return;
        }
        if let Some(old) = self.focused {
            let moved_inside = next.is_some_and(|n| tree.is_descendant(n, old));
            let mut ctx = EventContext::new(EventType::FocusOut, old);
            ctx.focus_moved_inside = moved_inside;
            self.deliver(tree, old, ctx);
        }
        if let Some(new) = next {
            self.deliver(tree, new, EventContext::new(EventType::FocusIn, new));
        }
        self.focused = next;
    }

    /// Nearest focusable ancestor of a node (inclusive)
    fn focus_target(&self, tree: &LayoutTree, node: LayoutNodeId) -> Option<LayoutNodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if tree.props(id).is_some_and(|p| p.focusable) {
                return Some(id);
            }
            current = tree.parent(id);
        }
        None
    }

    /// Pointer motion: updates hover, firing enter/leave pairs
    pub fn pointer_move(&mut self, tree: &LayoutTree, x: f32, y: f32) {
        let hit = tree.hit_test(x, y);
        if hit == self.hovered {
            return;
        }
        if let Some(old) = self.hovered {
            // Leave fires on nodes no longer under the pointer
            let mut current = Some(old);
            while let Some(node) = current {
                let still_hovered = hit.is_some_and(|h| tree.is_descendant(h, node));
                if !still_hovered {
                    self.deliver(
                        tree,
                        node,
                        EventContext::new(EventType::PointerLeave, node).with_pointer(x, y),
                    );
                }
                current = tree.parent(node);
            }
        }
        if let Some(new) = hit {
            let previously = self.hovered;
            let mut current = Some(new);
            while let Some(node) = current {
                let was_hovered = previously.is_some_and(|p| tree.is_descendant(p, node));
                if !was_hovered {
                    self.deliver(
                        tree,
                        node,
                        EventContext::new(EventType::PointerEnter, node).with_pointer(x, y),
                    );
                }
                current = tree.parent(node);
            }
        }
        self.hovered = hit;
    }

    /// Pointer press: PointerDown up the chain, then focus placement
    ///
    /// Returns the hit node, if any, so the shell can consult overlay
    /// dismissal.
    pub fn pointer_down(&mut self, tree: &LayoutTree, x: f32, y: f32) -> Option<LayoutNodeId> {
        let hit = tree.hit_test(x, y);
        if let Some(target) = hit {
            self.bubble(tree, target, |node| {
                EventContext::new(EventType::PointerDown, node).with_pointer(x, y)
            });
            let focus = self.focus_target(tree, target);
            self.set_focus(tree, focus);
        } else {
            self.set_focus(tree, None);
        }
        hit
    }

    /// Pointer release: PointerUp then Click up the chain
    pub fn pointer_up(&mut self, tree: &LayoutTree, x: f32, y: f32) {
        if let Some(target) = tree.hit_test(x, y) {
            self.bubble(tree, target, |node| {
                EventContext::new(EventType::PointerUp, node).with_pointer(x, y)
            });
            self.bubble(tree, target, |node| {
                EventContext::new(EventType::Click, node).with_pointer(x, y)
            });
        }
    }

    /// Keyboard press delivered to the focused chain
    pub fn key_down(&mut self, tree: &LayoutTree, key: Key, modifiers: Modifiers) {
        if let Some(focused) = self.focused {
            self.bubble(tree, focused, |node| {
                EventContext::new(EventType::KeyDown, node)
                    .with_key(key)
                    .with_modifiers(modifiers)
            });
        }
    }

    /// Committed text delivered to the focused chain
    pub fn text_input(&mut self, tree: &LayoutTree, committed: &str) {
        if let Some(focused) = self.focused {
            let committed = committed.to_string();
            self.bubble(tree, focused, move |node| {
                EventContext::new(EventType::TextInput, node).with_text(committed.clone())
            });
        }
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::div::{div, ElementBuilder};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sized(width: f32, height: f32) -> crate::div::Div {
        div().w(width).h(height)
    }

    #[test]
    fn test_click_bubbles_to_ancestors() {
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let inner_log = log.clone();
        let outer_log = log.clone();

        let mut tree = LayoutTree::new();
        let root = sized(100.0, 100.0)
            .on_click(move |_| outer_log.borrow_mut().push("outer"))
            .child(
                sized(40.0, 40.0).on_click(move |_| inner_log.borrow_mut().push("inner")),
            )
            .build(&mut tree);
        tree.set_root(root);
        tree.compute_layout(100.0, 100.0);

        let mut router = EventRouter::new();
        router.pointer_up(&tree, 10.0, 10.0);
        assert_eq!(log.borrow().as_slice(), &["inner", "outer"]);
    }

    #[test]
    fn test_focus_out_records_descendant_moves() {
        let inside_moves: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
        let moves = inside_moves.clone();

        let mut tree = LayoutTree::new();
        let root = sized(100.0, 100.0)
            .focusable()
            .on_focus_out(move |ctx| moves.borrow_mut().push(ctx.focus_moved_inside))
            .child(sized(40.0, 40.0).focusable())
            .child(sized(40.0, 40.0))
            .build(&mut tree);
        tree.set_root(root);
        tree.compute_layout(100.0, 100.0);
        let child = tree.children(root)[0];

        let mut router = EventRouter::new();
        router.set_focus(&tree, Some(root));
        // Hop into a descendant: focus_moved_inside = true
        router.set_focus(&tree, Some(child));
        // Leave entirely: focus_moved_inside = false
        router.set_focus(&tree, None);
        assert_eq!(inside_moves.borrow().as_slice(), &[true, false]);
    }

    #[test]
    fn test_pointer_down_focuses_nearest_focusable() {
        let mut tree = LayoutTree::new();
        let root = sized(100.0, 100.0)
            .focusable()
            .child(sized(40.0, 40.0))
            .build(&mut tree);
        tree.set_root(root);
        tree.compute_layout(100.0, 100.0);

        let mut router = EventRouter::new();
        router.pointer_down(&tree, 10.0, 10.0);
        assert_eq!(router.focused(), Some(root));

        // Outside click clears focus.
        router.pointer_down(&tree, 500.0, 500.0);
        assert_eq!(router.focused(), None);
    }

    #[test]
    fn test_key_down_reaches_focused_node() {
        let keys: Rc<RefCell<Vec<Key>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = keys.clone();

        let mut tree = LayoutTree::new();
        let root = sized(50.0, 50.0)
            .focusable()
            .on_key_down(move |ctx| {
                if let Some(key) = ctx.key {
                    sink.borrow_mut().push(key);
                }
            })
            .build(&mut tree);
        tree.set_root(root);
        tree.compute_layout(50.0, 50.0);

        let mut router = EventRouter::new();
        router.key_down(&tree, Key::ArrowDown, Modifiers::NONE);
        assert!(keys.borrow().is_empty());

        router.set_focus(&tree, Some(root));
        router.key_down(&tree, Key::ArrowDown, Modifiers::NONE);
        assert_eq!(keys.borrow().as_slice(), &[Key::ArrowDown]);
    }
}
