//! Tooltip component - hover/focus hint anchored to its target
//!
//! Wraps a target element; pointer-enter or focus shows an anchored
//! overlay, pointer-leave or focus-out hides it. Placement reuses the
//! dropdown flip rule, so a tooltip near the bottom edge opens above its
//! target.
//!
//! # Example
//!
//! ```ignore
//! cn::tooltip(cn::button("Delete"), "This cannot be undone")
//! ```

use weft_core::{ContextState, State};
use weft_theme::{ColorToken, RadiusToken, ThemeState};
use weft_view::overlay::{overlay_manager, OverlayBuilder, OverlayHandle};
use weft_view::prelude::*;
use weft_view::tree::{LayoutNodeId, LayoutTree};

fn hide(handle_state: &State<Option<u64>>) {
    if let Some(raw) = handle_state.get() {
        overlay_manager()
            .lock()
            .unwrap()
            .close(OverlayHandle::from_raw(raw));
        handle_state.set(None);
    }
}

/// Builder for tooltips
pub struct TooltipBuilder {
    key: InstanceKey,
    content: String,
    target: Div,
}

/// Wrap a target element with a tooltip
#[track_caller]
pub fn tooltip(target: impl ElementBuilder + 'static, content: impl Into<String>) -> TooltipBuilder {
    TooltipBuilder {
        key: InstanceKey::new("tooltip"),
        content: content.into(),
        target: div().child(target),
    }
}

impl TooltipBuilder {
    /// Create with an explicit key
    pub fn with_key(
        key: impl Into<String>,
        target: impl ElementBuilder + 'static,
        content: impl Into<String>,
    ) -> Self {
        Self {
            key: InstanceKey::explicit(key),
            content: content.into(),
            target: div().child(target),
        }
    }
}

impl ElementBuilder for TooltipBuilder {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        let handle_state: State<Option<u64>> = ContextState::get()
            .use_state_keyed(&self.key.derive("handle"), || None);

        let content = self.content.clone();
        let handle_for_show = handle_state.clone();
        let show = move |ctx: &EventContext| {
            if handle_for_show.get().is_some() {
                return;
            }
            let theme = ThemeState::get();
            let bg = theme.color(ColorToken::SurfaceOverlay);
            let fg = theme.color(ColorToken::TextPrimary);
            let radius = theme.radius(RadiusToken::Sm);
            let content = content.clone();
            let handle = OverlayBuilder::tooltip()
                .anchored(ctx.bounds(), 6.0, true)
                .content(move || {
                    div()
                        .px(8.0)
                        .py(4.0)
                        .bg(bg)
                        .rounded(radius)
                        .shadow_md()
                        .child(text(&content).size(12.0).color(fg).no_wrap())
                })
                .show();
            handle_for_show.set(Some(handle.id()));
        };

        let handle_for_leave = handle_state.clone();
        let handle_for_focus_out = handle_state.clone();
        let show_for_focus = show.clone();

        let wrapper = div()
            .id(self.key.derive("target"))
            .focusable()
            .on_pointer_enter(show.clone())
            .on_pointer_leave(move |_ctx| hide(&handle_for_leave))
            .on_focus_in(move |ctx| show_for_focus(ctx))
            .on_focus_out(move |_ctx| hide(&handle_for_focus_out));

        let id = wrapper.build(tree);
        let target_id = self.target.build(tree);
        tree.add_child(id, target_id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_view::EventRouter;

    #[test]
    fn test_hover_shows_and_leave_hides() {
        let mut tree = LayoutTree::new();
        let root = div()
            .w(400.0)
            .h(300.0)
            .child(TooltipBuilder::with_key(
                "tip_hover",
                div().w(80.0).h(24.0),
                "hint",
            ))
            .build(&mut tree);
        tree.set_root(root);
        tree.compute_layout(400.0, 300.0);

        let handle_state: State<Option<u64>> =
            ContextState::get().use_state_keyed("tip_hover_handle", || None);
        assert_eq!(handle_state.get(), None);

        let mut router = EventRouter::new();
        router.pointer_move(&tree, 10.0, 10.0);
        let raw = handle_state.get().expect("tooltip should be open");
        assert!(overlay_manager()
            .lock()
            .unwrap()
            .is_open(OverlayHandle::from_raw(raw)));

        router.pointer_move(&tree, 399.0, 299.0);
        assert_eq!(handle_state.get(), None);
        assert!(!overlay_manager()
            .lock()
            .unwrap()
            .is_open(OverlayHandle::from_raw(raw)));
    }
}
