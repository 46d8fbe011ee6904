//! Chip component - removable pill
//!
//! A small pill for a selected entity, with an optional remove control.
//! The remove control activates by click or by Delete/Backspace while it
//! holds logical focus; Select renders one chip per selected option in
//! multiple mode.
//!
//! # Example
//!
//! ```ignore
//! cn::chip("Banana")
//!     .on_remove(|| tracing::debug!("removed"))
//! ```

use std::cell::OnceCell;
use std::sync::Arc;

use weft_core::Key;
use weft_theme::{ColorToken, RadiusToken, ThemeState};
use weft_view::prelude::*;
use weft_view::stateful::{use_shared_state, ButtonState, Stateful};
use weft_view::tree::{LayoutNodeId, LayoutTree};

use super::icon::{to_svg, glyphs};

/// Chip visual variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChipVariant {
    /// Muted pill on an elevated surface
    #[default]
    Neutral,
    /// Accent-tinted pill
    Accent,
}

#[derive(Clone)]
struct ChipConfig {
    label: String,
    variant: ChipVariant,
    disabled: bool,
    /// Logical focus marker for the remove control
    focused: bool,
    on_remove: Option<Arc<dyn Fn() + Send + Sync>>,
}

/// The built chip element
pub struct Chip {
    inner: Div,
}

impl Chip {
    fn from_config(instance_key: &str, config: ChipConfig) -> Self {
        let theme = ThemeState::get();
        let radius = theme.radius(RadiusToken::Full);
        let (bg, fg) = match config.variant {
            ChipVariant::Neutral => (
                theme.color(ColorToken::SurfaceElevated),
                theme.color(ColorToken::TextPrimary),
            ),
            ChipVariant::Accent => (
                theme.color(ColorToken::AccentSubtle),
                theme.color(ColorToken::Accent),
            ),
        };
        let remove_hover_bg = theme.color(ColorToken::TextPrimary).with_alpha(0.1);
        let focus_ring = theme.color(ColorToken::BorderFocus);

        let mut pill = div()
            .flex_row()
            .items_center()
            .gap(4.0)
            .h(24.0)
            .px(8.0)
            .bg(bg)
            .rounded(radius)
            .child(text(&config.label).size(12.0).color(fg));

        if config.disabled {
            pill = pill.opacity(0.5);
        }

        if let Some(on_remove) = config.on_remove.clone() {
            let remove_key = format!("{instance_key}_remove");
            let remove_state = use_shared_state::<ButtonState>(&remove_key);
            let disabled = config.disabled;
            let focused = config.focused;
            let on_remove_for_key = Arc::clone(&on_remove);

            let remove_control = Stateful::with_shared_state(remove_state)
                .cursor_pointer()
                .focusable()
                .id(format!("{instance_key}_remove"))
                .on_state(move |state| {
                    let hover_bg = if state == ButtonState::Hovered && !disabled {
                        remove_hover_bg
                    } else {
                        weft_core::Color::TRANSPARENT
                    };
                    let mut control = div()
                        .items_center()
                        .justify_center()
                        .w(16.0)
                        .h(16.0)
                        .rounded(radius)
                        .bg(hover_bg)
                        .child(svg(to_svg(glyphs::X)).size(10.0, 10.0).tint(fg));
                    if focused {
                        control = control.border(1.0, focus_ring);
                    }
                    control
                })
                .on_click(move |_ctx| {
                    if !disabled {
                        on_remove();
                    }
                })
                .on_key_down(move |ctx| {
                    if !disabled && matches!(ctx.key, Some(Key::Delete | Key::Backspace)) {
                        on_remove_for_key();
                    }
                });

            pill = pill.child(remove_control);
        }

        Self { inner: pill }
    }
}

impl ElementBuilder for Chip {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        self.inner.build(tree)
    }
}

/// Builder for chips
pub struct ChipBuilder {
    key: InstanceKey,
    config: ChipConfig,
    built: OnceCell<Chip>,
}

/// Create a chip with a label
#[track_caller]
pub fn chip(label: impl Into<String>) -> ChipBuilder {
    ChipBuilder {
        key: InstanceKey::new("chip"),
        config: ChipConfig {
            label: label.into(),
            variant: ChipVariant::default(),
            disabled: false,
            focused: false,
            on_remove: None,
        },
        built: OnceCell::new(),
    }
}

impl ChipBuilder {
    /// Create a chip with an explicit key (stable inside loops)
    pub fn with_key(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: InstanceKey::explicit(key),
            config: ChipConfig {
                label: label.into(),
                variant: ChipVariant::default(),
                disabled: false,
                focused: false,
                on_remove: None,
            },
            built: OnceCell::new(),
        }
    }

    fn get_or_build(&self) -> &Chip {
        self.built
            .get_or_init(|| Chip::from_config(self.key.get(), self.config.clone()))
    }

    pub fn variant(mut self, variant: ChipVariant) -> Self {
        self.config.variant = variant;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    /// Mark the remove control as logically focused
    pub fn focused(mut self, focused: bool) -> Self {
        self.config.focused = focused;
        self
    }

    /// Make the chip removable with the given callback
    pub fn on_remove<F>(mut self, on_remove: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.config.on_remove = Some(Arc::new(on_remove));
        self
    }
}

impl ElementBuilder for ChipBuilder {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        self.get_or_build().build(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::Modifiers;
    use weft_view::EventRouter;

    fn build_chip(builder: ChipBuilder) -> (LayoutTree, LayoutNodeId) {
        let mut tree = LayoutTree::new();
        let root = div().w(300.0).h(100.0).child(builder).build(&mut tree);
        tree.set_root(root);
        tree.compute_layout(300.0, 100.0);
        (tree, root)
    }

    #[test]
    fn test_remove_control_only_when_removable() {
        let (tree, _) = build_chip(ChipBuilder::with_key("chip_plain", "A"));
        assert!(tree.node_by_element_id("chip_plain_remove").is_none());

        let (tree, _) = build_chip(ChipBuilder::with_key("chip_rm", "A").on_remove(|| {}));
        assert!(tree.node_by_element_id("chip_rm_remove").is_some());
    }

    #[test]
    fn test_delete_key_on_focused_remove_control_fires_callback() {
        use std::sync::atomic::{AtomicU32, Ordering};
        let removed = Arc::new(AtomicU32::new(0));
        let removed_in = removed.clone();

        let (tree, _) = build_chip(
            ChipBuilder::with_key("chip_del", "A")
                .on_remove(move || {
                    removed_in.fetch_add(1, Ordering::SeqCst);
                }),
        );
        let control = tree.node_by_element_id("chip_del_remove").unwrap();

        let mut router = EventRouter::new();
        router.set_focus(&tree, Some(control));
        router.key_down(&tree, Key::Delete, Modifiers::NONE);
        router.key_down(&tree, Key::Backspace, Modifiers::NONE);
        // Unrelated keys are ignored.
        router.key_down(&tree, Key::Enter, Modifiers::NONE);
        assert_eq!(removed.load(Ordering::SeqCst), 2);
    }
}
