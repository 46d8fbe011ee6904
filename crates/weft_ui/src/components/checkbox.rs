//! Checkbox component and checkbox group
//!
//! Controlled: `checked` comes in as a prop and toggles are reported
//! through `on_change`. Group entries with duplicate values are skipped
//! with a warning rather than rejected.
//!
//! # Example
//!
//! ```ignore
//! cn::checkbox("Email me updates")
//!     .checked(subscribed)
//!     .on_change(|next| tracing::debug!(next, "toggled"))
//!
//! cn::checkbox_group()
//!     .item("a", "Option A", true)
//!     .item("b", "Option B", false)
//!     .on_toggle(|value, next| tracing::debug!(value, next, "toggled"))
//! ```

use std::cell::OnceCell;
use std::sync::Arc;

use weft_core::Key;
use weft_theme::{ColorToken, RadiusToken, SpacingToken, ThemeState};
use weft_view::prelude::*;
use weft_view::stateful::{use_shared_state, ButtonState, Stateful};
use weft_view::tree::{LayoutNodeId, LayoutTree};

use super::icon::{glyphs, to_svg};

#[derive(Clone)]
struct CheckboxConfig {
    label: String,
    checked: bool,
    disabled: bool,
    on_change: Option<Arc<dyn Fn(bool) + Send + Sync>>,
}

/// The built checkbox element
pub struct Checkbox {
    inner: Div,
}

impl Checkbox {
    fn from_config(instance_key: &str, config: CheckboxConfig) -> Self {
        let theme = ThemeState::get();
        let radius = theme.radius(RadiusToken::Sm);
        let primary = theme.color(ColorToken::Primary);
        let border = theme.color(ColorToken::Border);
        let border_hover = theme.color(ColorToken::BorderHover);
        let surface = theme.color(ColorToken::InputBg);
        let text_color = theme.color(ColorToken::TextPrimary);
        let check_color = theme.color(ColorToken::TextInverse);

        let checked = config.checked;
        let disabled = config.disabled;
        let label = config.label.clone();
        let on_change = config.on_change.clone();
        let on_change_for_keys = config.on_change.clone();

        let shared = use_shared_state::<ButtonState>(&format!("{instance_key}_state"));

        let mut control = Stateful::with_shared_state(shared)
            .cursor(if disabled {
                CursorStyle::NotAllowed
            } else {
                CursorStyle::Pointer
            })
            .focusable()
            .id(instance_key.to_string())
            .on_state(move |state| {
                let box_border = if state == ButtonState::Hovered && !disabled {
                    border_hover
                } else {
                    border
                };
                let mut check_box = div()
                    .w(16.0)
                    .h(16.0)
                    .items_center()
                    .justify_center()
                    .rounded(radius)
                    .flex_shrink_0();
                check_box = if checked {
                    check_box
                        .bg(primary)
                        .child(svg(to_svg(glyphs::CHECK)).size(12.0, 12.0).tint(check_color))
                } else {
                    check_box.bg(surface).border(1.0, box_border)
                };

                let mut row = div()
                    .flex_row()
                    .items_center()
                    .gap(8.0)
                    .child(check_box)
                    .child(text(&label).size(14.0).color(text_color));
                if disabled {
                    row = row.opacity(0.5);
                }
                row
            });

        if !disabled {
            if let Some(on_change) = on_change {
                control = control.on_click(move |_ctx| on_change(!checked));
            }
            if let Some(on_change) = on_change_for_keys {
                control = control.on_key_down(move |ctx| {
                    if matches!(ctx.key, Some(Key::Space)) {
                        on_change(!checked);
                    }
                });
            }
        }

        Self {
            inner: div().child(control),
        }
    }
}

impl ElementBuilder for Checkbox {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        self.inner.build(tree)
    }
}

/// Builder for checkboxes
pub struct CheckboxBuilder {
    key: InstanceKey,
    config: CheckboxConfig,
    built: OnceCell<Checkbox>,
}

/// Create a checkbox with a label
#[track_caller]
pub fn checkbox(label: impl Into<String>) -> CheckboxBuilder {
    CheckboxBuilder {
        key: InstanceKey::new("checkbox"),
        config: CheckboxConfig {
            label: label.into(),
            checked: false,
            disabled: false,
            on_change: None,
        },
        built: OnceCell::new(),
    }
}

impl CheckboxBuilder {
    /// Create with an explicit key
    pub fn with_key(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: InstanceKey::explicit(key),
            config: CheckboxConfig {
                label: label.into(),
                checked: false,
                disabled: false,
                on_change: None,
            },
            built: OnceCell::new(),
        }
    }

    fn get_or_build(&self) -> &Checkbox {
        self.built
            .get_or_init(|| Checkbox::from_config(self.key.get(), self.config.clone()))
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.config.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.config.on_change = Some(Arc::new(on_change));
        self
    }
}

impl ElementBuilder for CheckboxBuilder {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        self.get_or_build().build(tree)
    }
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct GroupItem {
    value: String,
    label: String,
    checked: bool,
    disabled: bool,
}

/// Builder for vertical checkbox groups
pub struct CheckboxGroupBuilder {
    key: InstanceKey,
    items: Vec<GroupItem>,
    on_toggle: Option<Arc<dyn Fn(&str, bool) + Send + Sync>>,
}

/// Create a checkbox group
#[track_caller]
pub fn checkbox_group() -> CheckboxGroupBuilder {
    CheckboxGroupBuilder {
        key: InstanceKey::new("checkbox_group"),
        items: Vec::new(),
        on_toggle: None,
    }
}

impl CheckboxGroupBuilder {
    /// Create with an explicit key
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: InstanceKey::explicit(key),
            items: Vec::new(),
            on_toggle: None,
        }
    }

    pub fn item(
        mut self,
        value: impl Into<String>,
        label: impl Into<String>,
        checked: bool,
    ) -> Self {
        self.items.push(GroupItem {
            value: value.into(),
            label: label.into(),
            checked,
            disabled: false,
        });
        self
    }

    pub fn item_disabled(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.items.push(GroupItem {
            value: value.into(),
            label: label.into(),
            checked: false,
            disabled: true,
        });
        self
    }

    pub fn on_toggle<F>(mut self, on_toggle: F) -> Self
    where
        F: Fn(&str, bool) + Send + Sync + 'static,
    {
        self.on_toggle = Some(Arc::new(on_toggle));
        self
    }

    /// Entries surviving the duplicate check, in order
    fn valid_items(&self) -> Vec<&GroupItem> {
        let mut seen = std::collections::HashSet::new();
        let mut valid = Vec::new();
        for item in &self.items {
            if seen.insert(item.value.as_str()) {
                valid.push(item);
            } else {
                tracing::warn!(value = %item.value, "duplicate checkbox group value, skipping");
            }
        }
        valid
    }
}

impl ElementBuilder for CheckboxGroupBuilder {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        let theme = ThemeState::get();
        let gap = theme.spacing_value(SpacingToken::Space2);
        let group = div().flex_col().gap(gap).build(tree);

        for item in self.valid_items() {
            let mut builder = CheckboxBuilder::with_key(
                format!("{}_{}", self.key.get(), item.value),
                &item.label,
            )
            .checked(item.checked)
            .disabled(item.disabled);
            if let Some(ref on_toggle) = self.on_toggle {
                let on_toggle = Arc::clone(on_toggle);
                let value = item.value.clone();
                builder = builder.on_change(move |next| on_toggle(&value, next));
            }
            let child = builder.build(tree);
            tree.add_child(group, child);
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_values_are_skipped() {
        let group = CheckboxGroupBuilder::with_key("cbg_dup")
            .item("a", "First", false)
            .item("b", "Second", false)
            .item("a", "Duplicate of first", true);
        assert_eq!(group.valid_items().len(), 2);

        let mut tree = LayoutTree::new();
        let id = group.build(&mut tree);
        assert_eq!(tree.children(id).len(), 2);
    }

    #[test]
    fn test_space_toggles_focused_checkbox() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use weft_core::Modifiers;
        use weft_view::EventRouter;

        let toggled_to = Arc::new(AtomicBool::new(false));
        let sink = toggled_to.clone();
        let mut tree = LayoutTree::new();
        let root = div()
            .w(200.0)
            .h(60.0)
            .child(
                CheckboxBuilder::with_key("cb_space", "Updates")
                    .checked(false)
                    .on_change(move |next| sink.store(next, Ordering::SeqCst)),
            )
            .build(&mut tree);
        tree.set_root(root);
        tree.compute_layout(200.0, 60.0);

        let control = tree.node_by_element_id("cb_space").unwrap();
        let mut router = EventRouter::new();
        router.set_focus(&tree, Some(control));
        router.key_down(&tree, Key::Space, Modifiers::NONE);
        assert!(toggled_to.load(Ordering::SeqCst));
    }
}
