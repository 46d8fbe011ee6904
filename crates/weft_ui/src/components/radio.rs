//! Radio component and radio group
//!
//! A radio group selects at most one value. Controlled like the other
//! form controls: `selected` comes in, picks go out through `on_select`.
//! Duplicate-value entries are skipped with a warning.
//!
//! # Example
//!
//! ```ignore
//! cn::radio_group()
//!     .item("s", "Small")
//!     .item("m", "Medium")
//!     .selected(Some("m".into()))
//!     .on_select(|value| tracing::debug!(value, "picked"))
//! ```

use std::cell::OnceCell;
use std::sync::Arc;

use weft_core::Key;
use weft_theme::{ColorToken, RadiusToken, SpacingToken, ThemeState};
use weft_view::prelude::*;
use weft_view::stateful::{use_shared_state, ButtonState, Stateful};
use weft_view::tree::{LayoutNodeId, LayoutTree};

#[derive(Clone)]
struct RadioConfig {
    label: String,
    selected: bool,
    disabled: bool,
    on_select: Option<Arc<dyn Fn() + Send + Sync>>,
}

/// The built radio element
pub struct Radio {
    inner: Div,
}

impl Radio {
    fn from_config(instance_key: &str, config: RadioConfig) -> Self {
        let theme = ThemeState::get();
        let primary = theme.color(ColorToken::Primary);
        let border = theme.color(ColorToken::Border);
        let border_hover = theme.color(ColorToken::BorderHover);
        let surface = theme.color(ColorToken::InputBg);
        let text_color = theme.color(ColorToken::TextPrimary);
        let full = theme.radius(RadiusToken::Full);

        let selected = config.selected;
        let disabled = config.disabled;
        let label = config.label.clone();
        let on_select = config.on_select.clone();
        let on_select_for_keys = config.on_select.clone();

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
                let ring = if selected {
                    primary
                } else if state == ButtonState::Hovered && !disabled {
                    border_hover
                } else {
                    border
                };
                let mut dot = div()
                    .w(16.0)
                    .h(16.0)
                    .items_center()
                    .justify_center()
                    .rounded(full)
                    .bg(surface)
                    .border(if selected { 2.0 } else { 1.0 }, ring)
                    .flex_shrink_0();
                if selected {
                    dot = dot.child(div().w(8.0).h(8.0).rounded(full).bg(primary));
                }

                let mut row = div()
                    .flex_row()
                    .items_center()
                    .gap(8.0)
                    .child(dot)
                    .child(text(&label).size(14.0).color(text_color));
                if disabled {
                    row = row.opacity(0.5);
                }
                row
            });

        if !disabled {
            if let Some(on_select) = on_select {
                control = control.on_click(move |_ctx| on_select());
            }
            if let Some(on_select) = on_select_for_keys {
                control = control.on_key_down(move |ctx| {
                    if matches!(ctx.key, Some(Key::Space)) {
                        on_select();
                    }
                });
            }
        }

        Self {
            inner: div().child(control),
        }
    }
}

impl ElementBuilder for Radio {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        self.inner.build(tree)
    }
}

/// Builder for a single radio control
pub struct RadioBuilder {
    key: InstanceKey,
    config: RadioConfig,
    built: OnceCell<Radio>,
}

/// Create a radio with a label
#[track_caller]
pub fn radio(label: impl Into<String>) -> RadioBuilder {
    RadioBuilder {
        key: InstanceKey::new("radio"),
        config: RadioConfig {
            label: label.into(),
            selected: false,
            disabled: false,
            on_select: None,
        },
        built: OnceCell::new(),
    }
}

impl RadioBuilder {
    /// Create with an explicit key
    pub fn with_key(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: InstanceKey::explicit(key),
            config: RadioConfig {
                label: label.into(),
                selected: false,
                disabled: false,
                on_select: None,
            },
            built: OnceCell::new(),
        }
    }

    fn get_or_build(&self) -> &Radio {
        self.built
            .get_or_init(|| Radio::from_config(self.key.get(), self.config.clone()))
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.config.selected = selected;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    pub fn on_select<F>(mut self, on_select: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.config.on_select = Some(Arc::new(on_select));
        self
    }
}

impl ElementBuilder for RadioBuilder {
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
    disabled: bool,
}

/// Builder for vertical radio groups
pub struct RadioGroupBuilder {
    key: InstanceKey,
    items: Vec<GroupItem>,
    selected: Option<String>,
    on_select: Option<Arc<dyn Fn(&str) + Send + Sync>>,
}

/// Create a radio group
#[track_caller]
pub fn radio_group() -> RadioGroupBuilder {
    RadioGroupBuilder {
        key: InstanceKey::new("radio_group"),
        items: Vec::new(),
        selected: None,
        on_select: None,
    }
}

impl RadioGroupBuilder {
    /// Create with an explicit key
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: InstanceKey::explicit(key),
            items: Vec::new(),
            selected: None,
            on_select: None,
        }
    }

    pub fn item(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.items.push(GroupItem {
            value: value.into(),
            label: label.into(),
            disabled: false,
        });
        self
    }

    pub fn item_disabled(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.items.push(GroupItem {
            value: value.into(),
            label: label.into(),
            disabled: true,
        });
        self
    }

    /// The currently selected value
    pub fn selected(mut self, selected: Option<String>) -> Self {
        self.selected = selected;
        self
    }

    pub fn on_select<F>(mut self, on_select: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_select = Some(Arc::new(on_select));
        self
    }

    fn valid_items(&self) -> Vec<&GroupItem> {
        let mut seen = std::collections::HashSet::new();
        let mut valid = Vec::new();
        for item in &self.items {
            if seen.insert(item.value.as_str()) {
                valid.push(item);
            } else {
                tracing::warn!(value = %item.value, "duplicate radio group value, skipping");
            }
        }
        valid
    }
}

impl ElementBuilder for RadioGroupBuilder {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        let theme = ThemeState::get();
        let gap = theme.spacing_value(SpacingToken::Space2);
        let group = div().flex_col().gap(gap).build(tree);

        for item in self.valid_items() {
            let mut builder = RadioBuilder::with_key(
                format!("{}_{}", self.key.get(), item.value),
                &item.label,
            )
            .selected(self.selected.as_deref() == Some(item.value.as_str()))
            .disabled(item.disabled);
            if let Some(ref on_select) = self.on_select {
                let on_select = Arc::clone(on_select);
                let value = item.value.clone();
                builder = builder.on_select(move || on_select(&value));
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
        let group = RadioGroupBuilder::with_key("rg_dup")
            .item("s", "Small")
            .item("m", "Medium")
            .item("s", "Duplicate small");
        assert_eq!(group.valid_items().len(), 2);
    }

    #[test]
    fn test_click_reports_item_value() {
        use std::sync::Mutex;
        use weft_view::EventRouter;

        let picked: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = picked.clone();
        let mut tree = LayoutTree::new();
        let root = div()
            .w(200.0)
            .h(200.0)
            .child(
                RadioGroupBuilder::with_key("rg_click")
                    .item("s", "Small")
                    .item("m", "Medium")
                    .on_select(move |value| sink.lock().unwrap().push(value.to_string())),
            )
            .build(&mut tree);
        tree.set_root(root);
        tree.compute_layout(200.0, 200.0);

        let medium = tree.node_by_element_id("rg_click_m").unwrap();
        let rect = tree.rect(medium).unwrap();
        let mut router = EventRouter::new();
        router.pointer_up(&tree, rect.x + 2.0, rect.y + 2.0);
        assert_eq!(picked.lock().unwrap().as_slice(), &["m".to_string()]);
    }
}
