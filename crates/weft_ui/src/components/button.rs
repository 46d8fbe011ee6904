//! Button component with themed variants
//!
//! A `Stateful<ButtonState>` element styled from theme tokens per
//! interaction state. [`icon_button`] is the square icon-only form of the
//! same machinery.
//!
//! # Example
//!
//! ```ignore
//! cn::button("Save")
//!     .variant(ButtonVariant::Primary)
//!     .on_click(|_| tracing::debug!("saved"))
//!
//! cn::button("Delete").variant(ButtonVariant::Destructive)
//!
//! cn::icon_button(IconName::X).on_click(|_| {})
//! ```

use std::cell::OnceCell;
use std::sync::Arc;

use weft_core::Color;
use weft_theme::{ColorToken, RadiusToken, ThemeState};
use weft_view::prelude::*;
use weft_view::stateful::{use_shared_state, ButtonState, Stateful};
use weft_view::tree::{LayoutNodeId, LayoutTree};

use super::icon::{icon, IconName};

/// Button visual variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Filled with the primary color
    #[default]
    Primary,
    /// Muted background
    Secondary,
    /// Danger styling
    Destructive,
    /// Border only, transparent background
    Outline,
    /// No background, minimal styling
    Ghost,
}

impl ButtonVariant {
    /// Background color for this variant and state
    pub(crate) fn background(&self, theme: &ThemeState, state: ButtonState) -> Color {
        match (self, state) {
            (_, ButtonState::Disabled) => self.base_background(theme).with_alpha(0.5),
            (ButtonVariant::Primary, ButtonState::Pressed) => {
                theme.color(ColorToken::PrimaryActive)
            }
            (ButtonVariant::Secondary, ButtonState::Pressed) => {
                theme.color(ColorToken::SecondaryActive)
            }
            (ButtonVariant::Destructive, ButtonState::Pressed) => {
                theme.color(ColorToken::Error).darken(0.15)
            }
            (ButtonVariant::Outline | ButtonVariant::Ghost, ButtonState::Pressed) => {
                theme.color(ColorToken::TextPrimary).with_alpha(0.1)
            }
            (ButtonVariant::Primary, ButtonState::Hovered) => {
                theme.color(ColorToken::PrimaryHover)
            }
            (ButtonVariant::Secondary, ButtonState::Hovered) => {
                theme.color(ColorToken::SecondaryHover)
            }
            (ButtonVariant::Destructive, ButtonState::Hovered) => {
                theme.color(ColorToken::Error).darken(0.1)
            }
            (ButtonVariant::Outline | ButtonVariant::Ghost, ButtonState::Hovered) => {
                theme.color(ColorToken::TextPrimary).with_alpha(0.05)
            }
            _ => self.base_background(theme),
        }
    }

    fn base_background(&self, theme: &ThemeState) -> Color {
        match self {
            ButtonVariant::Primary => theme.color(ColorToken::Primary),
            ButtonVariant::Secondary => theme.color(ColorToken::Secondary),
            ButtonVariant::Destructive => theme.color(ColorToken::Error),
            ButtonVariant::Outline | ButtonVariant::Ghost => Color::TRANSPARENT,
        }
    }

    fn foreground(&self, theme: &ThemeState) -> Color {
        match self {
            ButtonVariant::Primary | ButtonVariant::Destructive => {
                theme.color(ColorToken::TextInverse)
            }
            ButtonVariant::Secondary | ButtonVariant::Outline | ButtonVariant::Ghost => {
                theme.color(ColorToken::TextPrimary)
            }
        }
    }

    fn border(&self, theme: &ThemeState) -> Option<Color> {
        match self {
            ButtonVariant::Outline => Some(theme.color(ColorToken::Border)),
            _ => None,
        }
    }
}

/// Button size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
    /// Square icon-only button
    Icon,
}

impl ButtonSize {
    fn height(&self) -> f32 {
        match self {
            ButtonSize::Small => 32.0,
            ButtonSize::Medium => 40.0,
            ButtonSize::Large => 44.0,
            ButtonSize::Icon => 40.0,
        }
    }

    fn padding_x(&self) -> f32 {
        match self {
            ButtonSize::Small => 12.0,
            ButtonSize::Medium => 16.0,
            ButtonSize::Large => 24.0,
            ButtonSize::Icon => 8.0,
        }
    }

    fn font_size(&self) -> f32 {
        match self {
            ButtonSize::Small => 13.0,
            ButtonSize::Medium => 14.0,
            ButtonSize::Large => 16.0,
            ButtonSize::Icon => 14.0,
        }
    }
}

/// Where a button's icon sits relative to the label
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IconPosition {
    #[default]
    Start,
    End,
}

#[derive(Clone)]
struct ButtonConfig {
    label: String,
    variant: ButtonVariant,
    size: ButtonSize,
    disabled: bool,
    icon: Option<IconName>,
    icon_position: IconPosition,
    on_click: Option<Arc<dyn Fn(&EventContext) + Send + Sync>>,
}

/// The built button element
pub struct Button {
    inner: Div,
}

impl Button {
    fn from_config(instance_key: &str, config: ButtonConfig) -> Self {
        let theme = ThemeState::get();
        let height = config.size.height();
        let padding_x = config.size.padding_x();
        let font_size = config.size.font_size();
        let radius = theme.radius(RadiusToken::Md);
        let variant = config.variant;
        let disabled = config.disabled;
        let label = config.label.clone();
        let icon_name = config.icon;
        let icon_position = config.icon_position;

        let shared = use_shared_state::<ButtonState>(&format!("{instance_key}_state"));
        if disabled {
            shared.lock().unwrap().state = ButtonState::Disabled;
        }

        let mut stateful = Stateful::with_shared_state(shared)
            .h(height)
            .w_fit()
            .cursor(if disabled {
                CursorStyle::NotAllowed
            } else {
                CursorStyle::Pointer
            })
            .focusable()
            .id(instance_key.to_string())
            .on_state(move |state| {
                let theme = ThemeState::get();
                let state = if disabled { ButtonState::Disabled } else { state };
                let bg = variant.background(&theme, state);
                let fg = variant.foreground(&theme);

                let mut content = div().flex_row().items_center().gap(6.0);
                let label_text = text(&label).size(font_size).color(fg).no_wrap();
                match icon_name {
                    Some(name) => {
                        let glyph = icon(name).size(font_size, font_size).tint(fg);
                        content = match icon_position {
                            IconPosition::Start => content.child(glyph).child(label_text),
                            IconPosition::End => content.child(label_text).child(glyph),
                        };
                    }
                    None => content = content.child(label_text),
                }

                let mut visual = div()
                    .h(height)
                    .px(padding_x)
                    .items_center()
                    .justify_center()
                    .rounded(radius)
                    .bg(bg)
                    .child(content);

                if let Some(border_color) = variant.border(&theme) {
                    visual = visual.border(1.0, border_color);
                }
                if variant != ButtonVariant::Ghost {
                    visual = visual.shadow_sm();
                }
                visual
            });

        if let Some(on_click) = config.on_click {
            stateful = stateful.on_click(move |ctx| {
                if !disabled {
                    on_click(ctx);
                }
            });
        }

        Self {
            inner: div().child(stateful),
        }
    }
}

impl ElementBuilder for Button {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        self.inner.build(tree)
    }
}

/// Builder for buttons
pub struct ButtonBuilder {
    key: InstanceKey,
    config: ButtonConfig,
    built: OnceCell<Button>,
}

/// Create a button with a label
#[track_caller]
pub fn button(label: impl Into<String>) -> ButtonBuilder {
    ButtonBuilder {
        key: InstanceKey::new("button"),
        config: ButtonConfig {
            label: label.into(),
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            disabled: false,
            icon: None,
            icon_position: IconPosition::default(),
            on_click: None,
        },
        built: OnceCell::new(),
    }
}

/// Create a square icon-only button
#[track_caller]
pub fn icon_button(name: IconName) -> ButtonBuilder {
    ButtonBuilder {
        key: InstanceKey::new("icon_button"),
        config: ButtonConfig {
            label: String::new(),
            variant: ButtonVariant::Ghost,
            size: ButtonSize::Icon,
            disabled: false,
            icon: Some(name),
            icon_position: IconPosition::Start,
            on_click: None,
        },
        built: OnceCell::new(),
    }
}

impl ButtonBuilder {
    /// Create with an explicit key
    pub fn with_key(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: InstanceKey::explicit(key),
            config: ButtonConfig {
                label: label.into(),
                variant: ButtonVariant::default(),
                size: ButtonSize::default(),
                disabled: false,
                icon: None,
                icon_position: IconPosition::default(),
                on_click: None,
            },
            built: OnceCell::new(),
        }
    }

    fn get_or_build(&self) -> &Button {
        self.built
            .get_or_init(|| Button::from_config(self.key.get(), self.config.clone()))
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.config.variant = variant;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.config.size = size;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    pub fn icon(mut self, name: IconName) -> Self {
        self.config.icon = Some(name);
        self
    }

    pub fn icon_position(mut self, position: IconPosition) -> Self {
        self.config.icon_position = position;
        self
    }

    pub fn on_click<F>(mut self, on_click: F) -> Self
    where
        F: Fn(&EventContext) + Send + Sync + 'static,
    {
        self.config.on_click = Some(Arc::new(on_click));
        self
    }
}

impl ElementBuilder for ButtonBuilder {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        self.get_or_build().build(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(ButtonSize::Small.height(), 32.0);
        assert_eq!(ButtonSize::Medium.height(), 40.0);
        assert_eq!(ButtonSize::Large.height(), 44.0);
        assert_eq!(ButtonSize::Icon.padding_x(), 8.0);
    }

    #[test]
    fn test_variant_colors() {
        let theme = ThemeState::get();
        assert_eq!(
            ButtonVariant::Primary.background(&theme, ButtonState::Idle),
            theme.color(ColorToken::Primary)
        );
        assert_eq!(
            ButtonVariant::Ghost.base_background(&theme),
            Color::TRANSPARENT
        );
        assert!(ButtonVariant::Outline.border(&theme).is_some());
        assert!(ButtonVariant::Primary.border(&theme).is_none());
    }

    #[test]
    fn test_disabled_background_fades() {
        let theme = ThemeState::get();
        let disabled = ButtonVariant::Primary.background(&theme, ButtonState::Disabled);
        assert!(disabled.a < 1.0);
    }

    #[test]
    fn test_disabled_click_is_swallowed() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use weft_view::EventRouter;

        let clicks = Arc::new(AtomicU32::new(0));
        let clicks_in = clicks.clone();
        let mut tree = LayoutTree::new();
        let root = div()
            .w(300.0)
            .h(100.0)
            .child(
                ButtonBuilder::with_key("btn_disabled", "Nope")
                    .disabled(true)
                    .on_click(move |_| {
                        clicks_in.fetch_add(1, Ordering::SeqCst);
                    }),
            )
            .build(&mut tree);
        tree.set_root(root);
        tree.compute_layout(300.0, 100.0);

        let node = tree.node_by_element_id("btn_disabled").unwrap();
        let rect = tree.rect(node).unwrap();
        let mut router = EventRouter::new();
        router.pointer_up(&tree, rect.x + 2.0, rect.y + 2.0);
        assert_eq!(clicks.load(Ordering::SeqCst), 0);
    }
}
