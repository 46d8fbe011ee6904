//! Link component - anchor-style text that opens its URL
//!
//! Clicking hands the URL to the system opener; failures degrade to a
//! warning, never a fault.

use std::cell::OnceCell;

use weft_theme::{ColorToken, ThemeState};
use weft_view::prelude::*;
use weft_view::stateful::{use_shared_state, ButtonState, Stateful};
use weft_view::tree::{LayoutNodeId, LayoutTree};

use super::icon::{glyphs, to_svg};

#[derive(Clone)]
struct LinkConfig {
    label: String,
    href: String,
    external_icon: bool,
}

/// The built link element
pub struct Link {
    inner: Div,
}

impl Link {
    fn from_config(instance_key: &str, config: LinkConfig) -> Self {
        let theme = ThemeState::get();
        let link_color = theme.color(ColorToken::TextLink);
        let label = config.label.clone();
        let external_icon = config.external_icon;
        let href = config.href.clone();

        let shared = use_shared_state::<ButtonState>(&format!("{instance_key}_state"));
        let anchor = Stateful::with_shared_state(shared)
            .cursor_pointer()
            .focusable()
            .id(instance_key.to_string())
            .on_state(move |state| {
                let mut label_text = text(&label).size(14.0).color(link_color);
                if state == ButtonState::Hovered {
                    label_text = label_text.underline();
                }
                let mut row = div().flex_row().items_center().gap(4.0).child(label_text);
                if external_icon {
                    row = row.child(
                        svg(to_svg(glyphs::EXTERNAL_LINK))
                            .size(12.0, 12.0)
                            .tint(link_color),
                    );
                }
                row
            })
            .on_click(move |_ctx| {
                if let Err(error) = open::that(&href) {
                    tracing::warn!(%error, url = %href, "failed to open link");
                }
            });

        Self {
            inner: div().child(anchor),
        }
    }
}

impl ElementBuilder for Link {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        self.inner.build(tree)
    }
}

/// Builder for links
pub struct LinkBuilder {
    key: InstanceKey,
    config: LinkConfig,
    built: OnceCell<Link>,
}

/// Create a link
#[track_caller]
pub fn link(label: impl Into<String>, href: impl Into<String>) -> LinkBuilder {
    LinkBuilder {
        key: InstanceKey::new("link"),
        config: LinkConfig {
            label: label.into(),
            href: href.into(),
            external_icon: false,
        },
        built: OnceCell::new(),
    }
}

impl LinkBuilder {
    /// Show the external-link glyph after the label
    pub fn external_icon(mut self) -> Self {
        self.config.external_icon = true;
        self
    }

    fn get_or_build(&self) -> &Link {
        self.built
            .get_or_init(|| Link::from_config(self.key.get(), self.config.clone()))
    }
}

impl ElementBuilder for LinkBuilder {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        self.get_or_build().build(tree)
    }
}
