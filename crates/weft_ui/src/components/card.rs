//! Card component - surface container with header/content/footer
//!
//! # Example
//!
//! ```ignore
//! cn::card()
//!     .header("Account", Some("Manage your account".into()))
//!     .content(div().child(text("...")))
//!     .footer(div().child(cn::button("Save")))
//! ```

use weft_theme::{ColorToken, RadiusToken, SpacingToken, ThemeState};
use weft_view::prelude::*;
use weft_view::tree::{LayoutNodeId, LayoutTree};

/// Builder for cards; sections are optional and render in order
pub struct CardBuilder {
    header: Option<Div>,
    content: Option<Div>,
    footer: Option<Div>,
    width: Option<f32>,
}

/// Create a card
pub fn card() -> CardBuilder {
    CardBuilder {
        header: None,
        content: None,
        footer: None,
        width: None,
    }
}

impl CardBuilder {
    /// Header section with a title and optional description line
    pub fn header(mut self, title: impl Into<String>, description: Option<String>) -> Self {
        let theme = ThemeState::get();
        let mut header = div()
            .flex_col()
            .gap(theme.spacing_value(SpacingToken::Space1))
            .child(
                text(title)
                    .size(theme.font_size_lg())
                    .semibold()
                    .color(theme.color(ColorToken::TextPrimary)),
            );
        if let Some(description) = description {
            header = header.child(
                text(description)
                    .size(theme.font_size_sm())
                    .color(theme.color(ColorToken::TextSecondary)),
            );
        }
        self.header = Some(header);
        self
    }

    /// Main content section
    pub fn content(mut self, content: Div) -> Self {
        self.content = Some(content);
        self
    }

    /// Footer section, right-aligned (actions row)
    pub fn footer(mut self, footer: Div) -> Self {
        self.footer = Some(footer.justify_end());
        self
    }

    pub fn w(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }
}

impl ElementBuilder for CardBuilder {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        let theme = ThemeState::get();
        let padding = theme.spacing_value(SpacingToken::Space4);
        let gap = theme.spacing_value(SpacingToken::Space3);

        let mut container = div()
            .flex_col()
            .gap(gap)
            .p(padding)
            .bg(theme.color(ColorToken::Surface))
            .border(1.0, theme.color(ColorToken::Border))
            .rounded(theme.radius(RadiusToken::Lg))
            .shadow_sm();
        if let Some(width) = self.width {
            container = container.w(width);
        }

        let id = container.build(tree);
        for section in [&self.header, &self.content, &self.footer]
            .into_iter()
            .flatten()
        {
            let section_id = section.build(tree);
            tree.add_child(id, section_id);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_render_in_order() {
        let mut tree = LayoutTree::new();
        let id = card()
            .header("Title", Some("Description".into()))
            .content(div().id("card_content"))
            .footer(div().id("card_footer"))
            .build(&mut tree);
        assert_eq!(tree.children(id).len(), 3);
        assert!(tree.node_by_element_id("card_content").is_some());
        assert!(tree.node_by_element_id("card_footer").is_some());
    }

    #[test]
    fn test_empty_card_has_no_sections() {
        let mut tree = LayoutTree::new();
        let id = card().build(&mut tree);
        assert!(tree.children(id).is_empty());
    }
}
