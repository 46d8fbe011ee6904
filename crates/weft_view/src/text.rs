//! Text leaf element
//!
//! Layout needs a size for text before any real shaping happens, so leaves
//! carry a deterministic single-line estimate; hosts with a text stack
//! re-measure when they rasterize.

use weft_core::Color;

use crate::div::ElementBuilder;
use crate::element::{RenderProps, TextAlign, TextProps};
use crate::tree::{LayoutNodeId, LayoutTree};

/// Average glyph advance as a fraction of font size, for the estimate
const GLYPH_ADVANCE: f32 = 0.55;
/// Line height as a fraction of font size
const LINE_HEIGHT: f32 = 1.4;

/// A text leaf
pub struct Text {
    props: TextProps,
}

/// Create a text leaf with default styling
pub fn text(content: impl Into<String>) -> Text {
    Text {
        props: TextProps {
            content: content.into(),
            ..Default::default()
        },
    }
}

impl Text {
    pub fn size(mut self, size: f32) -> Self {
        self.props.size = size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.props.color = color;
        self
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.props.weight = weight;
        self
    }

    pub fn medium(self) -> Self {
        self.weight(500)
    }

    pub fn semibold(self) -> Self {
        self.weight(600)
    }

    pub fn bold(self) -> Self {
        self.weight(700)
    }

    pub fn no_wrap(mut self) -> Self {
        self.props.no_wrap = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.props.underline = true;
        self
    }

    pub fn center(mut self) -> Self {
        self.props.align = TextAlign::Center;
        self
    }

    /// The single-line size estimate used for layout
    pub fn measure(&self) -> (f32, f32) {
        let width = self.props.content.chars().count() as f32 * self.props.size * GLYPH_ADVANCE;
        (width, self.props.size * LINE_HEIGHT)
    }
}

impl ElementBuilder for Text {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        let (width, height) = self.measure();
        let style = taffy::Style {
            size: taffy::Size {
                width: taffy::Dimension::Length(width),
                height: taffy::Dimension::Length(height),
            },
            flex_shrink: if self.props.no_wrap { 0.0 } else { 1.0 },
            ..Default::default()
        };
        let props = RenderProps {
            text: Some(self.props.clone()),
            ..Default::default()
        };
        tree.insert(style, props, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_scales_with_content() {
        let short = text("ab").size(14.0);
        let long = text("abcdef").size(14.0);
        assert!(long.measure().0 > short.measure().0);
        assert_eq!(short.measure().1, long.measure().1);
    }

    #[test]
    fn test_build_carries_text_props() {
        let mut tree = LayoutTree::new();
        let id = text("Banana").size(16.0).bold().build(&mut tree);
        let props = tree.props(id).unwrap();
        let text_props = props.text.as_ref().unwrap();
        assert_eq!(text_props.content, "Banana");
        assert_eq!(text_props.size, 16.0);
        assert_eq!(text_props.weight, 700);
    }
}
