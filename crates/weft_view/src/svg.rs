//! Inline vector leaf element
//!
//! Carries vector markup as data for the host renderer, tinted with a
//! theme color. Used by the icon set and by glyphs inside components
//! (chevrons, check marks, close crosses).

use weft_core::Color;

use crate::div::ElementBuilder;
use crate::element::{RenderProps, VectorProps};
use crate::tree::{LayoutNodeId, LayoutTree};

/// A vector-markup leaf
pub struct Svg {
    markup: String,
    tint: Option<Color>,
    width: f32,
    height: f32,
}

/// Create a vector leaf from inline markup
pub fn svg(markup: impl Into<String>) -> Svg {
    Svg {
        markup: markup.into(),
        tint: None,
        width: 16.0,
        height: 16.0,
    }
}

impl Svg {
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Tint every stroke/fill with a single color
    pub fn tint(mut self, color: Color) -> Self {
        self.tint = Some(color);
        self
    }
}

impl ElementBuilder for Svg {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        let style = taffy::Style {
            size: taffy::Size {
                width: taffy::Dimension::Length(self.width),
                height: taffy::Dimension::Length(self.height),
            },
            flex_shrink: 0.0,
            ..Default::default()
        };
        let props = RenderProps {
            vector: Some(VectorProps {
                markup: self.markup.clone(),
                tint: self.tint,
            }),
            ..Default::default()
        };
        tree.insert(style, props, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_carries_markup_and_tint() {
        let mut tree = LayoutTree::new();
        let id = svg("<svg/>")
            .size(20.0, 20.0)
            .tint(Color::BLACK)
            .build(&mut tree);
        let vector = tree.props(id).unwrap().vector.as_ref().unwrap();
        assert_eq!(vector.markup, "<svg/>");
        assert_eq!(vector.tint, Some(Color::BLACK));
    }
}
