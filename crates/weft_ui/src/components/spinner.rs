//! Spinner component - indeterminate progress indicator
//!
//! The rotation itself is a declarative [`Motion::Spin`] hint; hosts with
//! an animation timeline drive it, static hosts render a frozen arc.

use weft_theme::{ColorToken, ThemeState};
use weft_view::prelude::*;
use weft_view::tree::{LayoutNodeId, LayoutTree};

use super::icon::{glyphs, to_svg};

/// Spinner size variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinnerSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl SpinnerSize {
    fn diameter(&self) -> f32 {
        match self {
            SpinnerSize::Small => 16.0,
            SpinnerSize::Medium => 24.0,
            SpinnerSize::Large => 32.0,
        }
    }
}

/// Builder for spinners
pub struct SpinnerBuilder {
    size: SpinnerSize,
    period_ms: u32,
}

/// Create a spinner
pub fn spinner() -> SpinnerBuilder {
    SpinnerBuilder {
        size: SpinnerSize::default(),
        period_ms: 800,
    }
}

impl SpinnerBuilder {
    pub fn size(mut self, size: SpinnerSize) -> Self {
        self.size = size;
        self
    }

    /// Rotation period in milliseconds
    pub fn period_ms(mut self, period_ms: u32) -> Self {
        self.period_ms = period_ms;
        self
    }
}

impl ElementBuilder for SpinnerBuilder {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        let theme = ThemeState::get();
        let diameter = self.size.diameter();
        div()
            .w(diameter)
            .h(diameter)
            .items_center()
            .justify_center()
            .motion(Motion::Spin {
                period_ms: self.period_ms,
            })
            .child(
                svg(to_svg(glyphs::LOADER_CIRCLE))
                    .size(diameter, diameter)
                    .tint(theme.color(ColorToken::Primary)),
            )
            .build(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_motion_is_declared() {
        let mut tree = LayoutTree::new();
        let id = spinner().period_ms(500).build(&mut tree);
        let props = tree.props(id).unwrap();
        assert_eq!(props.motion, Some(Motion::Spin { period_ms: 500 }));
    }

    #[test]
    fn test_diameters_scale() {
        assert!(SpinnerSize::Small.diameter() < SpinnerSize::Large.diameter());
    }
}
