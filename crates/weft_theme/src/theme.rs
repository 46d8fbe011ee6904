//! The `Theme` trait and light/dark bundling

use crate::tokens::{
    ColorTokens, RadiusTokens, ShadowTokens, SpacingTokens, TypographyTokens,
};

/// Light or dark appearance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// A complete set of design tokens
pub trait Theme: Send + Sync {
    fn name(&self) -> &str;
    fn color_scheme(&self) -> ColorScheme;
    fn colors(&self) -> &ColorTokens;
    fn typography(&self) -> &TypographyTokens;
    fn spacing(&self) -> &SpacingTokens;
    fn radii(&self) -> &RadiusTokens;
    fn shadows(&self) -> &ShadowTokens;
}

/// A named pair of light and dark theme variants
pub struct ThemeBundle {
    name: String,
    light: std::sync::Arc<dyn Theme>,
    dark: std::sync::Arc<dyn Theme>,
}

impl ThemeBundle {
    pub fn new(
        name: impl Into<String>,
        light: impl Theme + 'static,
        dark: impl Theme + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            light: std::sync::Arc::new(light),
            dark: std::sync::Arc::new(dark),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variant for the given scheme
    pub fn variant(&self, scheme: ColorScheme) -> std::sync::Arc<dyn Theme> {
        match scheme {
            ColorScheme::Light => std::sync::Arc::clone(&self.light),
            ColorScheme::Dark => std::sync::Arc::clone(&self.dark),
        }
    }
}
