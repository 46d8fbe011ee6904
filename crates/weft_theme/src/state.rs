//! Process-wide active theme
//!
//! Components call `ThemeState::get()` at build time and resolve tokens
//! from the snapshot; switching schemes swaps the active variant and marks
//! the element tree for rebuild.

use std::sync::{Arc, OnceLock, RwLock};

use weft_core::Color;

use crate::theme::{ColorScheme, Theme, ThemeBundle};
use crate::themes::DefaultTheme;
use crate::tokens::{ColorToken, RadiusToken, Shadow, ShadowToken, SpacingToken};

struct ActiveTheme {
    theme: Arc<dyn Theme>,
}

static ACTIVE: OnceLock<RwLock<ActiveTheme>> = OnceLock::new();

fn active() -> &'static RwLock<ActiveTheme> {
    ACTIVE.get_or_init(|| {
        RwLock::new(ActiveTheme {
            theme: Arc::new(DefaultTheme::light()),
        })
    })
}

/// A snapshot of the active theme with token lookup helpers
///
/// Cheap to obtain; holds an `Arc` to the theme that was active at
/// snapshot time, so a mid-build scheme switch cannot tear token reads.
#[derive(Clone)]
pub struct ThemeState {
    theme: Arc<dyn Theme>,
}

impl ThemeState {
    /// Snapshot the active theme
    pub fn get() -> ThemeState {
        ThemeState {
            theme: Arc::clone(&active().read().unwrap().theme),
        }
    }

    /// Install a theme as the process-wide active theme
    pub fn install(theme: impl Theme + 'static) {
        let name = theme.name().to_string();
        active().write().unwrap().theme = Arc::new(theme);
        weft_core::request_rebuild();
        tracing::debug!(theme = %name, "theme installed");
    }

    /// Install the variant of a bundle matching the scheme
    pub fn install_from_bundle(bundle: &ThemeBundle, scheme: ColorScheme) {
        active().write().unwrap().theme = bundle.variant(scheme);
        weft_core::request_rebuild();
        tracing::debug!(theme = bundle.name(), ?scheme, "theme installed");
    }

    pub fn name(&self) -> &str {
        self.theme.name()
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.theme.color_scheme()
    }

    /// Resolve a color token
    pub fn color(&self, token: ColorToken) -> Color {
        self.theme.colors().get(token)
    }

    /// Resolve a spacing token to logical pixels
    pub fn spacing_value(&self, token: SpacingToken) -> f32 {
        self.theme.spacing().get(token)
    }

    /// Resolve a radius token to logical pixels
    pub fn radius(&self, token: RadiusToken) -> f32 {
        self.theme.radii().get(token)
    }

    /// Resolve a shadow token
    pub fn shadow(&self, token: ShadowToken) -> Shadow {
        self.theme.shadows().get(token)
    }

    /// The font size scale
    pub fn font_size_sm(&self) -> f32 {
        self.theme.typography().size_sm
    }

    pub fn font_size_md(&self) -> f32 {
        self.theme.typography().size_md
    }

    pub fn font_size_lg(&self) -> f32 {
        self.theme.typography().size_lg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_resolves_tokens() {
        let theme = ThemeState::get();
        // The default light palette: surface is pure white.
        if theme.color_scheme() == ColorScheme::Light {
            assert_eq!(theme.color(ColorToken::Surface), Color::WHITE);
        }
        assert!(theme.radius(RadiusToken::Md) > theme.radius(RadiusToken::Sm));
        assert_eq!(theme.spacing_value(SpacingToken::Space2), 8.0);
    }

    #[test]
    fn test_shadow_lookup() {
        let theme = ThemeState::get();
        let sm = theme.shadow(ShadowToken::Sm);
        let lg = theme.shadow(ShadowToken::Lg);
        assert!(lg.blur > sm.blur);
    }
}
