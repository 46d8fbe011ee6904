//! The stock Weft theme

use crate::theme::{ColorScheme, Theme, ThemeBundle};
use crate::tokens::*;
use weft_core::Color;

/// The library's default token set
#[derive(Clone, Debug)]
pub struct DefaultTheme {
    scheme: ColorScheme,
    colors: ColorTokens,
    typography: TypographyTokens,
    spacing: SpacingTokens,
    radii: RadiusTokens,
    shadows: ShadowTokens,
}

impl DefaultTheme {
    /// Create the light variant
    pub fn light() -> Self {
        Self {
            scheme: ColorScheme::Light,
            colors: ColorTokens {
                primary: Color::from_hex(0x2563EB),
                primary_hover: Color::from_hex(0x1D4ED8),
                primary_active: Color::from_hex(0x1E40AF),
                secondary: Color::from_hex(0xE5E7EB),
                secondary_hover: Color::from_hex(0xD1D5DB),
                secondary_active: Color::from_hex(0x9CA3AF),
                success: Color::from_hex(0x16A34A),
                success_bg: Color::from_hex(0x16A34A).with_alpha(0.1),
                warning: Color::from_hex(0xD97706),
                warning_bg: Color::from_hex(0xD97706).with_alpha(0.1),
                error: Color::from_hex(0xDC2626),
                error_bg: Color::from_hex(0xDC2626).with_alpha(0.1),
                info: Color::from_hex(0x0284C7),
                info_bg: Color::from_hex(0x0284C7).with_alpha(0.1),
                background: Color::from_hex(0xF9FAFB),
                surface: Color::WHITE,
                surface_elevated: Color::from_hex(0xF3F4F6),
                surface_overlay: Color::from_hex(0xE5E7EB),
                text_primary: Color::from_hex(0x111827),
                text_secondary: Color::from_hex(0x6B7280),
                text_tertiary: Color::from_hex(0x9CA3AF),
                text_inverse: Color::WHITE,
                text_link: Color::from_hex(0x2563EB),
                border: Color::rgba(0.0, 0.0, 0.0, 0.1),
                border_hover: Color::rgba(0.0, 0.0, 0.0, 0.18),
                border_focus: Color::from_hex(0x2563EB),
                border_error: Color::from_hex(0xDC2626),
                input_bg: Color::WHITE,
                input_bg_hover: Color::from_hex(0xFAFAFA),
                input_bg_focus: Color::WHITE,
                input_bg_disabled: Color::from_hex(0xF3F4F6),
                selection: Color::from_hex(0x2563EB).with_alpha(0.2),
                selection_text: Color::from_hex(0x111827),
                accent: Color::from_hex(0x2563EB),
                accent_subtle: Color::from_hex(0x2563EB).with_alpha(0.1),
            },
            typography: TypographyTokens::default(),
            spacing: SpacingTokens::default(),
            radii: RadiusTokens::default(),
            shadows: ShadowTokens::light(),
        }
    }

    /// Create the dark variant
    pub fn dark() -> Self {
        Self {
            scheme: ColorScheme::Dark,
            colors: ColorTokens {
                primary: Color::from_hex(0x3B82F6),
                primary_hover: Color::from_hex(0x60A5FA),
                primary_active: Color::from_hex(0x93C5FD),
                secondary: Color::from_hex(0x374151),
                secondary_hover: Color::from_hex(0x4B5563),
                secondary_active: Color::from_hex(0x6B7280),
                success: Color::from_hex(0x22C55E),
                success_bg: Color::from_hex(0x22C55E).with_alpha(0.15),
                warning: Color::from_hex(0xF59E0B),
                warning_bg: Color::from_hex(0xF59E0B).with_alpha(0.15),
                error: Color::from_hex(0xEF4444),
                error_bg: Color::from_hex(0xEF4444).with_alpha(0.15),
                info: Color::from_hex(0x38BDF8),
                info_bg: Color::from_hex(0x38BDF8).with_alpha(0.15),
                background: Color::from_hex(0x111827),
                surface: Color::from_hex(0x1F2937),
                surface_elevated: Color::from_hex(0x374151),
                surface_overlay: Color::from_hex(0x0F172A),
                text_primary: Color::from_hex(0xF9FAFB),
                text_secondary: Color::from_hex(0x9CA3AF),
                text_tertiary: Color::from_hex(0x6B7280),
                text_inverse: Color::from_hex(0x111827),
                text_link: Color::from_hex(0x60A5FA),
                border: Color::rgba(1.0, 1.0, 1.0, 0.1),
                border_hover: Color::rgba(1.0, 1.0, 1.0, 0.18),
                border_focus: Color::from_hex(0x3B82F6),
                border_error: Color::from_hex(0xEF4444),
                input_bg: Color::from_hex(0x1F2937),
                input_bg_hover: Color::from_hex(0x374151),
                input_bg_focus: Color::from_hex(0x1F2937),
                input_bg_disabled: Color::from_hex(0x111827),
                selection: Color::from_hex(0x3B82F6).with_alpha(0.3),
                selection_text: Color::from_hex(0xF9FAFB),
                accent: Color::from_hex(0x3B82F6),
                accent_subtle: Color::from_hex(0x3B82F6).with_alpha(0.15),
            },
            typography: TypographyTokens::default(),
            spacing: SpacingTokens::default(),
            radii: RadiusTokens::default(),
            shadows: ShadowTokens::dark(),
        }
    }

    /// Create a theme bundle with light and dark variants
    pub fn bundle() -> ThemeBundle {
        ThemeBundle::new("default", Self::light(), Self::dark())
    }
}

impl Theme for DefaultTheme {
    fn name(&self) -> &str {
        "default"
    }

    fn color_scheme(&self) -> ColorScheme {
        self.scheme
    }

    fn colors(&self) -> &ColorTokens {
        &self.colors
    }

    fn typography(&self) -> &TypographyTokens {
        &self.typography
    }

    fn spacing(&self) -> &SpacingTokens {
        &self.spacing
    }

    fn radii(&self) -> &RadiusTokens {
        &self.radii
    }

    fn shadows(&self) -> &ShadowTokens {
        &self.shadows
    }
}
