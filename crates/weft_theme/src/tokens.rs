//! Design token structs and the enums components use to look them up

use weft_core::Color;

/// Semantic color slots a theme must fill
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Primary,
    PrimaryHover,
    PrimaryActive,
    Secondary,
    SecondaryHover,
    SecondaryActive,
    Success,
    SuccessBg,
    Warning,
    WarningBg,
    Error,
    ErrorBg,
    Info,
    InfoBg,
    Background,
    Surface,
    SurfaceElevated,
    SurfaceOverlay,
    TextPrimary,
    TextSecondary,
    TextTertiary,
    TextInverse,
    TextLink,
    Border,
    BorderHover,
    BorderFocus,
    BorderError,
    InputBg,
    InputBgHover,
    InputBgFocus,
    InputBgDisabled,
    Selection,
    SelectionText,
    Accent,
    AccentSubtle,
}

/// Spacing scale steps (resolved to logical pixels)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpacingToken {
    Space1,
    Space2,
    Space3,
    Space4,
    Space5,
    Space6,
    Space8,
    Space10,
}

/// Corner radius steps
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RadiusToken {
    Sm,
    Default,
    Md,
    Lg,
    Xl,
    Full,
}

/// Elevation shadow steps
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShadowToken {
    Sm,
    Md,
    Lg,
}

/// Color values for every [`ColorToken`]
#[derive(Clone, Debug)]
pub struct ColorTokens {
    pub primary: Color,
    pub primary_hover: Color,
    pub primary_active: Color,
    pub secondary: Color,
    pub secondary_hover: Color,
    pub secondary_active: Color,
    pub success: Color,
    pub success_bg: Color,
    pub warning: Color,
    pub warning_bg: Color,
    pub error: Color,
    pub error_bg: Color,
    pub info: Color,
    pub info_bg: Color,
    pub background: Color,
    pub surface: Color,
    pub surface_elevated: Color,
    pub surface_overlay: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_tertiary: Color,
    pub text_inverse: Color,
    pub text_link: Color,
    pub border: Color,
    pub border_hover: Color,
    pub border_focus: Color,
    pub border_error: Color,
    pub input_bg: Color,
    pub input_bg_hover: Color,
    pub input_bg_focus: Color,
    pub input_bg_disabled: Color,
    pub selection: Color,
    pub selection_text: Color,
    pub accent: Color,
    pub accent_subtle: Color,
}

impl ColorTokens {
    /// Resolve a token to its color
    pub fn get(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Primary => self.primary,
            ColorToken::PrimaryHover => self.primary_hover,
            ColorToken::PrimaryActive => self.primary_active,
            ColorToken::Secondary => self.secondary,
            ColorToken::SecondaryHover => self.secondary_hover,
            ColorToken::SecondaryActive => self.secondary_active,
            ColorToken::Success => self.success,
            ColorToken::SuccessBg => self.success_bg,
            ColorToken::Warning => self.warning,
            ColorToken::WarningBg => self.warning_bg,
            ColorToken::Error => self.error,
            ColorToken::ErrorBg => self.error_bg,
            ColorToken::Info => self.info,
            ColorToken::InfoBg => self.info_bg,
            ColorToken::Background => self.background,
            ColorToken::Surface => self.surface,
            ColorToken::SurfaceElevated => self.surface_elevated,
            ColorToken::SurfaceOverlay => self.surface_overlay,
            ColorToken::TextPrimary => self.text_primary,
            ColorToken::TextSecondary => self.text_secondary,
            ColorToken::TextTertiary => self.text_tertiary,
            ColorToken::TextInverse => self.text_inverse,
            ColorToken::TextLink => self.text_link,
            ColorToken::Border => self.border,
            ColorToken::BorderHover => self.border_hover,
            ColorToken::BorderFocus => self.border_focus,
            ColorToken::BorderError => self.border_error,
            ColorToken::InputBg => self.input_bg,
            ColorToken::InputBgHover => self.input_bg_hover,
            ColorToken::InputBgFocus => self.input_bg_focus,
            ColorToken::InputBgDisabled => self.input_bg_disabled,
            ColorToken::Selection => self.selection,
            ColorToken::SelectionText => self.selection_text,
            ColorToken::Accent => self.accent,
            ColorToken::AccentSubtle => self.accent_subtle,
        }
    }
}

/// A font family with fallbacks
#[derive(Clone, Debug)]
pub struct FontFamily {
    pub name: String,
    pub fallbacks: Vec<String>,
}

impl FontFamily {
    pub fn new(name: impl Into<String>, fallbacks: Vec<&str>) -> Self {
        Self {
            name: name.into(),
            fallbacks: fallbacks.into_iter().map(String::from).collect(),
        }
    }
}

/// Type scale and weights
#[derive(Clone, Debug)]
pub struct TypographyTokens {
    pub font_sans: FontFamily,
    pub font_mono: FontFamily,
    pub size_xs: f32,
    pub size_sm: f32,
    pub size_md: f32,
    pub size_lg: f32,
    pub size_xl: f32,
    pub size_2xl: f32,
    pub size_3xl: f32,
    pub weight_normal: u16,
    pub weight_medium: u16,
    pub weight_semibold: u16,
    pub weight_bold: u16,
}

impl Default for TypographyTokens {
    fn default() -> Self {
        Self {
            font_sans: FontFamily::new("Inter", vec!["system-ui", "sans-serif"]),
            font_mono: FontFamily::new("JetBrains Mono", vec!["Menlo", "monospace"]),
            size_xs: 11.0,
            size_sm: 13.0,
            size_md: 14.0,
            size_lg: 16.0,
            size_xl: 20.0,
            size_2xl: 24.0,
            size_3xl: 32.0,
            weight_normal: 400,
            weight_medium: 500,
            weight_semibold: 600,
            weight_bold: 700,
        }
    }
}

/// Spacing scale values in logical pixels
#[derive(Clone, Debug)]
pub struct SpacingTokens {
    pub space_1: f32,
    pub space_2: f32,
    pub space_3: f32,
    pub space_4: f32,
    pub space_5: f32,
    pub space_6: f32,
    pub space_8: f32,
    pub space_10: f32,
}

impl Default for SpacingTokens {
    fn default() -> Self {
        Self {
            space_1: 4.0,
            space_2: 8.0,
            space_3: 12.0,
            space_4: 16.0,
            space_5: 20.0,
            space_6: 24.0,
            space_8: 32.0,
            space_10: 40.0,
        }
    }
}

impl SpacingTokens {
    pub fn get(&self, token: SpacingToken) -> f32 {
        match token {
            SpacingToken::Space1 => self.space_1,
            SpacingToken::Space2 => self.space_2,
            SpacingToken::Space3 => self.space_3,
            SpacingToken::Space4 => self.space_4,
            SpacingToken::Space5 => self.space_5,
            SpacingToken::Space6 => self.space_6,
            SpacingToken::Space8 => self.space_8,
            SpacingToken::Space10 => self.space_10,
        }
    }
}

/// Corner radius values in logical pixels
#[derive(Clone, Debug)]
pub struct RadiusTokens {
    pub radius_sm: f32,
    pub radius_default: f32,
    pub radius_md: f32,
    pub radius_lg: f32,
    pub radius_xl: f32,
    pub radius_full: f32,
}

impl Default for RadiusTokens {
    fn default() -> Self {
        Self {
            radius_sm: 4.0,
            radius_default: 6.0,
            radius_md: 8.0,
            radius_lg: 12.0,
            radius_xl: 16.0,
            radius_full: 9999.0,
        }
    }
}

impl RadiusTokens {
    pub fn get(&self, token: RadiusToken) -> f32 {
        match token {
            RadiusToken::Sm => self.radius_sm,
            RadiusToken::Default => self.radius_default,
            RadiusToken::Md => self.radius_md,
            RadiusToken::Lg => self.radius_lg,
            RadiusToken::Xl => self.radius_xl,
            RadiusToken::Full => self.radius_full,
        }
    }
}

/// A single drop shadow
#[derive(Clone, Copy, Debug)]
pub struct Shadow {
    pub offset_y: f32,
    pub blur: f32,
    pub color: Color,
}

/// Elevation shadows
#[derive(Clone, Debug)]
pub struct ShadowTokens {
    pub shadow_sm: Shadow,
    pub shadow_md: Shadow,
    pub shadow_lg: Shadow,
}

impl ShadowTokens {
    /// Shadows tuned for light surfaces
    pub fn light() -> Self {
        Self {
            shadow_sm: Shadow {
                offset_y: 1.0,
                blur: 2.0,
                color: Color::rgba(0.0, 0.0, 0.0, 0.06),
            },
            shadow_md: Shadow {
                offset_y: 2.0,
                blur: 8.0,
                color: Color::rgba(0.0, 0.0, 0.0, 0.10),
            },
            shadow_lg: Shadow {
                offset_y: 8.0,
                blur: 24.0,
                color: Color::rgba(0.0, 0.0, 0.0, 0.16),
            },
        }
    }

    /// Shadows tuned for dark surfaces
    pub fn dark() -> Self {
        Self {
            shadow_sm: Shadow {
                offset_y: 1.0,
                blur: 2.0,
                color: Color::rgba(0.0, 0.0, 0.0, 0.30),
            },
            shadow_md: Shadow {
                offset_y: 2.0,
                blur: 8.0,
                color: Color::rgba(0.0, 0.0, 0.0, 0.40),
            },
            shadow_lg: Shadow {
                offset_y: 8.0,
                blur: 24.0,
                color: Color::rgba(0.0, 0.0, 0.0, 0.55),
            },
        }
    }

    pub fn get(&self, token: ShadowToken) -> Shadow {
        match token {
            ShadowToken::Sm => self.shadow_sm,
            ShadowToken::Md => self.shadow_md,
            ShadowToken::Lg => self.shadow_lg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_scale_is_monotonic() {
        let s = SpacingTokens::default();
        assert!(s.space_1 < s.space_2);
        assert!(s.space_2 < s.space_4);
        assert!(s.space_8 < s.space_10);
    }

    #[test]
    fn test_color_lookup() {
        let mut tokens = ColorTokens::placeholder();
        tokens.primary = Color::from_hex(0x123456);
        assert_eq!(tokens.get(ColorToken::Primary), Color::from_hex(0x123456));
    }
}

#[cfg(test)]
impl ColorTokens {
    /// All-black token set for tests
    fn placeholder() -> Self {
        let c = Color::BLACK;
        Self {
            primary: c,
            primary_hover: c,
            primary_active: c,
            secondary: c,
            secondary_hover: c,
            secondary_active: c,
            success: c,
            success_bg: c,
            warning: c,
            warning_bg: c,
            error: c,
            error_bg: c,
            info: c,
            info_bg: c,
            background: c,
            surface: c,
            surface_elevated: c,
            surface_overlay: c,
            text_primary: c,
            text_secondary: c,
            text_tertiary: c,
            text_inverse: c,
            text_link: c,
            border: c,
            border_hover: c,
            border_focus: c,
            border_error: c,
            input_bg: c,
            input_bg_hover: c,
            input_bg_focus: c,
            input_bg_disabled: c,
            selection: c,
            selection_text: c,
            accent: c,
            accent_subtle: c,
        }
    }
}
