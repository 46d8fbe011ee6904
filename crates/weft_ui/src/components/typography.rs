//! Text and Title typography components

use weft_theme::{ColorToken, ThemeState};
use weft_view::prelude::*;
use weft_view::text::Text;

/// Body text tones
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextTone {
    #[default]
    Primary,
    Secondary,
    Muted,
}

impl TextTone {
    fn token(&self) -> ColorToken {
        match self {
            TextTone::Primary => ColorToken::TextPrimary,
            TextTone::Secondary => ColorToken::TextSecondary,
            TextTone::Muted => ColorToken::TextTertiary,
        }
    }
}

/// Body text in the theme's type scale
pub fn body(content: impl Into<String>) -> Text {
    let theme = ThemeState::get();
    text(content)
        .size(theme.font_size_md())
        .color(theme.color(ColorToken::TextPrimary))
}

/// Body text with an explicit tone
pub fn body_toned(content: impl Into<String>, tone: TextTone) -> Text {
    let theme = ThemeState::get();
    text(content)
        .size(theme.font_size_md())
        .color(theme.color(tone.token()))
}

/// Heading levels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TitleLevel {
    H1,
    #[default]
    H2,
    H3,
    H4,
}

impl TitleLevel {
    fn size(&self, theme: &ThemeState) -> f32 {
        match self {
            TitleLevel::H1 => theme.font_size_lg() * 2.0,
            TitleLevel::H2 => theme.font_size_lg() * 1.5,
            TitleLevel::H3 => theme.font_size_lg() * 1.25,
            TitleLevel::H4 => theme.font_size_lg(),
        }
    }
}

/// A heading in the theme's type scale
pub fn title(content: impl Into<String>, level: TitleLevel) -> Text {
    let theme = ThemeState::get();
    text(content)
        .size(level.size(&theme))
        .bold()
        .color(theme.color(ColorToken::TextPrimary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_levels_descend() {
        let theme = ThemeState::get();
        assert!(TitleLevel::H1.size(&theme) > TitleLevel::H2.size(&theme));
        assert!(TitleLevel::H2.size(&theme) > TitleLevel::H3.size(&theme));
        assert!(TitleLevel::H3.size(&theme) > TitleLevel::H4.size(&theme));
    }

    #[test]
    fn test_tones_map_to_tokens() {
        assert_eq!(TextTone::Primary.token(), ColorToken::TextPrimary);
        assert_eq!(TextTone::Muted.token(), ColorToken::TextTertiary);
    }
}
