//! Icon component over a curated Lucide glyph set
//!
//! Each glyph is the inner markup of a 24x24 stroke icon; [`icon`] wraps
//! it in a tinted vector leaf sized to the surrounding text.

use weft_theme::{ColorToken, ThemeState};
use weft_view::prelude::*;
use weft_view::svg::Svg;

/// Inner markup for the glyphs the library ships
pub mod glyphs {
    /// chevron down
    pub const CHEVRON_DOWN: &str = r#"<path d="m6 9 6 6 6-6"/>"#;
    /// chevron up
    pub const CHEVRON_UP: &str = r#"<path d="m18 15-6-6-6 6"/>"#;
    /// check
    pub const CHECK: &str = r#"<path d="M20 6 9 17l-5-5"/>"#;
    /// x
    pub const X: &str = r#"<path d="M18 6 6 18"/><path d="m6 6 12 12"/>"#;
    /// circle
    pub const CIRCLE: &str = r#"<circle cx="12" cy="12" r="10"/>"#;
    /// search
    pub const SEARCH: &str = r#"<circle cx="11" cy="11" r="8"/><path d="m21 21-4.3-4.3"/>"#;
    /// info
    pub const INFO: &str =
        r#"<circle cx="12" cy="12" r="10"/><path d="M12 16v-4"/><path d="M12 8h.01"/>"#;
    /// triangle alert
    pub const TRIANGLE_ALERT: &str = r#"<path d="m21.73 18-8-14a2 2 0 0 0-3.48 0l-8 14A2 2 0 0 0 4 21h16a2 2 0 0 0 1.73-3"/><path d="M12 9v4"/><path d="M12 17h.01"/>"#;
    /// circle check
    pub const CIRCLE_CHECK: &str =
        r#"<circle cx="12" cy="12" r="10"/><path d="m9 12 2 2 4-4"/>"#;
    /// circle x
    pub const CIRCLE_X: &str =
        r#"<circle cx="12" cy="12" r="10"/><path d="m15 9-6 6"/><path d="m9 9 6 6"/>"#;
    /// loader circle
    pub const LOADER_CIRCLE: &str = r#"<path d="M21 12a9 9 0 1 1-6.219-8.56"/>"#;
    /// external link
    pub const EXTERNAL_LINK: &str = r#"<path d="M15 3h6v6"/><path d="M10 14 21 3"/><path d="M18 13v6a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2h6"/>"#;
}

/// The glyphs addressable by name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IconName {
    ChevronDown,
    ChevronUp,
    Check,
    X,
    Circle,
    Search,
    Info,
    TriangleAlert,
    CircleCheck,
    CircleX,
    LoaderCircle,
    ExternalLink,
}

impl IconName {
    /// The glyph's inner markup
    pub fn markup(&self) -> &'static str {
        match self {
            IconName::ChevronDown => glyphs::CHEVRON_DOWN,
            IconName::ChevronUp => glyphs::CHEVRON_UP,
            IconName::Check => glyphs::CHECK,
            IconName::X => glyphs::X,
            IconName::Circle => glyphs::CIRCLE,
            IconName::Search => glyphs::SEARCH,
            IconName::Info => glyphs::INFO,
            IconName::TriangleAlert => glyphs::TRIANGLE_ALERT,
            IconName::CircleCheck => glyphs::CIRCLE_CHECK,
            IconName::CircleX => glyphs::CIRCLE_X,
            IconName::LoaderCircle => glyphs::LOADER_CIRCLE,
            IconName::ExternalLink => glyphs::EXTERNAL_LINK,
        }
    }
}

/// Wrap glyph markup in a complete standalone SVG tag
pub fn to_svg(inner: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">{inner}</svg>"#
    )
}

/// Create an icon leaf tinted with the secondary text color
///
/// Size and tint are adjustable through the returned [`Svg`].
pub fn icon(name: IconName) -> Svg {
    let theme = ThemeState::get();
    svg(to_svg(name.markup()))
        .size(16.0, 16.0)
        .tint(theme.color(ColorToken::TextSecondary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_svg_wraps_markup() {
        let markup = to_svg(glyphs::CHECK);
        assert!(markup.starts_with("<svg"));
        assert!(markup.contains(glyphs::CHECK));
        assert!(markup.ends_with("</svg>"));
    }

    #[test]
    fn test_every_name_resolves_markup() {
        let names = [
            IconName::ChevronDown,
            IconName::ChevronUp,
            IconName::Check,
            IconName::X,
            IconName::Circle,
            IconName::Search,
            IconName::Info,
            IconName::TriangleAlert,
            IconName::CircleCheck,
            IconName::CircleX,
            IconName::LoaderCircle,
            IconName::ExternalLink,
        ];
        for name in names {
            assert!(!name.markup().is_empty());
        }
    }
}
