//! # Weft Theme
//!
//! Design tokens for the Weft component library: semantic colors, spacing,
//! radii, shadows, and typography, bundled into light/dark [`Theme`]
//! variants and exposed to components through the process-wide
//! [`ThemeState`].
//!
//! ```
//! use weft_theme::{ColorToken, ThemeState};
//!
//! let theme = ThemeState::get();
//! let border = theme.color(ColorToken::Border);
//! assert!(border.a > 0.0);
//! ```

pub mod state;
pub mod theme;
pub mod themes;
pub mod tokens;

pub use state::ThemeState;
pub use theme::{ColorScheme, Theme, ThemeBundle};
pub use themes::DefaultTheme;
pub use tokens::{
    ColorToken, ColorTokens, FontFamily, RadiusToken, RadiusTokens, Shadow, ShadowToken,
    ShadowTokens, SpacingToken, SpacingTokens, TypographyTokens,
};
