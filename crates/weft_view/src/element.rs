//! Render properties carried by every element
//!
//! The view layer stops at a resolved element tree: layout comes from
//! Taffy, and everything a renderer would need to paint a node lives in
//! [`RenderProps`]. Hosts consume the tree; this crate never rasterizes.

use weft_core::Color;
use weft_theme::Shadow;

/// Pointer cursor requested while hovering an element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
    Text,
    NotAllowed,
}

/// Horizontal text alignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Text content and styling for text leaves
#[derive(Clone, Debug)]
pub struct TextProps {
    pub content: String,
    pub size: f32,
    pub weight: u16,
    pub color: Color,
    pub align: TextAlign,
    pub no_wrap: bool,
    pub underline: bool,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            content: String::new(),
            size: 14.0,
            weight: 400,
            color: Color::BLACK,
            align: TextAlign::Start,
            no_wrap: false,
            underline: false,
        }
    }
}

/// Inline vector markup for icon leaves, tinted at render time
#[derive(Clone, Debug)]
pub struct VectorProps {
    pub markup: String,
    pub tint: Option<Color>,
}

/// Declarative motion hints for hosts that animate
///
/// The component layer never schedules animation; it only describes the
/// intent and lets the host's timeline drive it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Fade/slide in on mount over the given duration
    EnterFade { duration_ms: u32 },
    /// Continuous rotation with the given period
    Spin { period_ms: u32 },
}

/// Paint-relevant properties of one element
#[derive(Clone, Debug, Default)]
pub struct RenderProps {
    pub background: Option<Color>,
    /// Uniform border: width and color
    pub border: Option<(f32, Color)>,
    /// Bottom-only border, drawn in addition to `border`
    pub border_bottom: Option<(f32, Color)>,
    pub corner_radius: f32,
    pub shadow: Option<Shadow>,
    /// 1.0 = opaque
    pub opacity: Option<f32>,
    pub cursor: CursorStyle,
    pub overflow_clip: bool,
    pub motion: Option<Motion>,
    pub text: Option<TextProps>,
    pub vector: Option<VectorProps>,
    /// Whether the element participates in focus traversal
    pub focusable: bool,
    /// Stable id for element queries
    pub element_id: Option<String>,
}
