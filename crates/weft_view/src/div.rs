//! The `Div` element builder
//!
//! Components compose trees from `div()` with chained utility modifiers,
//! the same surface a utility-class styling system exposes: layout
//! (`flex_row`, `w_full`, `gap`), box styling (`bg`, `border`, `rounded`,
//! `shadow_md`), and event hooks (`on_click`, `on_key_down`).
//!
//! ```
//! use weft_view::prelude::*;
//! use weft_core::Color;
//!
//! let card = div()
//!     .flex_col()
//!     .gap(8.0)
//!     .p(16.0)
//!     .bg(Color::WHITE)
//!     .rounded(8.0)
//!     .child(text("Hello"));
//! # let _ = card;
//! ```

use std::rc::Rc;

use weft_core::{Color, EventType};
use weft_theme::{ShadowToken, ThemeState};

use crate::element::{CursorStyle, Motion, RenderProps};
use crate::events::{EventContext, EventHandlers};
use crate::tree::{LayoutNodeId, LayoutTree};

/// Anything that can be built into the layout tree
pub trait ElementBuilder {
    /// Insert this element (and its subtree) into the tree, returning the
    /// root node of the inserted subtree
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId;

    /// The handlers attached to the subtree root, if any
    fn event_handlers(&self) -> Option<&EventHandlers> {
        None
    }
}

/// A container element with flexbox/grid layout and box styling
pub struct Div {
    pub(crate) style: taffy::Style,
    pub(crate) props: RenderProps,
    pub(crate) handlers: EventHandlers,
    pub(crate) children: Vec<Box<dyn ElementBuilder>>,
}

/// Create an empty container element
pub fn div() -> Div {
    Div {
        style: taffy::Style {
            display: taffy::Display::Flex,
            flex_direction: taffy::FlexDirection::Row,
            ..Default::default()
        },
        props: RenderProps::default(),
        handlers: EventHandlers::new(),
        children: Vec::new(),
    }
}

impl Div {
    // -- layout ----------------------------------------------------------

    pub fn flex_row(mut self) -> Self {
        self.style.flex_direction = taffy::FlexDirection::Row;
        self
    }

    pub fn flex_col(mut self) -> Self {
        self.style.flex_direction = taffy::FlexDirection::Column;
        self
    }

    /// Switch to grid layout with `cols` equal columns
    pub fn grid_cols(mut self, cols: u16) -> Self {
        self.style.display = taffy::Display::Grid;
        let track: taffy::TrackSizingFunction = taffy::style_helpers::fr(1.0);
        self.style.grid_template_columns = vec![track; cols as usize];
        self
    }

    pub fn w(mut self, width: f32) -> Self {
        self.style.size.width = taffy::Dimension::Length(width);
        self
    }

    pub fn h(mut self, height: f32) -> Self {
        self.style.size.height = taffy::Dimension::Length(height);
        self
    }

    pub fn w_full(mut self) -> Self {
        self.style.size.width = taffy::Dimension::Percent(1.0);
        self
    }

    pub fn h_full(mut self) -> Self {
        self.style.size.height = taffy::Dimension::Percent(1.0);
        self
    }

    pub fn w_fit(mut self) -> Self {
        self.style.size.width = taffy::Dimension::Auto;
        self
    }

    pub fn h_fit(mut self) -> Self {
        self.style.size.height = taffy::Dimension::Auto;
        self
    }

    pub fn max_w(mut self, width: f32) -> Self {
        self.style.max_size.width = taffy::Dimension::Length(width);
        self
    }

    pub fn max_h(mut self, height: f32) -> Self {
        self.style.max_size.height = taffy::Dimension::Length(height);
        self
    }

    pub fn min_w(mut self, width: f32) -> Self {
        self.style.min_size.width = taffy::Dimension::Length(width);
        self
    }

    pub fn flex_1(mut self) -> Self {
        self.style.flex_grow = 1.0;
        self.style.flex_shrink = 1.0;
        self.style.flex_basis = taffy::Dimension::Percent(0.0);
        self
    }

    pub fn flex_grow(mut self) -> Self {
        self.style.flex_grow = 1.0;
        self
    }

    pub fn flex_shrink_0(mut self) -> Self {
        self.style.flex_shrink = 0.0;
        self
    }

    pub fn flex_wrap(mut self) -> Self {
        self.style.flex_wrap = taffy::FlexWrap::Wrap;
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.style.gap = taffy::Size {
            width: taffy::LengthPercentage::Length(gap),
            height: taffy::LengthPercentage::Length(gap),
        };
        self
    }

    pub fn p(mut self, padding: f32) -> Self {
        self.style.padding = taffy::Rect {
            left: taffy::LengthPercentage::Length(padding),
            right: taffy::LengthPercentage::Length(padding),
            top: taffy::LengthPercentage::Length(padding),
            bottom: taffy::LengthPercentage::Length(padding),
        };
        self
    }

    pub fn px(mut self, padding: f32) -> Self {
        self.style.padding.left = taffy::LengthPercentage::Length(padding);
        self.style.padding.right = taffy::LengthPercentage::Length(padding);
        self
    }

    pub fn py(mut self, padding: f32) -> Self {
        self.style.padding.top = taffy::LengthPercentage::Length(padding);
        self.style.padding.bottom = taffy::LengthPercentage::Length(padding);
        self
    }

    pub fn pt(mut self, padding: f32) -> Self {
        self.style.padding.top = taffy::LengthPercentage::Length(padding);
        self
    }

    pub fn pb(mut self, padding: f32) -> Self {
        self.style.padding.bottom = taffy::LengthPercentage::Length(padding);
        self
    }

    pub fn ml(mut self, margin: f32) -> Self {
        self.style.margin.left = taffy::LengthPercentageAuto::Length(margin);
        self
    }

    pub fn mr(mut self, margin: f32) -> Self {
        self.style.margin.right = taffy::LengthPercentageAuto::Length(margin);
        self
    }

    pub fn mt(mut self, margin: f32) -> Self {
        self.style.margin.top = taffy::LengthPercentageAuto::Length(margin);
        self
    }

    pub fn mb(mut self, margin: f32) -> Self {
        self.style.margin.bottom = taffy::LengthPercentageAuto::Length(margin);
        self
    }

    pub fn items_center(mut self) -> Self {
        self.style.align_items = Some(taffy::AlignItems::Center);
        self
    }

    pub fn items_start(mut self) -> Self {
        self.style.align_items = Some(taffy::AlignItems::FlexStart);
        self
    }

    pub fn items_end(mut self) -> Self {
        self.style.align_items = Some(taffy::AlignItems::FlexEnd);
        self
    }

    pub fn justify_center(mut self) -> Self {
        self.style.justify_content = Some(taffy::JustifyContent::Center);
        self
    }

    pub fn justify_between(mut self) -> Self {
        self.style.justify_content = Some(taffy::JustifyContent::SpaceBetween);
        self
    }

    pub fn justify_end(mut self) -> Self {
        self.style.justify_content = Some(taffy::JustifyContent::FlexEnd);
        self
    }

    // -- box styling -----------------------------------------------------

    pub fn bg(mut self, color: Color) -> Self {
        self.props.background = Some(color);
        self
    }

    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.props.border = Some((width, color));
        self
    }

    pub fn border_bottom(mut self, width: f32, color: Color) -> Self {
        self.props.border_bottom = Some((width, color));
        self
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.props.corner_radius = radius;
        self
    }

    pub fn rounded_full(mut self) -> Self {
        self.props.corner_radius = ThemeState::get().radius(weft_theme::RadiusToken::Full);
        self
    }

    pub fn shadow_sm(mut self) -> Self {
        self.props.shadow = Some(ThemeState::get().shadow(ShadowToken::Sm));
        self
    }

    pub fn shadow_md(mut self) -> Self {
        self.props.shadow = Some(ThemeState::get().shadow(ShadowToken::Md));
        self
    }

    pub fn shadow_lg(mut self) -> Self {
        self.props.shadow = Some(ThemeState::get().shadow(ShadowToken::Lg));
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.props.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    pub fn overflow_clip(mut self) -> Self {
        self.props.overflow_clip = true;
        self.style.overflow = taffy::Point {
            x: taffy::Overflow::Hidden,
            y: taffy::Overflow::Hidden,
        };
        self
    }

    pub fn cursor(mut self, cursor: CursorStyle) -> Self {
        self.props.cursor = cursor;
        self
    }

    pub fn cursor_pointer(self) -> Self {
        self.cursor(CursorStyle::Pointer)
    }

    pub fn motion(mut self, motion: Motion) -> Self {
        self.props.motion = Some(motion);
        self
    }

    /// Stable id for element queries and anchored overlays
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.props.element_id = Some(id.into());
        self
    }

    /// Mark this element as focusable by the router
    pub fn focusable(mut self) -> Self {
        self.props.focusable = true;
        self
    }

    // -- events ----------------------------------------------------------

    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on(EventType::Click, Rc::new(handler));
        self
    }

    pub fn on_pointer_down<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on(EventType::PointerDown, Rc::new(handler));
        self
    }

    pub fn on_pointer_enter<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on(EventType::PointerEnter, Rc::new(handler));
        self
    }

    pub fn on_pointer_leave<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on(EventType::PointerLeave, Rc::new(handler));
        self
    }

    pub fn on_key_down<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on(EventType::KeyDown, Rc::new(handler));
        self
    }

    pub fn on_text_input<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on(EventType::TextInput, Rc::new(handler));
        self
    }

    pub fn on_focus_in<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on(EventType::FocusIn, Rc::new(handler));
        self
    }

    pub fn on_focus_out<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EventContext) + 'static,
    {
        self.handlers.on(EventType::FocusOut, Rc::new(handler));
        self
    }

    // -- children --------------------------------------------------------

    pub fn child(mut self, child: impl ElementBuilder + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn children<I, E>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: ElementBuilder + 'static,
    {
        for child in children {
            self.children.push(Box::new(child));
        }
        self
    }

    /// Conditionally apply a modifier chain
    pub fn apply_if(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self {
        if condition {
            f(self)
        } else {
            self
        }
    }
}

impl ElementBuilder for Div {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        let handlers = if self.handlers.is_empty() {
            None
        } else {
            Some(self.handlers.clone())
        };
        let id = tree.insert(self.style.clone(), self.props.clone(), handlers);
        for child in &self.children {
            let child_id = child.build(tree);
            tree.add_child(id, child_id);
        }
        id
    }

    fn event_handlers(&self) -> Option<&EventHandlers> {
        if self.handlers.is_empty() {
            None
        } else {
            Some(&self.handlers)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_inserts_subtree() {
        let mut tree = LayoutTree::new();
        let root = div()
            .w(100.0)
            .h(50.0)
            .child(div().w(10.0))
            .child(div().w(20.0))
            .build(&mut tree);
        assert_eq!(tree.children(root).len(), 2);
    }

    #[test]
    fn test_handlers_only_stored_when_registered() {
        let mut tree = LayoutTree::new();
        let plain = div().build(&mut tree);
        assert!(tree.handlers(plain).is_none());

        let clickable = div().on_click(|_| {}).build(&mut tree);
        assert!(tree.handlers(clickable).is_some());
    }

    #[test]
    fn test_apply_if() {
        let d = div().apply_if(true, |d| d.opacity(0.5));
        assert_eq!(d.props.opacity, Some(0.5));
        let d = div().apply_if(false, |d| d.opacity(0.5));
        assert_eq!(d.props.opacity, None);
    }
}
