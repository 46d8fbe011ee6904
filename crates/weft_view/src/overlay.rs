//! Overlay lifecycles: dropdowns, toasts, tooltips
//!
//! Overlays are element subtrees rendered above the main tree. The
//! manager owns their lifecycles: anchored placement (with the
//! open-above flip rule), escape and outside-click dismissal, and
//! auto-dismiss deadlines. Its clock is a caller-supplied millisecond
//! timestamp, so toast expiry is deterministic under test.

use indexmap::IndexMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::div::{Div, ElementBuilder};
use crate::tree::{LayoutTree, Rect};

/// Categorizes overlay behavior and default configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// Anchored to a trigger element, dismissed by escape/outside click
    Dropdown,
    /// Corner-positioned notification with an auto-dismiss deadline
    Toast,
    /// Anchored hover hint, dismissed when the pointer leaves
    Tooltip,
}

/// Vertical side of the anchor an overlay opens toward
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    #[default]
    Below,
    Above,
}

/// Decide which side of the anchor fits the content
///
/// Opens above only when the space below the anchor cannot contain the
/// content but the space above can; otherwise below. Callers re-evaluate
/// on every open, never caching, because content height changes with
/// filtering.
pub fn resolve_placement(anchor: Rect, content_height: f32, viewport_height: f32) -> Placement {
    let space_below = viewport_height - anchor.bottom();
    let space_above = anchor.y;
    if space_below < content_height && space_above >= content_height {
        Placement::Above
    } else {
        Placement::Below
    }
}

/// Corner positions for toasts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// How an overlay is positioned
#[derive(Clone, Copy, Debug)]
pub enum OverlayPosition {
    /// At explicit coordinates
    AtPoint { x: f32, y: f32 },
    /// Relative to an anchor rect, flipping per [`resolve_placement`]
    /// when `auto` is set
    Anchored {
        anchor: Rect,
        offset: f32,
        auto: bool,
    },
    /// In a viewport corner
    Corner(Corner),
}

/// Per-overlay configuration
#[derive(Clone, Copy, Debug)]
pub struct OverlayConfig {
    pub kind: OverlayKind,
    pub dismiss_on_escape: bool,
    pub dismiss_on_outside_click: bool,
    /// Auto-dismiss after this many ms (toasts)
    pub auto_dismiss_ms: Option<u32>,
    /// Higher draws on top
    pub z_priority: i32,
}

impl OverlayConfig {
    pub fn dropdown() -> Self {
        Self {
            kind: OverlayKind::Dropdown,
            dismiss_on_escape: true,
            dismiss_on_outside_click: true,
            auto_dismiss_ms: None,
            z_priority: 150,
        }
    }

    pub fn toast() -> Self {
        Self {
            kind: OverlayKind::Toast,
            dismiss_on_escape: false,
            dismiss_on_outside_click: false,
            auto_dismiss_ms: Some(3000),
            z_priority: 300,
        }
    }

    pub fn tooltip() -> Self {
        Self {
            kind: OverlayKind::Tooltip,
            dismiss_on_escape: false,
            dismiss_on_outside_click: false,
            auto_dismiss_ms: None,
            z_priority: 200,
        }
    }
}

/// Handle to an overlay instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverlayHandle(u64);

impl OverlayHandle {
    /// Reconstruct from a raw id stored in component state
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Callback invoked when an overlay closes, however it closes
pub type OnCloseCallback = Arc<dyn Fn() + Send + Sync>;

type ContentBuilder = Box<dyn Fn() -> Div + Send>;

struct ActiveOverlay {
    config: OverlayConfig,
    content: ContentBuilder,
    /// Resolved content rect in viewport coordinates
    rect: Rect,
    placement: Placement,
    opened_at_ms: u64,
    on_close: Option<OnCloseCallback>,
}

/// Owns all live overlays
pub struct OverlayManager {
    overlays: IndexMap<u64, ActiveOverlay>,
    next_id: u64,
    viewport: (f32, f32),
    now_ms: u64,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self {
            overlays: IndexMap::new(),
            next_id: 1,
            viewport: (0.0, 0.0),
            now_ms: 0,
        }
    }

    /// Update viewport dimensions (logical pixels)
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    /// Measure a content builder against the viewport
    fn measure(&self, content: &ContentBuilder) -> (f32, f32) {
        let mut scratch = LayoutTree::new();
        let root = content().build(&mut scratch);
        scratch.set_root(root);
        scratch.compute_layout(self.viewport.0, self.viewport.1);
        scratch
            .rect(root)
            .map(|r| (r.width, r.height))
            .unwrap_or((0.0, 0.0))
    }

    fn resolve_rect(&self, position: OverlayPosition, size: (f32, f32)) -> (Rect, Placement) {
        let (width, height) = size;
        let (vp_w, vp_h) = self.viewport;
        match position {
            OverlayPosition::AtPoint { x, y } => {
                (Rect::new(x, y, width, height), Placement::Below)
            }
            OverlayPosition::Anchored {
                anchor,
                offset,
                auto,
            } => {
                let placement = if auto {
                    resolve_placement(anchor, height + offset, vp_h)
                } else {
                    Placement::Below
                };
                let y = match placement {
                    Placement::Below => anchor.bottom() + offset,
                    Placement::Above => anchor.y - offset - height,
                };
                (Rect::new(anchor.x, y, width, height), placement)
            }
            OverlayPosition::Corner(corner) => {
                let margin = 16.0;
                let (x, y) = match corner {
                    Corner::TopLeft => (margin, margin),
                    Corner::TopRight => (vp_w - width - margin, margin),
                    Corner::BottomLeft => (margin, vp_h - height - margin),
                    Corner::BottomRight => (vp_w - width - margin, vp_h - height - margin),
                };
                (Rect::new(x, y, width, height), Placement::Below)
            }
        }
    }

    fn show(
        &mut self,
        config: OverlayConfig,
        position: OverlayPosition,
        content: ContentBuilder,
        on_close: Option<OnCloseCallback>,
    ) -> OverlayHandle {
        let size = self.measure(&content);
        let (rect, placement) = self.resolve_rect(position, size);
        let id = self.next_id;
        self.next_id += 1;
        self.overlays.insert(
            id,
            ActiveOverlay {
                config,
                content,
                rect,
                placement,
                opened_at_ms: self.now_ms,
                on_close,
            },
        );
        tracing::debug!(id, kind = ?config.kind, ?placement, "overlay shown");
        OverlayHandle(id)
    }

    /// Close an overlay, firing its close callback
    ///
    /// Closing a dead handle is a no-op.
    pub fn close(&mut self, handle: OverlayHandle) {
        if let Some(overlay) = self.overlays.shift_remove(&handle.0) {
            tracing::debug!(id = handle.0, kind = ?overlay.config.kind, "overlay closed");
            if let Some(on_close) = overlay.on_close {
                on_close();
            }
        }
    }

    /// Close everything
    pub fn close_all(&mut self) {
        let handles: Vec<OverlayHandle> =
            self.overlays.keys().map(|&id| OverlayHandle(id)).collect();
        for handle in handles {
            self.close(handle);
        }
    }

    /// Advance the clock, expiring auto-dismiss deadlines
    pub fn update(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
        let expired: Vec<OverlayHandle> = self
            .overlays
            .iter()
            .filter_map(|(&id, overlay)| {
                overlay.config.auto_dismiss_ms.and_then(|dismiss_ms| {
                    (now_ms >= overlay.opened_at_ms + dismiss_ms as u64)
                        .then_some(OverlayHandle(id))
                })
            })
            .collect();
        for handle in expired {
            self.close(handle);
        }
    }

    /// Escape pressed: close the topmost escape-dismissable overlay
    ///
    /// Returns whether an overlay consumed the key.
    pub fn handle_escape(&mut self) -> bool {
        let target = self
            .overlays
            .iter()
            .filter(|(_, o)| o.config.dismiss_on_escape)
            .max_by_key(|(_, o)| o.config.z_priority)
            .map(|(&id, _)| OverlayHandle(id));
        match target {
            Some(handle) => {
                self.close(handle);
                true
            }
            None => false,
        }
    }

    /// Pointer pressed at a point: dismiss overlays the press landed
    /// outside of
    ///
    /// Returns whether the press was inside some overlay (i.e. the main
    /// tree should not also receive it as an outside press).
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        let inside_any = self.overlays.values().any(|o| o.rect.contains(x, y));
        if !inside_any {
            let dismissable: Vec<OverlayHandle> = self
                .overlays
                .iter()
                .filter(|(_, o)| o.config.dismiss_on_outside_click)
                .map(|(&id, _)| OverlayHandle(id))
                .collect();
            for handle in dismissable {
                self.close(handle);
            }
        }
        inside_any
    }

    /// Resolved rect of a live overlay
    pub fn content_rect(&self, handle: OverlayHandle) -> Option<Rect> {
        self.overlays.get(&handle.0).map(|o| o.rect)
    }

    /// Resolved placement of a live overlay
    pub fn placement(&self, handle: OverlayHandle) -> Option<Placement> {
        self.overlays.get(&handle.0).map(|o| o.placement)
    }

    pub fn is_open(&self, handle: OverlayHandle) -> bool {
        self.overlays.contains_key(&handle.0)
    }

    pub fn open_count(&self) -> usize {
        self.overlays.len()
    }

    /// Build a live overlay's content into a tree, in z order position
    pub fn build_content(&self, handle: OverlayHandle, tree: &mut LayoutTree) -> bool {
        if let Some(overlay) = self.overlays.get(&handle.0) {
            (overlay.content)().build(tree);
            true
        } else {
            false
        }
    }
}

impl Default for OverlayManager {
    fn default() -> Self {
        Self::new()
    }
}

static OVERLAY_MANAGER: OnceLock<Mutex<OverlayManager>> = OnceLock::new();

/// The process-wide overlay manager
pub fn overlay_manager() -> &'static Mutex<OverlayManager> {
    OVERLAY_MANAGER.get_or_init(|| Mutex::new(OverlayManager::new()))
}

/// Fluent construction of a single overlay
pub struct OverlayBuilder {
    config: OverlayConfig,
    position: OverlayPosition,
    content: Option<ContentBuilder>,
    on_close: Option<OnCloseCallback>,
}

impl OverlayBuilder {
    fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            position: OverlayPosition::AtPoint { x: 0.0, y: 0.0 },
            content: None,
            on_close: None,
        }
    }

    /// Start a dropdown overlay
    pub fn dropdown() -> Self {
        Self::new(OverlayConfig::dropdown())
    }

    /// Start a toast overlay
    pub fn toast() -> Self {
        Self::new(OverlayConfig::toast())
    }

    /// Start a tooltip overlay
    pub fn tooltip() -> Self {
        Self::new(OverlayConfig::tooltip())
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = OverlayPosition::AtPoint { x, y };
        self
    }

    /// Anchor below/above a trigger rect; `auto` enables the flip rule
    pub fn anchored(mut self, anchor: Rect, offset: f32, auto: bool) -> Self {
        self.position = OverlayPosition::Anchored {
            anchor,
            offset,
            auto,
        };
        self
    }

    pub fn corner(mut self, corner: Corner) -> Self {
        self.position = OverlayPosition::Corner(corner);
        self
    }

    pub fn dismiss_on_escape(mut self, dismiss: bool) -> Self {
        self.config.dismiss_on_escape = dismiss;
        self
    }

    pub fn auto_dismiss_ms(mut self, ms: u32) -> Self {
        self.config.auto_dismiss_ms = Some(ms);
        self
    }

    pub fn content<F>(mut self, content: F) -> Self
    where
        F: Fn() -> Div + Send + 'static,
    {
        self.content = Some(Box::new(content));
        self
    }

    pub fn on_close<F>(mut self, on_close: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_close = Some(Arc::new(on_close));
        self
    }

    /// Show the overlay, returning its handle
    pub fn show(self) -> OverlayHandle {
        let content = self.content.unwrap_or_else(|| Box::new(crate::div::div));
        overlay_manager().lock().unwrap().show(
            self.config,
            self.position,
            content,
            self.on_close,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::div::div;

    fn manager_for_test() -> OverlayManager {
        let mut mgr = OverlayManager::new();
        mgr.set_viewport(800.0, 600.0);
        mgr
    }

    fn boxed(width: f32, height: f32) -> ContentBuilder {
        Box::new(move || div().w(width).h(height))
    }

    #[test]
    fn test_flip_rule() {
        // Tall content, trigger near the bottom of a short viewport.
        let trigger = Rect::new(10.0, 500.0, 200.0, 40.0);
        assert_eq!(resolve_placement(trigger, 300.0, 600.0), Placement::Above);

        // Enough room below: stays below.
        let trigger = Rect::new(10.0, 50.0, 200.0, 40.0);
        assert_eq!(resolve_placement(trigger, 300.0, 600.0), Placement::Below);

        // No room on either side: defaults below.
        let trigger = Rect::new(10.0, 280.0, 200.0, 40.0);
        assert_eq!(resolve_placement(trigger, 500.0, 600.0), Placement::Below);
    }

    #[test]
    fn test_anchored_show_positions_below_then_flips() {
        let mut mgr = manager_for_test();
        let anchor = Rect::new(20.0, 100.0, 200.0, 40.0);
        let handle = mgr.show(
            OverlayConfig::dropdown(),
            OverlayPosition::Anchored {
                anchor,
                offset: 4.0,
                auto: true,
            },
            boxed(200.0, 150.0),
            None,
        );
        let rect = mgr.content_rect(handle).unwrap();
        assert_eq!(mgr.placement(handle), Some(Placement::Below));
        assert_eq!(rect.y, anchor.bottom() + 4.0);

        // Near the bottom, the same dropdown flips above.
        let anchor = Rect::new(20.0, 520.0, 200.0, 40.0);
        let handle = mgr.show(
            OverlayConfig::dropdown(),
            OverlayPosition::Anchored {
                anchor,
                offset: 4.0,
                auto: true,
            },
            boxed(200.0, 150.0),
            None,
        );
        let rect = mgr.content_rect(handle).unwrap();
        assert_eq!(mgr.placement(handle), Some(Placement::Above));
        assert!(rect.bottom() <= anchor.y);
    }

    #[test]
    fn test_auto_dismiss_deadline() {
        let mut mgr = manager_for_test();
        mgr.update(1000);
        let handle = mgr.show(
            OverlayConfig::toast(),
            OverlayPosition::Corner(Corner::TopRight),
            boxed(200.0, 60.0),
            None,
        );
        mgr.update(3999);
        assert!(mgr.is_open(handle));
        mgr.update(4000);
        assert!(!mgr.is_open(handle));
    }

    #[test]
    fn test_close_fires_on_close_once_and_dead_handle_is_noop() {
        use std::sync::atomic::{AtomicU32, Ordering};
        let mut mgr = manager_for_test();
        let fired = Arc::new(AtomicU32::new(0));
        let fired_in = fired.clone();
        let handle = mgr.show(
            OverlayConfig::dropdown(),
            OverlayPosition::AtPoint { x: 0.0, y: 0.0 },
            boxed(10.0, 10.0),
            Some(Arc::new(move || {
                fired_in.fetch_add(1, Ordering::SeqCst);
            })),
        );
        mgr.close(handle);
        mgr.close(handle);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_escape_closes_topmost_dismissable() {
        let mut mgr = manager_for_test();
        let toast = mgr.show(
            OverlayConfig::toast(),
            OverlayPosition::Corner(Corner::TopRight),
            boxed(10.0, 10.0),
            None,
        );
        let dropdown = mgr.show(
            OverlayConfig::dropdown(),
            OverlayPosition::AtPoint { x: 0.0, y: 0.0 },
            boxed(10.0, 10.0),
            None,
        );
        assert!(mgr.handle_escape());
        assert!(!mgr.is_open(dropdown));
        assert!(mgr.is_open(toast));
        // Toast ignores escape.
        assert!(!mgr.handle_escape());
    }

    #[test]
    fn test_outside_pointer_dismisses_dropdown() {
        let mut mgr = manager_for_test();
        let handle = mgr.show(
            OverlayConfig::dropdown(),
            OverlayPosition::AtPoint { x: 100.0, y: 100.0 },
            boxed(200.0, 100.0),
            None,
        );
        // Inside: stays open.
        assert!(mgr.handle_pointer_down(150.0, 150.0));
        assert!(mgr.is_open(handle));
        // Outside: dismissed.
        assert!(!mgr.handle_pointer_down(10.0, 10.0));
        assert!(!mgr.is_open(handle));
    }
}
