//! Taffy-backed layout tree
//!
//! Built element trees land here: one Taffy node per element plus the
//! render props and event handlers the builders attached. After
//! [`LayoutTree::compute_layout`], nodes can be queried for absolute
//! rects, hit-tested, and walked for ancestry checks — everything the
//! router and anchored overlays need.

use slotmap::{new_key_type, SlotMap};
use std::collections::HashMap;
use taffy::{AvailableSpace, TaffyTree};

use crate::element::RenderProps;
use crate::events::EventHandlers;

new_key_type! {
    /// Unique identifier for a node in the layout tree
    pub struct LayoutNodeId;
}

impl LayoutNodeId {
    /// A null id for contexts without a live tree (tests, detached
    /// dispatch)
    pub fn detached() -> Self {
        Self::default()
    }
}

/// An absolute rectangle in viewport coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

struct NodeRecord {
    taffy: taffy::NodeId,
    parent: Option<LayoutNodeId>,
    children: Vec<LayoutNodeId>,
    props: RenderProps,
    handlers: Option<EventHandlers>,
}

/// The resolved element tree
pub struct LayoutTree {
    taffy: TaffyTree<()>,
    nodes: SlotMap<LayoutNodeId, NodeRecord>,
    root: Option<LayoutNodeId>,
    by_element_id: HashMap<String, LayoutNodeId>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            nodes: SlotMap::with_key(),
            root: None,
            by_element_id: HashMap::new(),
        }
    }

    /// Insert a node with its style, props, and handlers
    pub fn insert(
        &mut self,
        style: taffy::Style,
        props: RenderProps,
        handlers: Option<EventHandlers>,
    ) -> LayoutNodeId {
        // new_leaf only fails on allocation exhaustion inside taffy
        let taffy_id = self
            .taffy
            .new_leaf(style)
            .unwrap_or_else(|e| unreachable!("taffy leaf creation failed: {e}"));
        let element_id = props.element_id.clone();
        let id = self.nodes.insert(NodeRecord {
            taffy: taffy_id,
            parent: None,
            children: Vec::new(),
            props,
            handlers,
        });
        if let Some(element_id) = element_id {
            self.by_element_id.insert(element_id, id);
        }
        id
    }

    /// Attach `child` under `parent` (layout and ancestry)
    pub fn add_child(&mut self, parent: LayoutNodeId, child: LayoutNodeId) {
        let (parent_taffy, child_taffy) = match (self.nodes.get(parent), self.nodes.get(child)) {
            (Some(p), Some(c)) => (p.taffy, c.taffy),
            _ => {
                tracing::warn!("add_child on dead node, skipping");
                return;
            }
        };
        if self.taffy.add_child(parent_taffy, child_taffy).is_err() {
            tracing::warn!("taffy rejected child attachment, skipping");
            return;
        }
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
    }

    /// Mark the tree root used for layout and hit-testing
    pub fn set_root(&mut self, id: LayoutNodeId) {
        self.root = Some(id);
    }

    pub fn root(&self) -> Option<LayoutNodeId> {
        self.root
    }

    /// Run layout for the given viewport
    pub fn compute_layout(&mut self, viewport_width: f32, viewport_height: f32) {
        let Some(root) = self.root.and_then(|r| self.nodes.get(r)) else {
            return;
        };
        let size = taffy::Size {
            width: AvailableSpace::Definite(viewport_width),
            height: AvailableSpace::Definite(viewport_height),
        };
        if let Err(e) = self.taffy.compute_layout(root.taffy, size) {
            tracing::warn!("layout pass failed: {e}");
        }
    }

    /// Absolute rect of a node (valid after `compute_layout`)
    pub fn rect(&self, id: LayoutNodeId) -> Option<Rect> {
        let mut node = self.nodes.get(id)?;
        let layout = self.taffy.layout(node.taffy).ok()?;
        let mut rect = Rect::new(
            layout.location.x,
            layout.location.y,
            layout.size.width,
            layout.size.height,
        );
        while let Some(parent_id) = node.parent {
            node = self.nodes.get(parent_id)?;
            let parent_layout = self.taffy.layout(node.taffy).ok()?;
            rect.x += parent_layout.location.x;
            rect.y += parent_layout.location.y;
        }
        Some(rect)
    }

    pub fn props(&self, id: LayoutNodeId) -> Option<&RenderProps> {
        self.nodes.get(id).map(|n| &n.props)
    }

    pub fn handlers(&self, id: LayoutNodeId) -> Option<&EventHandlers> {
        self.nodes.get(id).and_then(|n| n.handlers.as_ref())
    }

    pub fn parent(&self, id: LayoutNodeId) -> Option<LayoutNodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: LayoutNodeId) -> &[LayoutNodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `node` is `ancestor` or inside its subtree
    pub fn is_descendant(&self, node: LayoutNodeId, ancestor: LayoutNodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Deepest node containing the point, in paint order (children win
    /// over parents, later siblings over earlier)
    pub fn hit_test(&self, x: f32, y: f32) -> Option<LayoutNodeId> {
        let root = self.root?;
        self.hit_test_node(root, x, y)
    }

    fn hit_test_node(&self, id: LayoutNodeId, x: f32, y: f32) -> Option<LayoutNodeId> {
        let rect = self.rect(id)?;
        if !rect.contains(x, y) {
            return None;
        }
        for &child in self.children(id).iter().rev() {
            if let Some(hit) = self.hit_test_node(child, x, y) {
                return Some(hit);
            }
        }
        Some(id)
    }

    /// Look up a node by its stable element id
    pub fn node_by_element_id(&self, element_id: &str) -> Option<LayoutNodeId> {
        self.by_element_id.get(element_id).copied()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(width: f32, height: f32) -> taffy::Style {
        taffy::Style {
            size: taffy::Size {
                width: taffy::Dimension::Length(width),
                height: taffy::Dimension::Length(height),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_rect_accumulates_ancestors() {
        let mut tree = LayoutTree::new();
        let root_style = taffy::Style {
            padding: taffy::Rect {
                left: taffy::LengthPercentage::Length(10.0),
                right: taffy::LengthPercentage::Length(0.0),
                top: taffy::LengthPercentage::Length(20.0),
                bottom: taffy::LengthPercentage::Length(0.0),
            },
            ..style(200.0, 200.0)
        };
        let root = tree.insert(root_style, RenderProps::default(), None);
        let child = tree.insert(style(50.0, 30.0), RenderProps::default(), None);
        tree.add_child(root, child);
        tree.set_root(root);
        tree.compute_layout(200.0, 200.0);

        let rect = tree.rect(child).unwrap();
        assert_eq!(rect.x, 10.0);
        assert_eq!(rect.y, 20.0);
        assert_eq!(rect.width, 50.0);
        assert_eq!(rect.height, 30.0);
    }

    #[test]
    fn test_hit_test_prefers_deepest() {
        let mut tree = LayoutTree::new();
        let root = tree.insert(style(100.0, 100.0), RenderProps::default(), None);
        let child = tree.insert(style(40.0, 40.0), RenderProps::default(), None);
        tree.add_child(root, child);
        tree.set_root(root);
        tree.compute_layout(100.0, 100.0);

        assert_eq!(tree.hit_test(5.0, 5.0), Some(child));
        assert_eq!(tree.hit_test(80.0, 80.0), Some(root));
        assert_eq!(tree.hit_test(500.0, 500.0), None);
    }

    #[test]
    fn test_is_descendant() {
        let mut tree = LayoutTree::new();
        let root = tree.insert(style(10.0, 10.0), RenderProps::default(), None);
        let a = tree.insert(style(5.0, 5.0), RenderProps::default(), None);
        let b = tree.insert(style(5.0, 5.0), RenderProps::default(), None);
        tree.add_child(root, a);
        tree.add_child(a, b);

        assert!(tree.is_descendant(b, root));
        assert!(tree.is_descendant(b, a));
        assert!(tree.is_descendant(a, a));
        assert!(!tree.is_descendant(root, b));
    }

    #[test]
    fn test_element_id_lookup() {
        let mut tree = LayoutTree::new();
        let props = RenderProps {
            element_id: Some("trigger".into()),
            ..Default::default()
        };
        let node = tree.insert(style(10.0, 10.0), props, None);
        assert_eq!(tree.node_by_element_id("trigger"), Some(node));
        assert_eq!(tree.node_by_element_id("missing"), None);
    }
}
