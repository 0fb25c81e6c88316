use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::shape::{Circle, DrawAction, Shape, Square};

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a node, valid only in the scene that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    scene: u64,
    index: Index,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.index.into_raw_parts();
        write!(f, "{}v{}@scene{}", slot, generation, self.scene)
    }
}

/// Payload of a scene node: a leaf shape or a composite of child nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Graphic {
    Leaf(Shape),
    Composite {
        label: Option<String>,
        /// Children in insertion order
        children: Vec<NodeId>,
    },
}

/// Node in the arena-backed scene.
#[derive(Debug)]
pub struct GraphicNode {
    pub graphic: Graphic,
    /// Owning composite, None while the node is unattached
    pub parent: Option<NodeId>,
}

impl GraphicNode {
    pub fn is_composite(&self) -> bool {
        matches!(self.graphic, Graphic::Composite { .. })
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.graphic {
            Graphic::Composite { children, .. } => children,
            Graphic::Leaf(_) => &[],
        }
    }
}

/// Arena-backed composite structure.
///
/// Nodes are created unattached and linked with [`Scene::add`]. Each node has at
/// most one parent and a composite never reaches itself, so every attached node
/// belongs to exactly one acyclic tree. Any node can serve as a traversal root.
///
/// Every scene carries a process-unique id stamped into its [`NodeId`]s, so a
/// handle from another scene never resolves here.
///
/// Mutation takes `&mut self`; concurrent `add` calls must be serialized by the
/// caller holding exclusive access.
#[derive(Debug)]
pub struct Scene {
    id: u64,
    arena: Arena<GraphicNode>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_arena(Arena::new())
    }

    pub fn with_capacity(n: usize) -> Self {
        Self::with_arena(Arena::with_capacity(n))
    }

    fn with_arena(arena: Arena<GraphicNode>) -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),
            arena,
        }
    }

    fn insert(&mut self, graphic: Graphic) -> NodeId {
        let index = self.arena.insert(GraphicNode {
            graphic,
            parent: None,
        });
        NodeId {
            scene: self.id,
            index,
        }
    }

    fn owns(&self, id: NodeId) -> bool {
        id.scene == self.id
    }

    pub fn insert_shape(&mut self, shape: impl Into<Shape>) -> NodeId {
        self.insert(Graphic::Leaf(shape.into()))
    }

    pub fn circle(&mut self, radius: f64) -> DomainResult<NodeId> {
        Ok(self.insert_shape(Circle::new(radius)?))
    }

    pub fn square(&mut self, side_length: f64) -> DomainResult<NodeId> {
        Ok(self.insert_shape(Square::new(side_length)?))
    }

    pub fn composite(&mut self) -> NodeId {
        self.insert(Graphic::Composite {
            label: None,
            children: Vec::new(),
        })
    }

    pub fn composite_named(&mut self, label: impl Into<String>) -> NodeId {
        self.insert(Graphic::Composite {
            label: Some(label.into()),
            children: Vec::new(),
        })
    }

    /// Appends `child` to the end of `parent`'s children.
    ///
    /// Checks run in this order: unknown handle (`NodeNotFound`), leaf parent
    /// (`NotAComposite`), `child` is `parent` or one of its ancestors
    /// (`CycleDetected`, even when `child` is itself attached), `child`
    /// already has a parent (`AlreadyAttached`). A failed add changes nothing.
    #[instrument(level = "trace", skip(self))]
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> DomainResult<()> {
        let child_node = self.get(child).ok_or(DomainError::NodeNotFound(child))?;
        let owner = child_node.parent;
        let parent_node = self.get(parent).ok_or(DomainError::NodeNotFound(parent))?;
        if !parent_node.is_composite() {
            return Err(DomainError::NotAComposite(parent));
        }

        // Reaching child from parent's ancestor chain means the link would close a cycle
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(DomainError::CycleDetected { parent, child });
            }
            cursor = self.get(current).and_then(|n| n.parent);
        }

        if let Some(owner) = owner {
            return Err(DomainError::AlreadyAttached {
                child,
                parent: owner,
            });
        }

        if let Some(GraphicNode {
            graphic: Graphic::Composite { children, .. },
            ..
        }) = self.arena.get_mut(parent.index)
        {
            children.push(child);
        }
        if let Some(node) = self.arena.get_mut(child.index) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    pub fn get(&self, id: NodeId) -> Option<&GraphicNode> {
        if !self.owns(id) {
            return None;
        }
        self.arena.get(id.index)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.owns(id) && self.arena.contains(id.index)
    }

    /// Children of `id` in insertion order; empty for leaves and unknown handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(GraphicNode::children).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order, depth-first traversal starting at `root` (inclusive).
    pub fn iter(&self, root: NodeId) -> PreOrderIter<'_> {
        PreOrderIter::new(self, root)
    }

    /// Draw actions for the tree rooted at `root`, in traversal order.
    ///
    /// Leaves emit one action each. Composites emit a header only when
    /// `announce_composites` is set.
    pub fn draw_actions(
        &self,
        root: NodeId,
        announce_composites: bool,
    ) -> impl Iterator<Item = DrawAction> + '_ {
        self.iter(root)
            .filter_map(move |(_, node)| match &node.graphic {
                Graphic::Leaf(shape) => Some(shape.draw_action()),
                Graphic::Composite { label, .. } if announce_composites => {
                    Some(DrawAction::Composite {
                        label: label.clone(),
                    })
                }
                Graphic::Composite { .. } => None,
            })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn leaf_count(&self, root: NodeId) -> usize {
        self.iter(root)
            .filter(|(_, node)| !node.is_composite())
            .count()
    }

    /// Number of levels below and including `root`; 0 for unknown handles.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, root: NodeId) -> usize {
        let mut max_depth = 0;
        let mut stack = Vec::new();
        if self.contains(root) {
            stack.push((root, 1));
        }
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for &child in self.children(id) {
                stack.push((child, depth + 1));
            }
        }
        max_depth
    }
}

pub struct PreOrderIter<'a> {
    scene: &'a Scene,
    stack: Vec<NodeId>,
}

impl<'a> PreOrderIter<'a> {
    fn new(scene: &'a Scene, root: NodeId) -> Self {
        let mut stack = Vec::new();
        if scene.contains(root) {
            stack.push(root);
        }
        Self { scene, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (NodeId, &'a GraphicNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.scene.get(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children().iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}
