//! The focus node arena: registration, structure queries and paths.

use std::collections::HashMap;
use std::fmt;

/// Stable identifier of a node in a focus tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

/// Axis along which a node's children are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    Row,
    #[default]
    Column,
}

/// Receives visual focus effects for the UI element bound to a node.
/// All methods are fire-and-forget; the engine never reads back.
pub trait FocusHandle {
    fn focus(&self);
    fn blur(&self);
    fn scroll_into_view(&self);
}

/// One entry in the focus tree.
///
/// Built with `Node::row()` / `Node::column()` plus the chained setters,
/// then handed to `register`, which fills in parent and slot.
pub struct Node {
    parent: Option<NodeId>,
    slot: i32,
    orientation: Orientation,
    skip: bool,
    children: HashMap<i32, NodeId>,
    handle: Option<Box<dyn FocusHandle>>,
    on_activate: Option<Box<dyn Fn()>>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            parent: None,
            slot: 0,
            orientation: Orientation::default(),
            skip: false,
            children: HashMap::new(),
            handle: None,
            on_activate: None,
        }
    }
}

impl Node {
    pub fn row() -> Self {
        Self {
            orientation: Orientation::Row,
            ..Default::default()
        }
    }

    pub fn column() -> Self {
        Self {
            orientation: Orientation::Column,
            ..Default::default()
        }
    }

    /// Mark this node structural: navigation passes through it and it can
    /// never hold focus itself.
    pub fn skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Bind the UI element that receives blur/focus/scroll effects.
    pub fn bind(mut self, handle: impl FocusHandle + 'static) -> Self {
        self.handle = Some(Box::new(handle));
        self
    }

    /// Set the callback fired when this node is activated.
    pub fn on_activate(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_activate = Some(Box::new(handler));
        self
    }

    // Accessors

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Position among siblings. Meaningless until registered.
    pub fn slot(&self) -> i32 {
        self.slot
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_skip(&self) -> bool {
        self.skip
    }

    /// Child id at `slot`, if occupied.
    pub fn child(&self, slot: i32) -> Option<NodeId> {
        self.children.get(&slot).copied()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn handle(&self) -> Option<&dyn FocusHandle> {
        self.handle.as_deref()
    }

    pub fn activation(&self) -> Option<&dyn Fn()> {
        self.on_activate.as_deref()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("parent", &self.parent)
            .field("slot", &self.slot)
            .field("orientation", &self.orientation)
            .field("skip", &self.skip)
            .field("children", &self.children)
            .field("handle", &self.handle.is_some())
            .field("on_activate", &self.on_activate.is_some())
            .finish()
    }
}

/// Arena of focus nodes addressed by id.
///
/// The tree always has a root (slot 0, column, never skip). Structure
/// mutations go through `register`/`unregister`; everything else is a read
/// query. The tree knows nothing about the focus cursor.
#[derive(Debug)]
pub struct FocusTree {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    next_id: u64,
}

impl FocusTree {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::column());
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert `node` as `parent`'s child at `slot` and return its id.
    ///
    /// Re-render churn is expected: an occupied slot is replaced and the
    /// earlier subtree is dropped from the arena. The parent id is not
    /// validated; a stale parent produces an inert orphan that is
    /// unreachable from the root.
    pub fn register(&mut self, parent: NodeId, slot: i32, mut node: Node) -> NodeId {
        if let Some(previous) = self.child_at(parent, slot) {
            log::debug!("[tree] slot {} of {:?} replaced, dropping {:?}", slot, parent, previous);
            self.remove_subtree(previous);
        }
        let id = self.alloc();
        node.parent = Some(parent);
        node.slot = slot;
        self.nodes.insert(id, node);
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.insert(slot, id);
        }
        log::debug!("[tree] register {:?} under {:?} slot {}", id, parent, slot);
        id
    }

    /// Remove the child at `slot` of `parent` and its whole subtree.
    /// No-op when the slot is empty. Returns the removed child's id.
    pub fn unregister(&mut self, parent: NodeId, slot: i32) -> Option<NodeId> {
        let child = self.nodes.get_mut(&parent)?.children.remove(&slot)?;
        self.remove_subtree(child);
        log::debug!("[tree] unregister {:?} from {:?} slot {}", child, parent, slot);
        Some(child)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id)?.parent
    }

    pub fn child_at(&self, id: NodeId, slot: i32) -> Option<NodeId> {
        self.nodes.get(&id)?.child(slot)
    }

    /// Whether `id` lies in the subtree rooted at `ancestor` (inclusive).
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.nodes.get(&c).and_then(|n| n.parent);
        }
        false
    }

    /// Follow the slot-0 chain through skip nodes starting at `id`.
    /// Returns the first non-skip node, or None when the chain dead-ends.
    pub fn resolve_skip(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = id;
        loop {
            let node = self.nodes.get(&cur)?;
            if !node.skip {
                return Some(cur);
            }
            log::trace!("[tree] skipping through {:?}", cur);
            cur = node.child(0)?;
        }
    }

    /// First focusable node below `id`: the slot-0 child, resolved through
    /// skip nodes. None when `id` has no slot-0 child.
    pub fn first_descendant(&self, id: NodeId) -> Option<NodeId> {
        let child = self.child_at(id, 0)?;
        self.resolve_skip(child)
    }

    /// Nearest non-skip ancestor of `id`. The root is never skip, so any
    /// node connected to it resolves; orphans return None.
    pub fn first_eligible_ancestor(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.nodes.get(&id)?.parent?;
        loop {
            let node = self.nodes.get(&cur)?;
            if !node.skip {
                return Some(cur);
            }
            cur = node.parent?;
        }
    }

    /// Slot path from the root, `"/0/3"` style; the root's own path is
    /// the empty string. None for unknown ids and for orphans whose
    /// parent chain never reaches the root. Paths are compared, logged
    /// and nothing else.
    pub fn path(&self, id: NodeId) -> Option<String> {
        let mut slots = Vec::new();
        let mut cur = id;
        loop {
            let node = self.nodes.get(&cur)?;
            match node.parent {
                None => break,
                Some(parent) => {
                    slots.push(node.slot);
                    cur = parent;
                }
            }
        }
        let mut path = String::new();
        for slot in slots.iter().rev() {
            path.push('/');
            path.push_str(&slot.to_string());
        }
        Some(path)
    }

    fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes.remove(&cur) {
                stack.extend(node.children.values().copied());
            }
        }
    }
}

impl Default for FocusTree {
    fn default() -> Self {
        Self::new()
    }
}
