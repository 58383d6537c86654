//! The focus cursor and the operations that move it.

use std::time::{Duration, Instant};

use crate::debounce::DebounceGate;
use crate::event::Direction;
use crate::tree::{FocusTree, Node, NodeId};

/// Owns the focus tree and the single "current focus" cursor.
///
/// Exactly one node is focused at all times; after construction that is
/// the root. Directional moves, activation and dismissal all pass through
/// one debounce gate. Registration is not debounced, and keeps the cursor
/// valid when the focused subtree is replaced or removed.
#[derive(Debug)]
pub struct Navigator {
    tree: FocusTree,
    current: NodeId,
    gate: DebounceGate,
}

impl Navigator {
    pub fn new() -> Self {
        let tree = FocusTree::new();
        let current = tree.root();
        Self {
            tree,
            current,
            gate: DebounceGate::default(),
        }
    }

    /// Replace the debounce interval (50 ms by default). Zero disables
    /// throttling.
    pub fn debounce(mut self, interval: Duration) -> Self {
        self.gate = DebounceGate::new(interval);
        self
    }

    pub fn tree(&self) -> &FocusTree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// The focused node. Always a live, non-skip node (the root counts).
    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn is_focused(&self, id: NodeId) -> bool {
        self.current == id
    }

    /// Path of the focused node, for identity checks across re-renders.
    pub fn focused_path(&self) -> String {
        self.tree.path(self.current).unwrap_or_default()
    }

    // Structure

    /// Register a node under `parent` at `slot`; replaces any earlier
    /// node there. When the replaced subtree held the focus, the cursor
    /// follows the replacement (same path, new node), or climbs to the
    /// nearest surviving non-skip ancestor when the replacement is an
    /// empty skip shell.
    pub fn register(&mut self, parent: NodeId, slot: i32, node: Node) -> NodeId {
        let displaced = self
            .tree
            .child_at(parent, slot)
            .map(|old| self.tree.is_within(self.current, old))
            .unwrap_or(false);
        let id = self.tree.register(parent, slot, node);
        if displaced {
            let root = self.tree.root();
            let target = self
                .tree
                .resolve_skip(id)
                .or_else(|| self.surviving_ancestor(parent))
                .unwrap_or(root);
            self.refocus(target);
        }
        id
    }

    /// Remove the child at `slot` of `parent` and its subtree. If the
    /// focus was inside, it is reassigned to the nearest surviving
    /// non-skip ancestor, falling back to the root.
    pub fn unregister(&mut self, parent: NodeId, slot: i32) {
        let displaced = self
            .tree
            .child_at(parent, slot)
            .map(|old| self.tree.is_within(self.current, old))
            .unwrap_or(false);
        if self.tree.unregister(parent, slot).is_some() && displaced {
            let root = self.tree.root();
            let target = self.surviving_ancestor(parent).unwrap_or(root);
            self.refocus(target);
        }
    }

    // Navigation

    /// Move the focus one step in `direction`. Returns the newly focused
    /// node, or None when the move found no target (focus unchanged) or
    /// was dropped by the debounce gate.
    pub fn move_focus(&mut self, direction: Direction) -> Option<NodeId> {
        if !self.gate.admit(Instant::now()) {
            log::trace!("[nav] {:?} dropped by debounce", direction);
            return None;
        }
        match self.seek(self.current, direction) {
            Some(target) => self.focus_on(target),
            None => {
                log::debug!(
                    "[nav] no {:?} target from {:?}",
                    direction,
                    self.tree.path(self.current)
                );
                None
            }
        }
    }

    /// Fire the focused node's activation callback (if any), then descend
    /// into its first focusable child. The callback fires exactly once
    /// per accepted call whether or not a descendant exists.
    pub fn activate(&mut self) -> Option<NodeId> {
        if !self.gate.admit(Instant::now()) {
            log::trace!("[nav] activate dropped by debounce");
            return None;
        }
        if let Some(callback) = self.tree.get(self.current).and_then(Node::activation) {
            log::debug!("[nav] activate {:?}", self.tree.path(self.current));
            callback();
        }
        let target = self.tree.first_descendant(self.current)?;
        self.focus_on(target)
    }

    /// Back out of the current section: focus the nearest non-skip
    /// ancestor. At the root there is nowhere to go and the call is a
    /// silent no-op.
    pub fn dismiss(&mut self) -> Option<NodeId> {
        if !self.gate.admit(Instant::now()) {
            log::trace!("[nav] dismiss dropped by debounce");
            return None;
        }
        let target = self.tree.first_eligible_ancestor(self.current)?;
        self.focus_on(target)
    }

    /// Programmatically focus `id`, resolving skip containers to their
    /// first focusable descendant. Not debounced.
    pub fn focus(&mut self, id: NodeId) -> Option<NodeId> {
        let target = self.tree.resolve_skip(id)?;
        self.focus_on(target)
    }

    /// Recursive ascent: try the sibling one step over on the direction's
    /// axis; on an orientation mismatch or a missing sibling, retry one
    /// level up. A skip candidate resolves through its slot-0 chain, and
    /// a dead end there fails the whole move. No wrap-around anywhere.
    fn seek(&self, from: NodeId, direction: Direction) -> Option<NodeId> {
        let node = self.tree.get(from)?;
        let parent_id = node.parent()?;
        let parent = self.tree.get(parent_id)?;
        if parent.orientation() != direction.axis() {
            log::trace!("[nav] axis mismatch under {:?}, ascending", parent_id);
            return self.seek(parent_id, direction);
        }
        let slot = node.slot() + direction.step();
        match parent.child(slot) {
            Some(candidate) => self.tree.resolve_skip(candidate),
            None => {
                log::trace!("[nav] no sibling at slot {} of {:?}, ascending", slot, parent_id);
                self.seek(parent_id, direction)
            }
        }
    }

    /// Blur the old handle, move the cursor, focus and reveal the new
    /// handle.
    fn focus_on(&mut self, id: NodeId) -> Option<NodeId> {
        if let Some(handle) = self.tree.get(self.current).and_then(Node::handle) {
            handle.blur();
        }
        self.current = id;
        log::debug!("[nav] focus {:?} path={:?}", id, self.tree.path(id));
        if let Some(handle) = self.tree.get(id).and_then(Node::handle) {
            handle.focus();
            handle.scroll_into_view();
        }
        Some(id)
    }

    /// Cursor repair after the focused subtree disappeared. The dead
    /// node's handle is gone with it, so there is nothing to blur.
    fn refocus(&mut self, id: NodeId) {
        self.current = id;
        log::debug!("[nav] refocus {:?} path={:?}", id, self.tree.path(id));
        if let Some(handle) = self.tree.get(id).and_then(Node::handle) {
            handle.focus();
            handle.scroll_into_view();
        }
    }

    /// Walk up from `from` (inclusive) to the first registered non-skip
    /// node.
    fn surviving_ancestor(&self, from: NodeId) -> Option<NodeId> {
        let mut cur = Some(from);
        while let Some(id) = cur {
            match self.tree.get(id) {
                Some(node) if !node.is_skip() => return Some(id),
                Some(node) => cur = node.parent(),
                None => return None,
            }
        }
        None
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
