//! Arena of open contexts and finished nodes, shared by every parsing strategy.
//!
//! An id indexes one slot for its whole life: a slot starts as an open
//! [`ContextNode`], is promoted in place to an [`AstNode`], or is deleted. Ids are
//! handed out in increasing order.
//!
//! Besides parent/child edges the registry keeps an index of live ids by kind and
//! the set of finished leaves. Every mutation updates all of them before returning.
//!
//! # Rollback
//!
//! Changes to nodes that already exist (edges, slots, the root) are recorded in a
//! journal. A [`Mark`] pairs the arena length with the journal length, and
//! [`NodeRegistry::truncate`] undoes the journal back to the mark before discarding
//! the nodes allocated after it. A node that existed at the mark therefore gets its
//! parent, children and state back even when a speculative read wrapped, moved or
//! deleted it.

mod invariants;


use indexmap::{IndexMap, IndexSet};

use crate::ast::{AstNode, NodeId, NodeKind};

/// A node whose subtree is still being read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub token_start: usize,
    /// Number of children attached so far.
    pub attribute_counter: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Open(ContextNode),
    Finished(AstNode),
    Deleted,
}

/// Rollback point taken with [`NodeRegistry::mark`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mark {
    len: usize,
    journal: usize,
}

impl Mark {
    /// Index the next allocated id gets.
    pub fn next_index(&self) -> usize {
        self.len
    }
}

/// One undoable change to an existing entry.
#[derive(Debug, Clone)]
enum Change {
    Parent {
        id: NodeId,
        old: Option<NodeId>,
    },
    Appended {
        parent: NodeId,
    },
    /// `removed` was replaced by `inserted` ids starting at `at`.
    Spliced {
        parent: NodeId,
        at: usize,
        removed: Vec<NodeId>,
        inserted: usize,
    },
    Cleared {
        id: NodeId,
        old: Vec<NodeId>,
    },
    Slot {
        id: NodeId,
        old: Slot,
    },
    Root {
        old: Option<NodeId>,
    },
}

#[derive(Debug, Clone)]
struct Entry {
    slot: Slot,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Where an id currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Context,
    Ast,
    Deleted,
    Unallocated,
}

/// Borrowed view of a live node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Context(&'a ContextNode),
    Ast(&'a AstNode),
}

impl NodeRef<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Context(context) => context.kind,
            NodeRef::Ast(node) => node.kind,
        }
    }

    pub fn token_start(&self) -> usize {
        match self {
            NodeRef::Context(context) => context.token_start,
            NodeRef::Ast(node) => node.tokens.start,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    entries: Vec<Entry>,
    root: Option<NodeId>,
    ids_by_kind: IndexMap<NodeKind, IndexSet<NodeId>>,
    leaf_ids: IndexSet<NodeId>,
    journal: Vec<Change>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a context under `parent`. Without a parent the context becomes the root.
    pub fn open_context(
        &mut self,
        kind: NodeKind,
        token_start: usize,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = self.allocate(kind, token_start, None, &[]);
        match parent {
            Some(parent) => self.attach_child(parent, id),
            None => self.set_root(id),
        }
        id
    }

    /// Appends `child` to `parent`'s children and bumps the parent's counter.
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) {
        self.ensure_live(parent);
        self.set_parent(child, Some(parent));
        self.entries[parent.index()].children.push(child);
        self.journal.push(Change::Appended { parent });
        self.sync_counter(parent);
    }

    /// Replaces a context by its finished node. The id does not change.
    pub fn promote(&mut self, id: NodeId, node: AstNode) {
        self.ensure_context(id);
        self.ensure_promotion_matches(id, &node);
        self.replace_slot(id, Slot::Finished(node));
    }

    /// Moves `child` to the end of `new_parent`'s children.
    pub fn reparent(&mut self, child: NodeId, new_parent: NodeId) {
        self.detach(child);
        self.attach_child(new_parent, child);
    }

    /// Opens a context that takes the place of `children[0]` and adopts `children` in order.
    ///
    /// All children must share one parent (or the first must be the root).
    pub fn wrap(&mut self, kind: NodeKind, token_start: usize, children: &[NodeId]) -> NodeId {
        self.ensure_wrappable(children);
        let first = children[0];
        let parent = self.entries[first.index()].parent;

        let id = self.allocate(kind, token_start, parent, children);
        match parent {
            Some(parent) => {
                let at = self.position_in_parent(parent, first);
                self.splice_children(parent, at, children.len(), &[id]);
            }
            None => self.replace_root(Some(id)),
        }
        id
    }

    /// Opens a parentless context over `children`, which must be live and detached.
    ///
    /// Unlike [`NodeRegistry::wrap`] nothing has to be searched or shifted, so folding
    /// a long run of detached nodes stays linear.
    pub fn adopt(&mut self, kind: NodeKind, token_start: usize, children: &[NodeId]) -> NodeId {
        self.ensure_adoptable(children);
        self.allocate(kind, token_start, None, children)
    }

    /// Detaches every child of `id` and returns them in order.
    pub fn detach_children(&mut self, id: NodeId) -> Vec<NodeId> {
        self.ensure_live(id);
        let children = self.take_children(id);
        for child in &children {
            self.set_parent(*child, None);
        }
        self.sync_counter(id);
        children
    }

    /// Deletes a context and splices its children into the parent at its position.
    ///
    /// Dissolving the root requires exactly one child, which becomes the new root.
    pub fn dissolve(&mut self, id: NodeId) {
        self.ensure_context(id);
        let children = self.take_children(id);
        let parent = self.entries[id.index()].parent;

        match parent {
            Some(parent) => {
                let at = self.position_in_parent(parent, id);
                self.splice_children(parent, at, 1, &children);
            }
            None => {
                self.ensure_single_root_child(id, &children);
                self.replace_root(children.first().copied());
            }
        }
        for child in &children {
            self.set_parent(*child, parent);
        }

        self.forget(id);
    }

    /// Deletes `id` and every node beneath it.
    pub fn delete_subtree(&mut self, id: NodeId) {
        self.ensure_live(id);
        self.detach(id);
        if self.root == Some(id) {
            self.replace_root(None);
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            stack.extend(self.take_children(current));
            self.forget(current);
        }
    }

    /// Rolls back to `mark`: undoes every change made to older nodes since, then
    /// discards every node allocated after it.
    pub fn truncate(&mut self, mark: Mark) {
        while self.journal.len() > mark.journal {
            let Some(change) = self.journal.pop() else {
                break;
            };
            self.undo(change, mark.len);
        }

        for index in mark.len..self.entries.len() {
            self.unindex(NodeId::from_index(index));
        }
        self.entries.truncate(mark.len);
    }

    /// Current rollback point.
    pub fn mark(&self) -> Mark {
        Mark {
            len: self.entries.len(),
            journal: self.journal.len(),
        }
    }

    /// Drops the undo history. Marks taken before this can no longer be truncated to.
    pub(crate) fn clear_journal(&mut self) {
        self.journal = Vec::new();
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn state(&self, id: NodeId) -> NodeState {
        match self.entries.get(id.index()).map(|e| &e.slot) {
            Some(Slot::Open(_)) => NodeState::Context,
            Some(Slot::Finished(_)) => NodeState::Ast,
            Some(Slot::Deleted) => NodeState::Deleted,
            None => NodeState::Unallocated,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        match &self.entries.get(id.index())?.slot {
            Slot::Open(context) => Some(NodeRef::Context(context)),
            Slot::Finished(node) => Some(NodeRef::Ast(node)),
            Slot::Deleted => None,
        }
    }

    pub fn ast(&self, id: NodeId) -> Option<&AstNode> {
        match &self.entries.get(id.index())?.slot {
            Slot::Finished(node) => Some(node),
            _ => None,
        }
    }

    pub fn context(&self, id: NodeId) -> Option<&ContextNode> {
        match &self.entries.get(id.index())?.slot {
            Slot::Open(context) => Some(context),
            _ => None,
        }
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        let entry = self.entries.get(id.index())?;
        match entry.slot {
            Slot::Deleted => None,
            _ => entry.parent,
        }
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.entries
            .get(id.index())
            .map_or(&[], |entry| entry.children.as_slice())
    }

    /// Live ids of `kind`, in no particular order.
    pub fn ids_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = NodeId> + '_ {
        self.ids_by_kind
            .get(&kind)
            .into_iter()
            .flat_map(|ids| ids.iter().copied())
    }

    pub fn leaf_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.leaf_ids.iter().copied()
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.leaf_ids.contains(&id)
    }

    /// Live ids in allocation order.
    pub fn live_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !matches!(entry.slot, Slot::Deleted))
            .map(|(index, _)| NodeId::from_index(index))
    }

    pub fn live_count(&self) -> usize {
        self.live_ids().count()
    }

    pub fn is_empty(&self) -> bool {
        self.live_ids().next().is_none()
    }

    /// Deepest open context on the path from the root, following last children.
    pub fn deepest_open_context(&self) -> Option<NodeId> {
        let mut current = self.root?;
        let mut deepest = None;
        loop {
            if self.context(current).is_some() {
                deepest = Some(current);
            }
            match self.children_of(current).last() {
                Some(next) => current = *next,
                None => return deepest,
            }
        }
    }

    fn set_root(&mut self, id: NodeId) {
        self.ensure_no_root(id);
        self.replace_root(Some(id));
    }

    fn allocate(
        &mut self,
        kind: NodeKind,
        token_start: usize,
        parent: Option<NodeId>,
        children: &[NodeId],
    ) -> NodeId {
        let id = NodeId::from_index(self.entries.len());
        self.entries.push(Entry {
            slot: Slot::Open(ContextNode {
                id,
                kind,
                token_start,
                attribute_counter: children.len() as u32,
            }),
            parent,
            children: children.to_vec(),
        });
        self.ids_by_kind.entry(kind).or_default().insert(id);
        for child in children {
            self.set_parent(*child, Some(id));
        }
        id
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.entries[id.index()].parent {
            let at = self.position_in_parent(parent, id);
            self.splice_children(parent, at, 1, &[]);
            self.set_parent(id, None);
        }
    }

    /// Marks a slot deleted and drops it from the kind index and leaf set.
    fn forget(&mut self, id: NodeId) {
        self.take_children(id);
        self.set_parent(id, None);
        self.replace_slot(id, Slot::Deleted);
    }

    fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        let old = std::mem::replace(&mut self.entries[id.index()].parent, parent);
        if old != parent {
            self.journal.push(Change::Parent { id, old });
        }
    }

    fn replace_root(&mut self, root: Option<NodeId>) {
        let old = std::mem::replace(&mut self.root, root);
        self.journal.push(Change::Root { old });
    }

    fn replace_slot(&mut self, id: NodeId, slot: Slot) {
        self.unindex(id);
        let old = std::mem::replace(&mut self.entries[id.index()].slot, slot);
        self.reindex(id);
        self.journal.push(Change::Slot { id, old });
    }

    fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.entries[id.index()].children);
        if !children.is_empty() {
            self.journal.push(Change::Cleared {
                id,
                old: children.clone(),
            });
        }
        self.sync_counter(id);
        children
    }

    /// Replaces `len` children of `parent` starting at `at` by `inserted`.
    fn splice_children(&mut self, parent: NodeId, at: usize, len: usize, inserted: &[NodeId]) {
        let removed = self.entries[parent.index()]
            .children
            .splice(at..at + len, inserted.iter().copied())
            .collect();
        self.journal.push(Change::Spliced {
            parent,
            at,
            removed,
            inserted: inserted.len(),
        });
        self.sync_counter(parent);
    }

    /// Reverts one journalled change. Changes to nodes allocated at or after `len`
    /// are skipped: those nodes are about to be discarded.
    fn undo(&mut self, change: Change, len: usize) {
        let survives = |id: NodeId| id.index() < len;
        match change {
            Change::Parent { id, old } if survives(id) => {
                self.entries[id.index()].parent = old;
            }
            Change::Appended { parent } if survives(parent) => {
                self.entries[parent.index()].children.pop();
                self.sync_counter(parent);
            }
            Change::Spliced {
                parent,
                at,
                removed,
                inserted,
            } if survives(parent) => {
                drop(
                    self.entries[parent.index()]
                        .children
                        .splice(at..at + inserted, removed),
                );
                self.sync_counter(parent);
            }
            Change::Cleared { id, old } if survives(id) => {
                self.entries[id.index()].children = old;
                self.sync_counter(id);
            }
            Change::Slot { id, old } if survives(id) => {
                self.unindex(id);
                self.entries[id.index()].slot = old;
                self.reindex(id);
            }
            Change::Root { old } => self.root = old,
            _ => {}
        }
    }

    fn unindex(&mut self, id: NodeId) {
        let kind = match &self.entries[id.index()].slot {
            Slot::Open(context) => context.kind,
            Slot::Finished(node) => node.kind,
            Slot::Deleted => return,
        };
        if let Some(ids) = self.ids_by_kind.get_mut(&kind) {
            ids.swap_remove(&id);
        }
        self.leaf_ids.swap_remove(&id);
    }

    fn reindex(&mut self, id: NodeId) {
        let (kind, is_leaf) = match &self.entries[id.index()].slot {
            Slot::Open(context) => (context.kind, false),
            Slot::Finished(node) => (node.kind, node.is_leaf),
            Slot::Deleted => return,
        };
        self.ids_by_kind.entry(kind).or_default().insert(id);
        if is_leaf {
            self.leaf_ids.insert(id);
        }
    }

    fn sync_counter(&mut self, id: NodeId) {
        let entry = &mut self.entries[id.index()];
        if let Slot::Open(context) = &mut entry.slot {
            context.attribute_counter = entry.children.len() as u32;
        }
    }
}
