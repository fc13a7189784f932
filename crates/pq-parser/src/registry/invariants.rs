//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NodeRegistry, Slot};
use crate::ast::{AstNode, NodeId};

impl NodeRegistry {
    pub(super) fn ensure_live(&self, id: NodeId) {
        let live = self
            .entries
            .get(id.index())
            .is_some_and(|entry| !matches!(entry.slot, Slot::Deleted));
        assert!(live, "NodeRegistry: {id} is not a live node");
    }

    pub(super) fn ensure_context(&self, id: NodeId) {
        assert!(
            self.context(id).is_some(),
            "NodeRegistry: {id} is not an open context (state {:?})",
            self.state(id)
        );
    }

    pub(super) fn ensure_promotion_matches(&self, id: NodeId, node: &AstNode) {
        let Some(context) = self.context(id) else {
            return;
        };
        assert!(
            node.id == id && node.kind == context.kind,
            "NodeRegistry: promoting {id} ({}) to {} ({})",
            context.kind,
            node.id,
            node.kind
        );
    }

    pub(super) fn ensure_no_root(&self, id: NodeId) {
        assert!(
            self.root.is_none(),
            "NodeRegistry: {id} opened without a parent while {:?} is the root",
            self.root
        );
    }

    pub(super) fn ensure_single_root_child(&self, id: NodeId, children: &[NodeId]) {
        assert!(
            children.len() <= 1,
            "NodeRegistry: dissolving root {id} would leave {} roots",
            children.len()
        );
    }

    /// Children must be live consecutive siblings under one parent.
    pub(super) fn ensure_wrappable(&self, children: &[NodeId]) {
        assert!(!children.is_empty(), "NodeRegistry: wrap needs children");
        for child in children {
            self.ensure_live(*child);
        }

        let first = children[0];
        let parent = self.entries[first.index()].parent;
        let Some(parent) = parent else {
            assert!(
                children.len() == 1 && self.root == Some(first),
                "NodeRegistry: wrapping parentless {first} that is not the root"
            );
            return;
        };

        let at = self.position_in_parent(parent, first);
        let siblings = &self.entries[parent.index()].children;
        assert!(
            siblings.get(at..at + children.len()) == Some(children),
            "NodeRegistry: {children:?} are not consecutive children of {parent}"
        );
    }

    pub(super) fn ensure_adoptable(&self, children: &[NodeId]) {
        for child in children {
            self.ensure_live(*child);
            assert!(
                self.entries[child.index()].parent.is_none() && self.root != Some(*child),
                "NodeRegistry: adopting {child}, which is still attached"
            );
        }
    }

    /// Searches from the end: reads attach and dissolve at the back of their parent.
    pub(super) fn position_in_parent(&self, parent: NodeId, child: NodeId) -> usize {
        self.entries[parent.index()]
            .children
            .iter()
            .rposition(|c| *c == child)
            .unwrap_or_else(|| panic!("NodeRegistry: {child} is not a child of {parent}"))
    }
}
