//! Indented text dump of a registry, for tests and debugging.

use std::fmt::Write;

use crate::ast::{NodeData, NodeId};
use crate::registry::{NodeRef, NodeRegistry};

/// Prints one line per node: its kind, the source text of leaves, and optionally
/// its token range and id. Children come from the registry, so open contexts and
/// partially built trees print too.
pub struct TreePrinter<'d, 's> {
    registry: &'d NodeRegistry,
    source: &'s str,
    root: Option<NodeId>,
    spans: bool,
    ids: bool,
}

impl<'d, 's> TreePrinter<'d, 's> {
    pub fn new(registry: &'d NodeRegistry, source: &'s str) -> Self {
        Self {
            registry,
            source,
            root: registry.root(),
            spans: false,
            ids: false,
        }
    }

    pub fn root(mut self, root: NodeId) -> Self {
        self.root = Some(root);
        self
    }

    /// Appends the token range `[start..end]` of every finished node.
    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn with_ids(mut self, value: bool) -> Self {
        self.ids = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        match self.root {
            Some(root) => self.format_node(root, 0, w),
            None => Ok(()),
        }
    }

    fn format_node(&self, id: NodeId, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let Some(node) = self.registry.get(id) else {
            return writeln!(w, "{prefix}<deleted {id}>");
        };

        write!(w, "{prefix}{}", node.kind())?;
        match node {
            NodeRef::Context(_) => write!(w, " (open)")?,
            NodeRef::Ast(ast) => {
                if let Some(text) = leaf_text(&ast.data, &self.source[ast.span]) {
                    write!(w, " {text:?}")?;
                }
                if self.spans {
                    write!(w, " [{}..{}]", ast.tokens.start, ast.tokens.end)?;
                }
            }
        }
        if self.ids {
            write!(w, " {id}")?;
        }
        writeln!(w)?;

        for child in self.registry.children_of(id) {
            self.format_node(*child, indent + 1, w)?;
        }
        Ok(())
    }
}

fn leaf_text<'a>(data: &'a NodeData, source_text: &'a str) -> Option<&'a str> {
    match data {
        NodeData::Identifier { literal }
        | NodeData::GeneralizedIdentifier { literal }
        | NodeData::Literal { literal, .. } => Some(literal),
        NodeData::Constant { .. } | NodeData::PrimitiveType { .. } => Some(source_text),
        _ => None,
    }
}
