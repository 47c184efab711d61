//! Depth-first traversal over the bookmark tree.
//!
//! Modeled as an explicit iterator rather than callback recursion so that
//! early termination is just dropping the iterator, and so that the
//! document-level and node-level entry points share one code path. The
//! sequence is finite, lazy, and not restartable mid-traversal.

use super::{Node, Roots};
use crate::types::NodeType;

/// One visited node plus the names of its proper ancestors, outermost
/// first. Root nodes see an empty slice.
#[derive(Debug)]
pub struct WalkItem<'a> {
    pub node: &'a Node,
    pub ancestors: Vec<&'a str>,
}

impl WalkItem<'_> {
    /// Nesting depth: zero for roots.
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }
}

/// Pre-order, left-to-right iterator over a subtree (or all three roots).
pub struct Walk<'a> {
    // Nodes yet to visit, each with its ancestor count. Pushed in reverse
    // so siblings pop left-to-right.
    stack: Vec<(&'a Node, usize)>,
    // Names of the ancestors of the next node to visit, up to the depth of
    // whatever gets popped; truncated on every step.
    path: Vec<&'a str>,
}

impl<'a> Walk<'a> {
    pub(super) fn over_roots(roots: &'a Roots) -> Walk<'a> {
        Walk {
            stack: vec![(&roots.synced, 0), (&roots.other, 0), (&roots.bookmark_bar, 0)],
            path: Vec::new(),
        }
    }

    pub(super) fn over_node(node: &'a Node) -> Walk<'a> {
        Walk {
            stack: vec![(node, 0)],
            path: Vec::new(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = WalkItem<'a>;

    fn next(&mut self) -> Option<WalkItem<'a>> {
        let (node, depth) = self.stack.pop()?;
        self.path.truncate(depth);
        let ancestors = self.path.clone();
        if node.node_type == NodeType::Folder {
            if let Some(children) = &node.children {
                for child in children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
            }
        }
        self.path.push(&node.name);
        Some(WalkItem { node, ancestors })
    }
}
