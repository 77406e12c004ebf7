//! # Host Tree Access
//!
//! Quietfeed never owns the document it filters. It reaches the host page's
//! live tree only through [`HostDom`], which exposes exactly what filtering
//! needs:
//!
//! - **Read**: structure, attributes, text and whether a node is laid out.
//! - **Write**: one inline `display` property and marker attributes.
//! - **Observe**: queued insertion records, drained by the caller.
//!
//! ## Handles
//!
//! `HostDom::Node` is a small `Copy` identity key. Holding one never keeps a
//! node alive, and once the host destroys a node every query on its handle
//! degrades to "absent": `None`, `false` or an empty collection. Nothing in
//! this trait can fail.
//!
//! ## Implementations
//!
//! - [`memory::MemDom`]: arena-backed tree used by tests and tooling.

pub mod memory;

use crate::model::{Display, MutationRecord, PostSelector, HIDDEN_MARKER_VALUE};
use std::fmt::Debug;
use std::hash::Hash;

pub trait HostDom {
    type Node: Copy + Eq + Hash + Debug;

    /// The document body; the root of everything that can be observed.
    fn body(&self) -> Self::Node;

    /// Whether the handle still refers to a live node.
    fn contains(&self, node: Self::Node) -> bool;

    fn is_element(&self, node: Self::Node) -> bool;

    /// Lowercase tag name of an element.
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Concatenated text of every descendant text node, in document order.
    fn text_content(&self, node: Self::Node) -> String;

    /// Attached under the body with no `display: none` on the node or its
    /// ancestors. The `offsetParent` test.
    fn is_rendered(&self, node: Self::Node) -> bool;

    fn display(&self, node: Self::Node) -> Display;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    fn remove_attribute(&mut self, node: Self::Node, name: &str);

    fn set_display(&mut self, node: Self::Node, display: Display);

    /// Drain insertion records queued since the previous call.
    fn take_mutations(&mut self) -> Vec<MutationRecord<Self::Node>>;

    /// Pre-order walk of `root` and everything below it.
    fn descendants(&self, root: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            out.push(node);
            let children = self.children(node);
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Every element under `root` (root included) accepted by `pred`.
    fn query_all<F>(&self, root: Self::Node, pred: F) -> Vec<Self::Node>
    where
        F: Fn(&Self, Self::Node) -> bool,
        Self: Sized,
    {
        self.descendants(root)
            .into_iter()
            .filter(|&node| self.is_element(node) && pred(self, node))
            .collect()
    }
}

impl PostSelector {
    /// Full post-root test: tag and identity attribute.
    pub fn matches<D: HostDom>(&self, dom: &D, node: D::Node) -> bool {
        dom.tag_name(node) == Some(self.tag.as_str()) && self.identifies(dom, node)
    }

    /// Identity-attribute test only, used when walking up to a container.
    pub fn identifies<D: HostDom>(&self, dom: &D, node: D::Node) -> bool {
        dom.attribute(node, &self.attr) == Some(self.value.as_str())
    }

    pub fn is_marked_hidden<D: HostDom>(&self, dom: &D, node: D::Node) -> bool {
        dom.attribute(node, &self.hidden_attr) == Some(HIDDEN_MARKER_VALUE)
    }
}
