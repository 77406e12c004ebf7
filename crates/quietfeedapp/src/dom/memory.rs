use super::HostDom;
use crate::model::{Display, MutationRecord};
use slotmap::{new_key_type, SlotMap};
use std::collections::BTreeMap;

new_key_type! {
    /// Generational handle into a [`MemDom`]. A handle to a removed node never
    /// aliases a node created later.
    pub struct NodeId;
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attrs: BTreeMap<String, String>,
        display: Display,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory host tree.
///
/// Nodes are created detached and become observable once appended somewhere
/// under [`HostDom::body`]. Appending to an attached parent queues an insertion
/// record; consecutive appends to the same parent share one record, the way a
/// browser batches them.
pub struct MemDom {
    nodes: SlotMap<NodeId, NodeData>,
    body: NodeId,
    pending: Vec<MutationRecord<NodeId>>,
}

impl Default for MemDom {
    fn default() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(NodeData {
            kind: NodeKind::Element {
                tag: "body".to_string(),
                attrs: BTreeMap::new(),
                display: Display::Default,
            },
            parent: None,
            children: Vec::new(),
        });
        Self {
            nodes,
            body,
            pending: Vec::new(),
        }
    }
}

impl MemDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(NodeData {
            kind: NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
                attrs: BTreeMap::new(),
                display: Display::Default,
            },
            parent: None,
            children: Vec::new(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.nodes.insert(NodeData {
            kind: NodeKind::Text(text.to_string()),
            parent: None,
            children: Vec::new(),
        })
    }

    /// Create a detached element carrying `attrs`.
    pub fn create_element_with(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let node = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attribute(node, name, value);
        }
        node
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Returns false (and changes nothing) when either handle is stale, the
    /// parent is a text node, or the move would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.contains(parent) || !self.contains(child) || !self.is_element(parent) {
            return false;
        }
        if child == self.body || self.is_inclusive_ancestor(child, parent) {
            return false;
        }

        self.unlink(child);
        if let Some(data) = self.nodes.get_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = self.nodes.get_mut(parent) {
            data.children.push(child);
        }

        if self.is_connected(parent) {
            match self.pending.last_mut() {
                Some(last) if last.target == parent => last.added_nodes.push(child),
                _ => self.pending.push(MutationRecord {
                    target: parent,
                    added_nodes: vec![child],
                }),
            }
        }
        true
    }

    /// Append a new text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let node = self.create_text(text);
        self.append_child(parent, node);
        node
    }

    /// Take `node` out of the tree but keep it alive.
    pub fn detach(&mut self, node: NodeId) {
        if node != self.body {
            self.unlink(node);
        }
    }

    /// Destroy `node` and its whole subtree. Their handles go stale.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.body || !self.contains(node) {
            return;
        }
        self.unlink(node);
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(data) = self.nodes.remove(current) {
                stack.extend(data.children);
            }
        }
    }

    /// Attached somewhere under the body (the body counts).
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(self.body, node)
    }

    /// Live node count, the body included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    fn unlink(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(node).and_then(|d| d.parent.take()) else {
            return;
        };
        if let Some(data) = self.nodes.get_mut(parent) {
            data.children.retain(|&c| c != node);
        }
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.nodes.get(node) else {
            return;
        };
        match &data.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for &child in &data.children {
                    self.collect_text(child, out);
                }
            }
        }
    }
}

impl HostDom for MemDom {
    type Node = NodeId;

    fn body(&self) -> NodeId {
        self.body
    }

    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    fn is_element(&self, node: NodeId) -> bool {
        matches!(
            self.nodes.get(node).map(|d| &d.kind),
            Some(NodeKind::Element { .. })
        )
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.nodes.get(node)?.kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node)
            .map(|d| d.children.clone())
            .unwrap_or_default()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes.get(node)?.kind {
            NodeKind::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            NodeKind::Text(_) => None,
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn is_rendered(&self, node: NodeId) -> bool {
        if !self.is_connected(node) {
            return false;
        }
        let mut current = Some(node);
        while let Some(n) = current {
            if self.display(n) == Display::Hidden {
                return false;
            }
            current = self.parent(n);
        }
        true
    }

    fn display(&self, node: NodeId) -> Display {
        match self.nodes.get(node).map(|d| &d.kind) {
            Some(NodeKind::Element { display, .. }) => *display,
            _ => Display::Default,
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(NodeKind::Element { attrs, .. }) = self.nodes.get_mut(node).map(|d| &mut d.kind)
        {
            attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(NodeKind::Element { attrs, .. }) = self.nodes.get_mut(node).map(|d| &mut d.kind)
        {
            attrs.remove(name);
        }
    }

    fn set_display(&mut self, node: NodeId, value: Display) {
        if let Some(NodeKind::Element { display, .. }) =
            self.nodes.get_mut(node).map(|d| &mut d.kind)
        {
            *display = value;
        }
    }

    fn take_mutations(&mut self) -> Vec<MutationRecord<NodeId>> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_concatenates_in_document_order() {
        let mut dom = MemDom::new();
        let div = dom.create_element("div");
        dom.append_text(div, "Hello ");
        let span = dom.create_element("span");
        dom.append_text(span, "wide ");
        dom.append_child(div, span);
        dom.append_text(div, "world");
        assert_eq!(dom.text_content(div), "Hello wide world");
    }

    #[test]
    fn appends_under_body_are_recorded_and_batched() {
        let mut dom = MemDom::new();
        let body = dom.body();
        let a = dom.create_element("div");
        let b = dom.create_element("div");
        dom.append_child(body, a);
        dom.append_child(body, b);

        let records = dom.take_mutations();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].target, body);
        assert_eq!(records[0].added_nodes, vec![a, b]);
        assert!(dom.take_mutations().is_empty());
    }

    #[test]
    fn detached_appends_are_not_recorded() {
        let mut dom = MemDom::new();
        let div = dom.create_element("div");
        dom.append_text(div, "quiet");
        assert!(dom.take_mutations().is_empty());
    }

    #[test]
    fn removed_handles_go_stale() {
        let mut dom = MemDom::new();
        let div = dom.create_element_with("div", &[("id", "x")]);
        let text = dom.append_text(div, "gone soon");
        dom.append_child(dom.body(), div);
        let before = dom.len();

        dom.remove(div);
        assert_eq!(dom.len(), before - 2);
        assert!(!dom.contains(div));
        assert!(!dom.contains(text));
        assert_eq!(dom.attribute(div, "id"), None);
        assert_eq!(dom.text_content(div), "");
        assert!(dom.children(dom.body()).is_empty());

        let fresh = dom.create_element("div");
        assert_ne!(fresh, div);
    }

    #[test]
    fn rendering_follows_ancestor_display() {
        let mut dom = MemDom::new();
        let outer = dom.create_element("div");
        let inner = dom.create_element("p");
        dom.append_child(outer, inner);
        assert!(!dom.is_rendered(inner), "detached nodes are not rendered");

        dom.append_child(dom.body(), outer);
        assert!(dom.is_rendered(inner));

        dom.set_display(outer, Display::Hidden);
        assert!(!dom.is_rendered(inner));
        dom.set_display(outer, Display::Default);
        assert!(dom.is_rendered(inner));
    }

    #[test]
    fn cycles_are_refused() {
        let mut dom = MemDom::new();
        let outer = dom.create_element("div");
        let inner = dom.create_element("div");
        assert!(dom.append_child(outer, inner));
        assert!(!dom.append_child(inner, outer));
        assert!(!dom.append_child(inner, dom.body()));
    }

    #[test]
    fn descendants_are_pre_order() {
        let mut dom = MemDom::new();
        let root = dom.create_element("section");
        let a = dom.create_element("div");
        let a1 = dom.create_element("span");
        let b = dom.create_element("div");
        dom.append_child(root, a);
        dom.append_child(a, a1);
        dom.append_child(root, b);
        assert_eq!(dom.descendants(root), vec![root, a, a1, b]);
    }
}
