use crate::dom::HostDom;
use std::collections::HashSet;
use std::hash::Hash;

/// Identities of posts quietfeed has already hidden this enablement cycle.
///
/// Entries are handles, which never keep a node alive. Handles of destroyed
/// nodes can linger until [`PostRegistry::prune`] drops them, but they can
/// never match a live node again.
#[derive(Debug, Clone)]
pub struct PostRegistry<N> {
    members: HashSet<N>,
}

impl<N> Default for PostRegistry<N> {
    fn default() -> Self {
        Self {
            members: HashSet::new(),
        }
    }
}

impl<N: Copy + Eq + Hash> PostRegistry<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, node: N) -> bool {
        self.members.contains(&node)
    }

    /// Returns false when the node was already a member.
    pub fn add(&mut self, node: N) -> bool {
        self.members.insert(node)
    }

    pub fn remove(&mut self, node: N) -> bool {
        self.members.remove(&node)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Forget every handle whose node the host has destroyed.
    pub fn prune<D>(&mut self, dom: &D) -> usize
    where
        D: HostDom<Node = N>,
    {
        let before = self.members.len();
        self.members.retain(|&node| dom.contains(node));
        before - self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemDom;

    #[test]
    fn add_is_idempotent() {
        let mut dom = MemDom::new();
        let node = dom.create_element("article");
        let mut registry = PostRegistry::new();
        assert!(registry.add(node));
        assert!(!registry.add(node));
        assert_eq!(registry.len(), 1);
        assert!(registry.has(node));
        assert!(registry.remove(node));
        assert!(!registry.has(node));
    }

    #[test]
    fn prune_drops_destroyed_nodes_only() {
        let mut dom = MemDom::new();
        let kept = dom.create_element("article");
        let gone = dom.create_element("article");
        let mut registry = PostRegistry::new();
        registry.add(kept);
        registry.add(gone);

        dom.remove(gone);
        assert_eq!(registry.prune(&dom), 1);
        assert!(registry.has(kept));
        assert!(!registry.has(gone));
    }

    #[test]
    fn registry_does_not_keep_nodes_alive() {
        let mut dom = MemDom::new();
        let node = dom.create_element("article");
        let mut registry = PostRegistry::new();
        registry.add(node);

        let before = dom.len();
        dom.remove(node);
        assert_eq!(dom.len(), before - 1);
        let replacement = dom.create_element("article");
        assert!(!registry.has(replacement));
    }
}
