//! Hide and reveal, the only writes quietfeed makes to the host tree.
//!
//! Both act on whole post containers. Text may come from, and mutations may
//! be reported on, any descendant of a post, so [`hide_post`] first walks up
//! to the node carrying the post identity attribute.

use crate::dom::HostDom;
use crate::model::{Display, PostSelector, HIDDEN_MARKER_VALUE};
use crate::state::FilterState;
use log::debug;

/// Nearest inclusive ancestor of `node` identified as a post, stopping
/// below the body. Falls back to `node` itself.
pub fn canonical_container<D: HostDom>(
    dom: &D,
    selector: &PostSelector,
    node: D::Node,
) -> D::Node {
    let body = dom.body();
    let mut current = Some(node);
    while let Some(n) = current {
        if n == body {
            break;
        }
        if selector.identifies(dom, n) {
            return n;
        }
        current = dom.parent(n);
    }
    node
}

/// Hide the post containing `node`.
///
/// No-op when the filter is disabled or the container is already registered.
/// Returns whether a post was hidden by this call.
pub fn hide_post<D: HostDom>(
    dom: &mut D,
    state: &mut FilterState<D::Node>,
    node: D::Node,
) -> bool {
    if !state.is_enabled() || !dom.contains(node) {
        return false;
    }
    let container = canonical_container(&*dom, &state.selector, node);
    if !state.registry.add(container) {
        return false;
    }
    dom.set_display(container, Display::Hidden);
    dom.set_attribute(container, &state.selector.hidden_attr, HIDDEN_MARKER_VALUE);
    debug!("hid post {:?}", container);
    true
}

/// Undo every hide currently visible in the document.
///
/// Does not classify anything; a later scan may hide the same posts again.
pub fn reveal_all<D: HostDom>(dom: &mut D, state: &mut FilterState<D::Node>) -> usize {
    let hidden = dom.query_all(dom.body(), |dom, node| {
        state.selector.is_marked_hidden(dom, node)
    });
    for &node in &hidden {
        state.registry.remove(node);
        dom.set_display(node, Display::Default);
        dom.remove_attribute(node, &state.selector.hidden_attr);
    }
    hidden.len()
}
