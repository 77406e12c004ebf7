use crate::dom::memory::{MemDom, NodeId};
use crate::dom::HostDom;
use crate::model::HIDDEN_MARKER_VALUE;

/// Append a feed post (`article[data-testid="tweet"]`) under `parent`, with
/// its text wrapped in a `div` the way the host page nests it.
pub fn add_post(dom: &mut MemDom, parent: NodeId, text: &str) -> NodeId {
    let post = build_post(dom, text);
    dom.append_child(parent, post);
    post
}

/// Same shape as [`add_post`], left detached.
pub fn build_post(dom: &mut MemDom, text: &str) -> NodeId {
    let post = dom.create_element_with("article", &[("data-testid", "tweet")]);
    let body = dom.create_element_with("div", &[("data-testid", "tweetText")]);
    dom.append_text(body, text);
    dom.append_child(post, body);
    post
}

pub fn marked_hidden(dom: &MemDom, node: NodeId) -> bool {
    dom.attribute(node, "data-ai-blocker-hidden") == Some(HIDDEN_MARKER_VALUE)
}
