use crate::dom::HostDom;

/// Text a post is classified on: its rendered text, a space, then the `alt`
/// text of every descendant image that has one, space-joined.
///
/// Read-only. Missing attributes and stale handles simply contribute nothing.
pub fn extract_text<D: HostDom>(dom: &D, post: D::Node) -> String {
    let text = dom.text_content(post);
    let alts: Vec<&str> = dom
        .query_all(post, |dom, node| {
            dom.tag_name(node) == Some("img") && dom.attribute(node, "alt").is_some()
        })
        .into_iter()
        .filter_map(|img| dom.attribute(img, "alt"))
        .collect();
    format!("{} {}", text, alts.join(" "))
}
