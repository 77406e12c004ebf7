//! # Scanning
//!
//! The scanner is where classification meets the tree. It has two entry
//! points, both idempotent and both safe to call from overlapping triggers:
//!
//! - [`Scanner::scan`]: bulk pass over a subtree. Only post roots that are
//!   laid out, not already marked hidden, and carry more than
//!   `scan_min_text_len` characters of text are classified.
//! - [`Scanner::check_and_hide`]: single node, no visibility or length
//!   pre-filter. Used for nodes inserted directly, which may be posts with no
//!   post root below them.
//!
//! Matches go through [`hide_post`], which makes the final enablement and
//! registry decision.

use crate::actions::hide_post;
use crate::config::QuietfeedConfig;
use crate::dom::HostDom;
use crate::error::Result;
use crate::extract::extract_text;
use crate::matcher::PatternMatcher;
use crate::state::FilterState;

pub const DEFAULT_SCAN_MIN_TEXT_LEN: usize = 20;

#[derive(Debug, Clone)]
pub struct Scanner {
    matcher: PatternMatcher,
    scan_min_text_len: usize,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(PatternMatcher::default_topics(), DEFAULT_SCAN_MIN_TEXT_LEN)
    }
}

impl Scanner {
    pub fn new(matcher: PatternMatcher, scan_min_text_len: usize) -> Self {
        Self {
            matcher,
            scan_min_text_len,
        }
    }

    pub fn from_config(config: &QuietfeedConfig) -> Result<Self> {
        Ok(Self::new(config.matcher()?, config.scan_min_text_len))
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    /// Classify every qualifying post root under `root`, `root` included.
    /// Returns the number of posts hidden.
    pub fn scan<D: HostDom>(
        &self,
        dom: &mut D,
        state: &mut FilterState<D::Node>,
        root: D::Node,
    ) -> usize {
        if !state.is_enabled() {
            return 0;
        }
        let candidates = dom.query_all(root, |dom, node| state.selector.matches(dom, node));

        let mut hidden = 0;
        for post in candidates {
            if !dom.is_rendered(post) || state.selector.is_marked_hidden(&*dom, post) {
                continue;
            }
            let text = extract_text(&*dom, post);
            if text.chars().count() > self.scan_min_text_len
                && self.matcher.matches(&text)
                && hide_post(dom, state, post)
            {
                hidden += 1;
            }
        }
        hidden
    }

    /// Classify one node directly and hide its post on a match.
    pub fn check_and_hide<D: HostDom>(
        &self,
        dom: &mut D,
        state: &mut FilterState<D::Node>,
        node: D::Node,
    ) -> bool {
        if !dom.is_element(node)
            || state.selector.is_marked_hidden(&*dom, node)
            || state.registry.has(node)
        {
            return false;
        }
        let text = extract_text(&*dom, node);
        self.matcher.matches(&text) && hide_post(dom, state, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemDom, NodeId};
    use crate::model::{Display, Enablement, PostSelector};
    use crate::test_utils::{add_post, marked_hidden};

    fn enabled() -> FilterState<NodeId> {
        FilterState::new(PostSelector::default(), Enablement::Enabled)
    }

    #[test]
    fn scan_hides_matching_posts_only() {
        let mut dom = MemDom::new();
        let body = dom.body();
        let ai = add_post(&mut dom, body, "Just tried the new ChatGPT feature, wow!");
        let plain = add_post(&mut dom, body, "Went hiking this weekend, great views");
        let mut state = enabled();

        assert_eq!(Scanner::default().scan(&mut dom, &mut state, body), 1);
        assert!(marked_hidden(&dom, ai));
        assert!(!marked_hidden(&dom, plain));
    }

    #[test]
    fn scan_includes_root_itself() {
        let mut dom = MemDom::new();
        let body = dom.body();
        let post = add_post(&mut dom, body, "Anthropic shipped something today");
        let mut state = enabled();
        assert_eq!(Scanner::default().scan(&mut dom, &mut state, post), 1);
    }

    #[test]
    fn scan_skips_short_posts() {
        let mut dom = MemDom::new();
        let body = dom.body();
        // "ChatGPT rocks" plus the alt-text separator is 14 characters: past
        // the matcher guard, under the scan threshold.
        let post = add_post(&mut dom, body, "ChatGPT rocks");
        let mut state = enabled();
        assert_eq!(Scanner::default().scan(&mut dom, &mut state, body), 0);

        // The direct path has no length pre-filter beyond the matcher's own.
        assert!(Scanner::default().check_and_hide(&mut dom, &mut state, post));
    }

    #[test]
    fn scan_skips_posts_not_laid_out() {
        let mut dom = MemDom::new();
        let body = dom.body();
        let wrapper = dom.create_element("div");
        dom.append_child(body, wrapper);
        let post = add_post(&mut dom, wrapper, "A long post about generative AI and art");
        dom.set_display(wrapper, Display::Hidden);
        let mut state = enabled();

        assert_eq!(Scanner::default().scan(&mut dom, &mut state, body), 0);
        assert!(!marked_hidden(&dom, post));
    }

    #[test]
    fn scan_skips_visible_posts_already_marked() {
        let mut dom = MemDom::new();
        let body = dom.body();
        let post = add_post(&mut dom, body, "Just tried the new ChatGPT feature, wow!");
        dom.set_attribute(post, "data-ai-blocker-hidden", "true");
        assert_eq!(dom.display(post), Display::Default);
        assert!(dom.is_rendered(post));
        let mut state = enabled();

        assert_eq!(Scanner::default().scan(&mut dom, &mut state, body), 0);
        assert!(state.registry.is_empty());
        assert_eq!(dom.display(post), Display::Default);
    }

    #[test]
    fn scan_ignores_elements_without_post_marker() {
        let mut dom = MemDom::new();
        let body = dom.body();
        let div = dom.create_element("div");
        dom.append_text(div, "A long sidebar blurb about OpenAI news");
        dom.append_child(body, div);
        let mut state = enabled();
        assert_eq!(Scanner::default().scan(&mut dom, &mut state, body), 0);
    }

    #[test]
    fn repeated_scans_are_noops() {
        let mut dom = MemDom::new();
        let body = dom.body();
        add_post(&mut dom, body, "Prompt engineering tips thread 1/10");
        let mut state = enabled();
        let scanner = Scanner::default();

        assert_eq!(scanner.scan(&mut dom, &mut state, body), 1);
        assert_eq!(scanner.scan(&mut dom, &mut state, body), 0);
        assert_eq!(state.registry.len(), 1);
    }

    #[test]
    fn scan_is_noop_when_disabled() {
        let mut dom = MemDom::new();
        let body = dom.body();
        let post = add_post(&mut dom, body, "Prompt engineering tips thread 1/10");
        let mut state = FilterState::new(PostSelector::default(), Enablement::Disabled);
        let scanner = Scanner::default();

        assert_eq!(scanner.scan(&mut dom, &mut state, body), 0);
        assert!(!scanner.check_and_hide(&mut dom, &mut state, post));
        assert!(!marked_hidden(&dom, post));
    }

    #[test]
    fn check_and_hide_from_fragment_hides_container() {
        let mut dom = MemDom::new();
        let body = dom.body();
        let post = add_post(&mut dom, body, "placeholder");
        let quote = dom.create_element("div");
        dom.append_text(quote, "quoting: Copilot autocompleted my essay");
        dom.append_child(post, quote);
        let mut state = enabled();

        assert!(Scanner::default().check_and_hide(&mut dom, &mut state, quote));
        assert!(marked_hidden(&dom, post));
        assert!(!marked_hidden(&dom, quote));
    }

    #[test]
    fn check_and_hide_skips_text_nodes_and_registered_nodes() {
        let mut dom = MemDom::new();
        let body = dom.body();
        let post = add_post(&mut dom, body, "Neural network weights everywhere");
        let text = dom.append_text(body, "ChatGPT ChatGPT ChatGPT");
        let mut state = enabled();
        let scanner = Scanner::default();

        assert!(!scanner.check_and_hide(&mut dom, &mut state, text));
        assert!(scanner.check_and_hide(&mut dom, &mut state, post));
        assert!(!scanner.check_and_hide(&mut dom, &mut state, post));
    }
}
