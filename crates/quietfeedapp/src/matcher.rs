//! # Topic Matching
//!
//! A [`PatternMatcher`] holds an ordered list of [`TopicPattern`]s and answers a
//! single question: is this text about one of the topics? Evaluation stops at
//! the first pattern that hits, so order only affects latency.
//!
//! ## Exclusions
//!
//! The regex engine has no lookaround. A pattern that must not fire in some
//! context carries an *exclusion*: a second pattern anchored at the end of each
//! hit. A hit counts only when the text right after it does not match the
//! exclusion. `ML` uses this to stay quiet on `ML/ops`-style compounds.
//!
//! ## Word Boundaries
//!
//! `\b` and `\B` are ASCII boundaries: only `[0-9A-Za-z_]` counts as a word
//! character. A term written flush against CJK text, as in `今日はChatGPTを`,
//! still sits on a boundary.
//!
//! ## Length Guard
//!
//! Texts shorter than the matcher's minimum length (10 characters by default,
//! counted as Unicode scalar values) never match, whatever they contain.

use crate::error::{QuietfeedError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_MIN_TEXT_LEN: usize = 10;

const TOPIC_PATTERNS: &[&str] = &[
    r"\bAI\b",
    r"\bartificial intelligence\b",
    r"\bmachine learning\b",
    r"\bCursor\b",
    r"\bChatGPT\b",
    r"\bGPT-?[34]\b",
    r"\bGPT\b",
    r"\bLLM\b",
    r"\blarge language model",
    r"\bgenerative AI\b",
    r"\bGenAI\b",
    r"\bOpenAI\b",
    r"\bClaude\b",
    r"\bAnthropic\b",
    r"\bGemini\b",
    r"\bCopilot\b",
    r"\bprompt engineering\b",
    r"\bAGI\b",
    r"\bartificial general intelligence\b",
    r"\bneural network\b",
    r"\bdeep learning\b",
    r"\bLangChain\b",
    r"\bRAG\b",
    r"\bretrieval.?augmented\b",
    r"\bfine.?tuning\b",
    r"\bvector database\b",
    r"\bembeddings?\b",
    r"\bAI.?generated\b",
    r"\bAI.?powered\b",
    r"\bAI.?driven\b",
    r"\bbuilt with AI\b",
    r"\bpowered by AI\b",
    r"\bAI.?tools?\b",
    r"\bAI.?agents?\b",
];

static DEFAULT_TOPICS: Lazy<Vec<TopicPattern>> = Lazy::new(|| {
    let mut topics: Vec<TopicPattern> = TOPIC_PATTERNS
        .iter()
        .map(|p| TopicPattern::new(p).expect("built-in topic pattern"))
        .collect();
    // "ML" sits right after "machine learning", ahead of the product names.
    let ml = TopicPattern::new(r"\bML\b")
        .and_then(|p| p.excluding(r"^\s*/\s*ops"))
        .expect("built-in topic pattern");
    topics.insert(3, ml);
    topics
});

/// One immutable, case-insensitive topic rule.
#[derive(Debug, Clone)]
pub struct TopicPattern {
    source: String,
    regex: Regex,
    exclusion: Option<Regex>,
}

impl TopicPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            source: pattern.to_string(),
            regex: compile(pattern)?,
            exclusion: None,
        })
    }

    /// Ignore hits whose trailing text matches `exclusion`.
    ///
    /// The exclusion is tested against the text starting right after each hit,
    /// so it should normally be anchored with `^`.
    pub fn excluding(mut self, exclusion: &str) -> Result<Self> {
        self.exclusion = Some(compile(exclusion)?);
        Ok(self)
    }

    /// The pattern as written, before compilation.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        match &self.exclusion {
            None => self.regex.is_match(text),
            Some(exclusion) => self
                .regex
                .find_iter(text)
                .any(|hit| !exclusion.is_match(&text[hit.end()..])),
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("(?i){}", ascii_boundaries(pattern))).map_err(|source| {
        QuietfeedError::Pattern {
            pattern: pattern.to_string(),
            source,
        }
    })
}

/// Rewrite `\b` and `\B` to their ASCII forms. Other escapes, `\\b`
/// included, pass through untouched.
fn ascii_boundaries(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('b') => out.push_str(r"(?-u:\b)"),
            Some('B') => out.push_str(r"(?-u:\B)"),
            Some(next) => {
                out.push(c);
                out.push(next);
            }
            None => out.push(c),
        }
    }
    out
}

/// Classifies text against an ordered set of topic patterns.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    patterns: Vec<TopicPattern>,
    min_len: usize,
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::default_topics()
    }
}

impl PatternMatcher {
    /// A matcher with no patterns. Matches nothing until patterns are added.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            min_len: DEFAULT_MIN_TEXT_LEN,
        }
    }

    /// The built-in AI topic set.
    pub fn default_topics() -> Self {
        Self {
            patterns: DEFAULT_TOPICS.clone(),
            min_len: DEFAULT_MIN_TEXT_LEN,
        }
    }

    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    pub fn push(&mut self, pattern: TopicPattern) {
        self.patterns.push(pattern);
    }

    /// Compile and append a pattern.
    pub fn push_pattern(&mut self, pattern: &str) -> Result<()> {
        self.push(TopicPattern::new(pattern)?);
        Ok(())
    }

    pub fn patterns(&self) -> &[TopicPattern] {
        &self.patterns
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// True when the text is long enough and any pattern hits.
    pub fn matches(&self, text: &str) -> bool {
        if text.chars().count() < self.min_len {
            return false;
        }
        self.patterns.iter().any(|p| p.is_match(text))
    }

    /// The first pattern that hits, if any. Same guard as [`Self::matches`].
    pub fn first_match(&self, text: &str) -> Option<&TopicPattern> {
        if text.chars().count() < self.min_len {
            return None;
        }
        self.patterns.iter().find(|p| p.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_never_matches() {
        let matcher = PatternMatcher::default_topics();
        assert!(!matcher.matches(""));
        assert!(!matcher.matches("AI"));
        assert!(!matcher.matches("ChatGPT!!"));
        // Exactly ten characters passes the guard.
        assert!(matcher.matches("ChatGPT!!!"));
    }

    #[test]
    fn guard_counts_characters_not_bytes() {
        let matcher = PatternMatcher::default_topics();
        // Nine characters, well over ten bytes.
        assert!(!matcher.matches("AI ééééé!"));
    }

    #[test]
    fn exact_topic_terms_match() {
        let matcher = PatternMatcher::default_topics();
        for text in [
            "I asked ChatGPT about dinner",
            "a tiny neural network in C",
            "our RAG pipeline is live",
            "Claude wrote my unit tests",
            "this image is AI-generated",
            "startup powered by AI again",
            "fine-tuning is expensive",
            "new embeddings model released",
        ] {
            assert!(matcher.matches(text), "expected match: {text}");
        }
    }

    #[test]
    fn terms_next_to_cjk_text_match() {
        let matcher = PatternMatcher::default_topics();
        for text in [
            "今日はChatGPTを使ってみました",
            "最近のAIはすごいですね本当に",
            "生成AIの話題ばかりのタイムライン",
        ] {
            assert!(matcher.matches(text), "expected match: {text}");
        }
        // Latin letters still break the boundary.
        assert!(!matcher.matches("Said hello to my neighbour today"));
    }

    #[test]
    fn boundary_rewrite_leaves_other_escapes_alone() {
        assert_eq!(ascii_boundaries(r"\bAI\b"), r"(?-u:\b)AI(?-u:\b)");
        assert_eq!(ascii_boundaries(r"\BAI"), r"(?-u:\B)AI");
        assert_eq!(ascii_boundaries(r"a\\b\s"), r"a\\b\s");
        assert_eq!(ascii_boundaries("trailing\\"), "trailing\\");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let matcher = PatternMatcher::default_topics();
        assert!(matcher.matches("everyone loves chatgpt now"));
        assert!(matcher.matches("DEEP LEARNING course notes"));
    }

    #[test]
    fn terms_inside_words_do_not_match() {
        let matcher = PatternMatcher::default_topics();
        assert!(!matcher.matches("Said hello to my neighbour today"));
        assert!(!matcher.matches("The rainbow over the bay was great"));
        assert!(!matcher.matches("Dragons and fragments of stories"));
    }

    #[test]
    fn mlops_alone_does_not_match() {
        let matcher = PatternMatcher::default_topics();
        assert!(!matcher.matches("MLOps"));
        assert!(!matcher.matches("We are hiring for MLOps roles"));
    }

    #[test]
    fn ml_slash_ops_is_excluded() {
        let matcher = PatternMatcher::default_topics();
        assert!(!matcher.matches("Looking for ML/ops engineers"));
        assert!(!matcher.matches("Looking for ML / Ops engineers"));
    }

    #[test]
    fn ml_followed_by_other_text_matches() {
        let matcher = PatternMatcher::default_topics();
        assert!(matcher.matches("ML is eating the world"));
        // One excluded hit does not hide a later plain one.
        assert!(matcher.matches("ML/ops today, ML research tomorrow"));
    }

    #[test]
    fn exclusion_applies_only_after_hit() {
        let pattern = TopicPattern::new(r"\bfoo\b")
            .unwrap()
            .excluding(r"^\s*-\s*bar")
            .unwrap();
        assert!(!pattern.is_match("foo-bar"));
        assert!(!pattern.is_match("foo - BAR"));
        assert!(pattern.is_match("foo bar"));
        assert!(pattern.is_match("bar-foo"));
        assert!(pattern.is_match("foo"));
    }

    #[test]
    fn first_match_reports_pattern() {
        let matcher = PatternMatcher::default_topics();
        let hit = matcher.first_match("Just tried the new ChatGPT feature, wow!");
        assert_eq!(hit.map(TopicPattern::as_str), Some(r"\bChatGPT\b"));
        assert!(matcher.first_match("a perfectly normal post").is_none());
    }

    #[test]
    fn empty_matcher_matches_nothing() {
        let matcher = PatternMatcher::empty();
        assert!(!matcher.matches("ChatGPT ChatGPT ChatGPT"));
    }

    #[test]
    fn custom_min_len() {
        let matcher = PatternMatcher::default_topics().with_min_len(0);
        assert!(matcher.matches("AI"));
    }
}
